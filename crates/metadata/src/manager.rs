use std::cmp::Ordering;

use tracing::warn;

use crate::provider::MetadataBackend;
use crate::tmdb::TmdbClient;
use crate::tvdb::TvdbClient;
use crate::{EpisodeDetails, MetadataError, MovieDetails, SearchHit, SeriesDetails, Source};

/// Fans search calls out to every enabled backend, merges and ranks the
/// results, and dispatches detail lookups by source tag.
pub struct Manager {
    backends: Vec<Box<dyn MetadataBackend>>,
}

impl Manager {
    /// Build from credentials. A TVDB login failure disables that backend
    /// for the run unless it was the only one configured, in which case
    /// construction fails with the login error.
    pub async fn new(
        tvdb_key: Option<String>,
        tmdb_key: Option<String>,
    ) -> Result<Self, MetadataError> {
        let mut backends: Vec<Box<dyn MetadataBackend>> = Vec::new();
        let mut tvdb_failure = None;

        if let Some(key) = tvdb_key {
            match TvdbClient::login(&key).await {
                Ok(client) => backends.push(Box::new(client)),
                Err(e) => {
                    warn!(error = %e, "TVDB disabled for this run");
                    tvdb_failure = Some(e);
                }
            }
        }
        if let Some(key) = tmdb_key {
            backends.push(Box::new(TmdbClient::new(key)?));
        }

        if backends.is_empty() {
            return Err(tvdb_failure.unwrap_or(MetadataError::NoBackends));
        }
        Ok(Self { backends })
    }

    /// Assemble from already-built backends.
    pub fn from_backends(backends: Vec<Box<dyn MetadataBackend>>) -> Result<Self, MetadataError> {
        if backends.is_empty() {
            return Err(MetadataError::NoBackends);
        }
        Ok(Self { backends })
    }

    pub async fn search_movies(&self, query: &str, year: Option<u16>) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for backend in &self.backends {
            match backend.search_movies(query, year).await {
                Ok(mut found) => hits.append(&mut found),
                Err(e) => {
                    warn!(backend = backend.source().as_str(), error = %e, "movie search failed")
                }
            }
        }
        rank_hits(&mut hits, year);
        hits
    }

    pub async fn search_series(&self, query: &str) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for backend in &self.backends {
            match backend.search_series(query).await {
                Ok(mut found) => hits.append(&mut found),
                Err(e) => {
                    warn!(backend = backend.source().as_str(), error = %e, "series search failed")
                }
            }
        }
        rank_hits(&mut hits, None);
        hits
    }

    pub async fn get_movie(&self, id: &str, source: Source) -> Result<MovieDetails, MetadataError> {
        self.backend(source)?.get_movie(id).await
    }

    pub async fn get_series(
        &self,
        id: &str,
        source: Source,
    ) -> Result<SeriesDetails, MetadataError> {
        self.backend(source)?.get_series(id).await
    }

    pub async fn get_episode(
        &self,
        series_id: &str,
        source: Source,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeDetails, MetadataError> {
        self.backend(source)?
            .get_episode(series_id, season, episode)
            .await
    }

    fn backend(&self, source: Source) -> Result<&dyn MetadataBackend, MetadataError> {
        self.backends
            .iter()
            .map(|b| b.as_ref())
            .find(|b| b.source() == source)
            .ok_or(MetadataError::NotConfigured(source))
    }
}

/// Stable ranking over the merged hit list: TVDB results ahead of TMDB,
/// then year distance to the target when one is known, otherwise
/// descending rank score. Equal keys keep per-backend order.
fn rank_hits(hits: &mut [SearchHit], target_year: Option<u16>) {
    hits.sort_by(|a, b| {
        source_rank(a.source)
            .cmp(&source_rank(b.source))
            .then_with(|| match target_year {
                Some(target) => year_distance(a, target).cmp(&year_distance(b, target)),
                None => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
            })
    });
}

fn source_rank(source: Source) -> u8 {
    match source {
        Source::Tvdb => 0,
        Source::Tmdb => 1,
    }
}

// Hits without a parsable year sort behind every dated candidate.
fn year_distance(hit: &SearchHit, target: u16) -> u32 {
    hit.year_number()
        .map(|y| (i32::from(y) - i32::from(target)).unsigned_abs())
        .unwrap_or(u32::MAX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
