//! TheTVDB provider client.
//!
//! Uses TVDB API v4: https://thetvdb.github.io/v4-api/

use std::time::Duration;

use renamarr_core::MediaType;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::provider::MetadataBackend;
use crate::{EpisodeDetails, MetadataError, MovieDetails, SearchHit, SeriesDetails, Source};

const BASE_URL: &str = "https://api4.thetvdb.com/v4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TvdbClient {
    token: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Deserialize)]
struct SearchRecord {
    #[serde(default)]
    tvdb_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    year: String,
}

#[derive(Deserialize)]
struct MovieRecord {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    year: String,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRecord>,
    overview: Option<String>,
}

#[derive(Deserialize)]
struct SeriesRecord {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    year: String,
    status: Option<StatusRecord>,
    #[serde(default)]
    genres: Vec<GenreRecord>,
    overview: Option<String>,
}

#[derive(Deserialize)]
struct StatusRecord {
    name: Option<String>,
}

#[derive(Deserialize)]
struct GenreRecord {
    name: String,
}

#[derive(Deserialize)]
struct SeasonEpisodes {
    #[serde(default)]
    episodes: Vec<EpisodeRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeRecord {
    season_number: u32,
    number: u32,
    #[serde(default)]
    name: Option<String>,
    aired: Option<String>,
    overview: Option<String>,
}

impl TvdbClient {
    /// Authenticate against TVDB and return a ready client. The bearer
    /// token lasts for the whole run; there is no refresh.
    pub async fn login(api_key: &str) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        let resp = client
            .post(format!("{BASE_URL}/login"))
            .json(&serde_json::json!({ "apikey": api_key }))
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MetadataError::Auth(format!(
                "TVDB login returned {}",
                resp.status()
            )));
        }

        let login: Envelope<LoginData> = resp
            .json()
            .await
            .map_err(|e| MetadataError::Auth(format!("parse login response: {e}")))?;

        Ok(Self {
            token: login.data.token,
            client,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MetadataError> {
        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TVDB request");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TVDB returned {}",
                resp.status()
            )));
        }

        let envelope: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))?;
        Ok(envelope.data)
    }

    async fn search(&self, query: &str, media_type: MediaType) -> Result<Vec<SearchHit>, MetadataError> {
        let records: Vec<SearchRecord> = self
            .fetch("/search", &[("query", query), ("type", media_type.as_str())])
            .await?;

        Ok(records
            .into_iter()
            .filter(|r| !r.tvdb_id.is_empty())
            .map(|r| SearchHit {
                id: r.tvdb_id,
                title: r.name,
                year: r.year,
                media_type,
                source: Source::Tvdb,
                // TVDB search has no native popularity score.
                score: 0.0,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl MetadataBackend for TvdbClient {
    fn source(&self) -> Source {
        Source::Tvdb
    }

    async fn search_movies(
        &self,
        query: &str,
        _year: Option<u16>,
    ) -> Result<Vec<SearchHit>, MetadataError> {
        // TVDB search takes no year filter; the manager ranks by year
        // distance after the merge instead.
        self.search(query, MediaType::Movie).await
    }

    async fn search_series(&self, query: &str) -> Result<Vec<SearchHit>, MetadataError> {
        self.search(query, MediaType::Series).await
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetails, MetadataError> {
        let record: MovieRecord = self.fetch(&format!("/movies/{id}"), &[]).await?;
        Ok(MovieDetails {
            id: record.id.to_string(),
            title: record.name,
            year: record.year,
            runtime_minutes: record.runtime,
            genres: record.genres.into_iter().map(|g| g.name).collect(),
            overview: record.overview,
        })
    }

    async fn get_series(&self, id: &str) -> Result<SeriesDetails, MetadataError> {
        let record: SeriesRecord = self.fetch(&format!("/series/{id}"), &[]).await?;
        Ok(SeriesDetails {
            id: record.id.to_string(),
            name: record.name,
            year: record.year,
            status: record.status.and_then(|s| s.name),
            genres: record.genres.into_iter().map(|g| g.name).collect(),
            overview: record.overview,
        })
    }

    async fn get_episode(
        &self,
        series_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeDetails, MetadataError> {
        let season_param = season.to_string();
        let data: SeasonEpisodes = self
            .fetch(
                &format!("/series/{series_id}/episodes/default"),
                &[("season", season_param.as_str())],
            )
            .await?;

        // The season endpoint returns the whole list; an exact match is
        // required, a missing episode is NotFound rather than an empty record.
        data.episodes
            .into_iter()
            .find(|e| e.season_number == season && e.number == episode)
            .map(|e| EpisodeDetails {
                season: e.season_number,
                episode: e.number,
                name: e.name.unwrap_or_default(),
                air_date: e.aired,
                overview: e.overview,
            })
            .ok_or(MetadataError::NotFound)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_records_decode_and_skip_blank_ids() {
        let json = serde_json::json!({
            "data": [
                { "tvdb_id": "81189", "name": "Breaking Bad", "year": "2008", "type": "series" },
                { "name": "Orphan Record" }
            ]
        });
        let envelope: Envelope<Vec<SearchRecord>> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[0].tvdb_id, "81189");
        assert!(envelope.data[1].tvdb_id.is_empty());
    }

    #[test]
    fn season_episode_list_decodes_camel_case() {
        let json = serde_json::json!({
            "data": {
                "episodes": [
                    { "seasonNumber": 1, "number": 2, "name": "Cat's in the Bag...", "aired": "2008-01-27" }
                ]
            }
        });
        let envelope: Envelope<SeasonEpisodes> = serde_json::from_value(json).unwrap();
        let ep = &envelope.data.episodes[0];
        assert_eq!((ep.season_number, ep.number), (1, 2));
        assert_eq!(ep.name.as_deref(), Some("Cat's in the Bag..."));
    }

    #[test]
    fn movie_record_tolerates_missing_optionals() {
        let json = serde_json::json!({
            "data": { "id": 134, "name": "Inception", "year": "2010" }
        });
        let envelope: Envelope<MovieRecord> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.data.runtime, None);
        assert!(envelope.data.genres.is_empty());
    }
}
