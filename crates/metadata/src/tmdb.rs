//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use renamarr_core::MediaType;
use tracing::debug;

use crate::provider::MetadataBackend;
use crate::{EpisodeDetails, MetadataError, MovieDetails, SearchHit, SeriesDetails, Source};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MetadataError::Network(e.to_string()))?;
        Ok(Self { api_key, client })
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

// Vote average dominates raw popularity so an obscure-but-acclaimed title
// still outranks a trending mismatch.
fn rank_score(result: &serde_json::Value) -> f64 {
    let popularity = result["popularity"].as_f64().unwrap_or(0.0);
    let vote_average = result["vote_average"].as_f64().unwrap_or(0.0);
    popularity + 10.0 * vote_average
}

fn year_of(result: &serde_json::Value, date_field: &str) -> String {
    result[date_field]
        .as_str()
        .and_then(|d| d.get(..4))
        .unwrap_or_default()
        .to_string()
}

#[async_trait::async_trait]
impl MetadataBackend for TmdbClient {
    fn source(&self) -> Source {
        Source::Tmdb
    }

    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<SearchHit>, MetadataError> {
        let mut params = vec![("query", query), ("include_adult", "false")];
        let year_str = year.map(|y| y.to_string());
        if let Some(ref y) = year_str {
            params.push(("year", y));
        }

        let data = self.get_json("/search/movie", &params).await?;
        let results = data["results"].as_array().cloned().unwrap_or_default();

        Ok(results
            .iter()
            .map(|r| SearchHit {
                id: r["id"].as_u64().unwrap_or(0).to_string(),
                title: r["title"].as_str().unwrap_or("Unknown").to_string(),
                year: year_of(r, "release_date"),
                media_type: MediaType::Movie,
                source: Source::Tmdb,
                score: rank_score(r),
            })
            .collect())
    }

    async fn search_series(&self, query: &str) -> Result<Vec<SearchHit>, MetadataError> {
        let data = self
            .get_json("/search/tv", &[("query", query), ("include_adult", "false")])
            .await?;
        let results = data["results"].as_array().cloned().unwrap_or_default();

        Ok(results
            .iter()
            .map(|r| SearchHit {
                id: r["id"].as_u64().unwrap_or(0).to_string(),
                title: r["name"].as_str().unwrap_or("Unknown").to_string(),
                year: year_of(r, "first_air_date"),
                media_type: MediaType::Series,
                source: Source::Tmdb,
                score: rank_score(r),
            })
            .collect())
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetails, MetadataError> {
        let data = self.get_json(&format!("/movie/{id}"), &[]).await?;

        Ok(MovieDetails {
            id: data["id"].as_u64().unwrap_or(0).to_string(),
            title: data["title"].as_str().unwrap_or("Unknown").to_string(),
            year: year_of(&data, "release_date"),
            runtime_minutes: data["runtime"].as_u64().map(|r| r as u32),
            genres: data["genres"]
                .as_array()
                .map(|gs| {
                    gs.iter()
                        .filter_map(|g| g["name"].as_str().map(|s| s.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            overview: data["overview"].as_str().map(|s| s.to_string()),
        })
    }

    async fn get_series(&self, id: &str) -> Result<SeriesDetails, MetadataError> {
        let data = self.get_json(&format!("/tv/{id}"), &[]).await?;

        Ok(SeriesDetails {
            id: data["id"].as_u64().unwrap_or(0).to_string(),
            name: data["name"].as_str().unwrap_or("Unknown").to_string(),
            year: year_of(&data, "first_air_date"),
            status: data["status"].as_str().map(|s| s.to_string()),
            genres: data["genres"]
                .as_array()
                .map(|gs| {
                    gs.iter()
                        .filter_map(|g| g["name"].as_str().map(|s| s.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            overview: data["overview"].as_str().map(|s| s.to_string()),
        })
    }

    async fn get_episode(
        &self,
        series_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeDetails, MetadataError> {
        let data = self
            .get_json(&format!("/tv/{series_id}/season/{season}"), &[])
            .await?;
        let episodes = data["episodes"].as_array().cloned().unwrap_or_default();

        episodes
            .iter()
            .find(|ep| {
                ep["season_number"].as_u64() == Some(u64::from(season))
                    && ep["episode_number"].as_u64() == Some(u64::from(episode))
            })
            .map(|ep| EpisodeDetails {
                season,
                episode,
                name: ep["name"].as_str().unwrap_or_default().to_string(),
                air_date: ep["air_date"].as_str().map(|s| s.to_string()),
                overview: ep["overview"].as_str().map(|s| s.to_string()),
            })
            .ok_or(MetadataError::NotFound)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
