pub mod manager;
pub mod provider;
pub mod tmdb;
pub mod tvdb;

use std::fmt;

use renamarr_core::MediaType;
use thiserror::Error;

pub use manager::Manager;
pub use provider::MetadataBackend;
pub use tmdb::TmdbClient;
pub use tvdb::TvdbClient;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("not found")]
    NotFound,
    #[error("no enabled backend for source {0}")]
    NotConfigured(Source),
    #[error("no metadata backend configured")]
    NoBackends,
}

/// Which external service a search result came from. Detail lookups
/// dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Tvdb,
    Tmdb,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Tvdb => "tvdb",
            Source::Tmdb => "tmdb",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One search candidate, already normalized out of its backend's own
/// response shape. Created fresh per search call, never persisted.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchHit {
    /// Opaque per-source identifier.
    pub id: String,
    pub title: String,
    /// Release/first-air year as the backend reports it; may be empty.
    pub year: String,
    pub media_type: MediaType,
    pub source: Source,
    /// Source-defined rank score; 0 for sources without a native one.
    pub score: f64,
}

impl SearchHit {
    pub fn year_number(&self) -> Option<u16> {
        self.year.get(..4)?.parse().ok()
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub year: String,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SeriesDetails {
    pub id: String,
    pub name: String,
    pub year: String,
    pub status: Option<String>,
    pub genres: Vec<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EpisodeDetails {
    pub season: u32,
    pub episode: u32,
    pub name: String,
    pub air_date: Option<String>,
    pub overview: Option<String>,
}
