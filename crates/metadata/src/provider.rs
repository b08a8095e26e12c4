use crate::{EpisodeDetails, MetadataError, MovieDetails, SearchHit, SeriesDetails, Source};

/// A metadata backend that can search and fetch details, returning the
/// unified types. Backend-specific response shapes stay inside each
/// implementation.
#[async_trait::async_trait]
pub trait MetadataBackend: Send + Sync {
    fn source(&self) -> Source;

    /// Search for a movie by title and optional release year.
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<SearchHit>, MetadataError>;

    /// Search for a TV series by title.
    async fn search_series(&self, query: &str) -> Result<Vec<SearchHit>, MetadataError>;

    /// Full metadata for a movie by backend ID.
    async fn get_movie(&self, id: &str) -> Result<MovieDetails, MetadataError>;

    /// Full metadata for a series by backend ID.
    async fn get_series(&self, id: &str) -> Result<SeriesDetails, MetadataError>;

    /// A single episode's metadata. `NotFound` when the season/episode
    /// pair does not exist upstream.
    async fn get_episode(
        &self,
        series_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeDetails, MetadataError>;
}
