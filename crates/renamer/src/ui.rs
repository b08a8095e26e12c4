//! Presentation seam between the orchestrator and the terminal. The
//! orchestrator hands structured candidate rows to an [`Interaction`]
//! implementation and never formats terminal output itself.

use renamarr_core::ReportLevel;
use renamarr_metadata::{MovieDetails, SearchHit, SeriesDetails};

/// A movie candidate row. `details` comes from the enrichment fetch and
/// is absent when that lookup failed; the row then shows search data only.
#[derive(Debug, Clone)]
pub struct MovieChoice {
    pub hit: SearchHit,
    pub details: Option<MovieDetails>,
}

/// A series candidate row, same shape as [`MovieChoice`].
#[derive(Debug, Clone)]
pub struct SeriesChoice {
    pub hit: SearchHit,
    pub details: Option<SeriesDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the presented candidate list.
    Pick(usize),
    Skip,
}

pub trait Interaction {
    fn select_movie(&self, item: &str, choices: &[MovieChoice]) -> std::io::Result<Selection>;

    fn select_series(&self, item: &str, choices: &[SeriesChoice]) -> std::io::Result<Selection>;

    fn confirm(&self, prompt: &str) -> std::io::Result<bool>;

    /// One user-facing notice; implementations decide how to style it.
    fn report(&self, level: ReportLevel, message: &str);
}
