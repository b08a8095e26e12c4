use std::path::PathBuf;

/// Immutable run configuration, established once at startup and threaded
/// through the orchestrator instead of living in process-wide flags.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Compute and report every plan but perform no filesystem mutation.
    pub dry_run: bool,
    /// Select the first ranked search result without prompting.
    pub auto: bool,
    /// Directory scanned for movies.
    pub movies_dir: Option<PathBuf>,
    /// Destination tree for renamed movies; `None` means rename in place.
    pub movies_out_dir: Option<PathBuf>,
    /// Directory scanned for series episodes.
    pub series_dir: Option<PathBuf>,
    /// Destination tree for renamed series; `None` means rename in place.
    pub series_out_dir: Option<PathBuf>,
}

impl RunConfig {
    /// At least one input directory must be configured for a run to make sense.
    pub fn has_input(&self) -> bool {
        self.movies_dir.is_some() || self.series_dir.is_some()
    }
}
