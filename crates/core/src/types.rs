use serde::{Deserialize, Serialize};

/// Broad media classification shared across search and scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optical-disc directory structure detected inside a movie folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscType {
    #[default]
    None,
    BluRay,
    Dvd,
}

impl DiscType {
    /// Synthetic extension used when a disc folder has no loose video file.
    pub fn extension(self) -> &'static str {
        match self {
            Self::None => "",
            Self::BluRay => ".bluray",
            Self::Dvd => ".dvd",
        }
    }
}

/// Severity for messages handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
    Success,
}
