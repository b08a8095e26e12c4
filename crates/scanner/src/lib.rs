#![allow(clippy::collapsible_if, clippy::manual_range_contains)]
pub mod group;
pub mod parser;
pub mod walk;

pub use group::{SeriesBatch, group_by_parent};
pub use parser::{EpisodeItem, MediaItem, MediaKind, MovieItem};
pub use walk::scan_dir;
