use std::path::{Path, PathBuf};

use renamarr_core::DiscType;
use tracing::{debug, warn};

use crate::parser::{self, MediaItem, MediaKind, MovieItem};

/// Classify a path as the walk would: directories via the movie-folder
/// heuristic, files via extension + episode/movie patterns.
pub fn classify(path: &Path, is_directory: bool) -> Option<MediaItem> {
    if is_directory {
        classify_movie_folder(path)
    } else {
        parser::classify_file(path)
    }
}

/// Walk `root` recursively and classify everything found.
///
/// A directory that qualifies as a movie folder is emitted as a single
/// item and never descended into, so its contents cannot also surface as
/// standalone items.
pub fn scan_dir(root: &Path) -> Vec<MediaItem> {
    let mut items = Vec::new();
    walk_recursive(root, &mut items);
    items
}

fn walk_recursive(dir: &Path, items: &mut Vec<MediaItem>) {
    for path in sorted_entries(dir) {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if name.starts_with('.') {
            debug!(path = %path.display(), "skipping hidden entry");
            continue;
        }

        if path.is_dir() {
            if let Some(item) = classify_movie_folder(&path) {
                items.push(item);
                continue;
            }
            walk_recursive(&path, items);
        } else if let Some(item) = parser::classify_file(&path) {
            items.push(item);
        }
    }
}

// Sorted like the directory listings the heuristics were written against;
// also makes "first video file" deterministic across platforms.
fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot read directory");
            return Vec::new();
        }
    };
    let mut paths: Vec<PathBuf> = read_dir.flatten().map(|e| e.path()).collect();
    paths.sort();
    paths
}

/// Movie-folder heuristic. A directory qualifies when any of these holds,
/// checked in order:
///   1. it contains a `BDMV` or `VIDEO_TS` subdirectory (disc structure);
///   2. it contains at least one video file and one subtitle file;
///   3. it contains exactly one video file and either the folder name has
///      a year or the stripped folder/video names contain each other.
pub fn classify_movie_folder(dir: &Path) -> Option<MediaItem> {
    let folder_name = dir.file_name()?.to_str()?.to_string();

    let mut disc = DiscType::None;
    let mut video_files = Vec::new();
    let mut subtitle_files = Vec::new();

    for path in sorted_entries(dir) {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if path.is_dir() {
            if name.eq_ignore_ascii_case("BDMV") {
                disc = DiscType::BluRay;
            } else if name.eq_ignore_ascii_case("VIDEO_TS") && disc == DiscType::None {
                disc = DiscType::Dvd;
            }
        } else if parser::is_video_file(name) {
            video_files.push(path);
        } else if parser::is_subtitle_file(name) {
            subtitle_files.push(path);
        }
    }

    let qualifies = disc != DiscType::None
        || (!video_files.is_empty() && !subtitle_files.is_empty())
        || (video_files.len() == 1 && lone_video_matches(&folder_name, &video_files[0]));
    if !qualifies {
        return None;
    }

    let main_video_stem = video_files
        .first()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(str::to_string);

    let year = parser::extract_year(&folder_name)
        .or_else(|| main_video_stem.as_deref().and_then(parser::extract_year));

    let mut clean_title = parser::clean_movie_title(&folder_name);
    if clean_title.is_empty() || clean_title == folder_name {
        if let Some(stem) = &main_video_stem {
            let from_video = parser::clean_movie_title(stem);
            if !from_video.is_empty() {
                clean_title = from_video;
            }
        }
    }

    let extension = video_files
        .first()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| disc.extension().to_string());

    Some(MediaItem {
        path: dir.to_path_buf(),
        raw_name: folder_name,
        extension,
        clean_title,
        kind: MediaKind::Movie(MovieItem {
            year,
            is_folder: true,
            video_files,
            subtitle_files,
            disc,
        }),
    })
}

fn lone_video_matches(folder_name: &str, video: &Path) -> bool {
    if parser::extract_year(folder_name).is_some() {
        return true;
    }
    let video_stem = match video.file_stem().and_then(|s| s.to_str()) {
        Some(s) => s,
        None => return false,
    };
    let clean_folder = parser::clean_movie_title(folder_name).to_lowercase();
    let clean_video = parser::clean_movie_title(video_stem).to_lowercase();
    if clean_folder.is_empty() || clean_video.is_empty() {
        return false;
    }
    clean_folder.contains(&clean_video) || clean_video.contains(&clean_folder)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
