use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use renamarr_core::DiscType;

/// A classified media file or movie folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    /// File or folder name exactly as found on disk.
    pub raw_name: String,
    /// Extension with leading dot (`.mkv`); synthetic `.bluray`/`.dvd`
    /// for disc folders without a loose video file.
    pub extension: String,
    /// Artifact-stripped title used as the search query.
    pub clean_title: String,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Movie(MovieItem),
    Episode(EpisodeItem),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieItem {
    pub year: Option<u16>,
    pub is_folder: bool,
    /// All video files inside a movie folder; empty for standalone files.
    pub video_files: Vec<PathBuf>,
    pub subtitle_files: Vec<PathBuf>,
    pub disc: DiscType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItem {
    pub season: u32,
    pub episode: u32,
    /// Name of the immediate parent directory, used for batch display.
    pub parent_folder: String,
}

impl MediaItem {
    pub fn is_episode(&self) -> bool {
        matches!(self.kind, MediaKind::Episode(_))
    }

    pub fn as_movie(&self) -> Option<&MovieItem> {
        match &self.kind {
            MediaKind::Movie(m) => Some(m),
            MediaKind::Episode(_) => None,
        }
    }

    pub fn as_episode(&self) -> Option<&EpisodeItem> {
        match &self.kind {
            MediaKind::Episode(e) => Some(e),
            MediaKind::Movie(_) => None,
        }
    }

    /// Main video file of a movie folder, if any.
    pub fn main_video_file(&self) -> Option<&Path> {
        self.as_movie()
            .and_then(|m| m.video_files.first())
            .map(PathBuf::as_path)
    }

    /// Full path of the directory containing this item.
    pub fn parent_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

static VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "flv", "webm", "m4v", "iso",
];

static SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub", "ass", "ssa", "vtt"];

// Episode numbering patterns, tried in this fixed order. The first match
// wins; season and episode come from the two captured groups.
static EPISODE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)S(\d{1,2})E(\d{1,2})").unwrap(),
        Regex::new(r"(?i)(\d{1,2})x(\d{1,2})").unwrap(),
        Regex::new(r"(?i)Season\s*(\d{1,2})\s*Episode\s*(\d{1,2})").unwrap(),
        Regex::new(r"(?i)s(\d{1,2})\s*-\s*e(\d{1,2})").unwrap(),
    ]
});

// 4-digit runs; candidate years are validated against their surrounding
// delimiters in `extract_year` so adjacent tokens are not swallowed.
static RE_FOUR_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

// Year token (with delimiters) for removal during movie title cleaning.
static RE_YEAR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{4})\)|\[(\d{4})\]|(?:^|[\s.])(\d{4})(?:[\s.]|$)").unwrap()
});

static RE_QUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(2160p|1080p|720p|480p|4k|blu-?ray|brrip|bdrip|web[\s-]?dl|webrip|hdtv|dvdrip|xvid|x264|x265|h\.?264|h\.?265|hevc|aac|ac3|dts|proper|repack|remux)\b",
    )
    .unwrap()
});

static RE_BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());

static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Check if a filename has a supported video extension.
pub fn is_video_file(name: &str) -> bool {
    extension_of(name)
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a filename has a supported subtitle extension.
pub fn is_subtitle_file(name: &str) -> bool {
    extension_of(name)
        .map(|ext| SUBTITLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn extension_of(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() => Some(&name[pos + 1..]),
        _ => None,
    }
}

/// Extract season/episode numbers, trying each pattern in priority order.
pub fn episode_numbers(stem: &str) -> Option<(u32, u32)> {
    for pattern in EPISODE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(stem) {
            let season: u32 = caps[1].parse().ok()?;
            let episode: u32 = caps[2].parse().ok()?;
            return Some((season, episode));
        }
    }
    None
}

/// Extract the first year in [1900, 2100]. Accepted forms are `(YYYY)`,
/// `[YYYY]`, and a bare token delimited by space/dot or the string edge;
/// out-of-range candidates are skipped, not fatal.
pub fn extract_year(name: &str) -> Option<u16> {
    for m in RE_FOUR_DIGITS.find_iter(name) {
        let before = name[..m.start()].chars().next_back();
        let after = name[m.end()..].chars().next();
        let delimited = matches!(before, None | Some(' ' | '.' | '(' | '['))
            && matches!(after, None | Some(' ' | '.' | ')' | ']'));
        if !delimited {
            continue;
        }
        if let Ok(year) = m.as_str().parse::<u16>() {
            if year >= 1900 && year <= 2100 {
                return Some(year);
            }
        }
    }
    None
}

/// Strip separators, quality/encoding tokens and bracketed groups.
fn strip_artifacts(name: &str) -> String {
    let spaced = name.replace(['.', '_', '-'], " ");
    let no_quality = RE_QUALITY.replace_all(&spaced, " ");
    let no_brackets = RE_BRACKET_GROUP.replace_all(&no_quality, " ");
    RE_SPACES.replace_all(&no_brackets, " ").trim().to_string()
}

/// Clean title for an episode: the matched numbering is removed before
/// generic artifact stripping so no pattern fragment survives.
pub fn clean_episode_title(stem: &str) -> String {
    let mut name = stem.to_string();
    for pattern in EPISODE_PATTERNS.iter() {
        name = pattern.replace_all(&name, " ").into_owned();
    }
    strip_artifacts(&name)
}

/// Clean title for a movie: year token removed, then artifacts.
pub fn clean_movie_title(stem: &str) -> String {
    let without_year = RE_YEAR_TOKEN.replace_all(stem, " ");
    strip_artifacts(&without_year)
}

/// Search query derived from a series parent folder name. Artifacts go
/// first so a quality token like `1080p` cannot be mistaken for a year.
pub fn series_query_from_folder(folder: &str) -> String {
    let stripped = strip_artifacts(folder);
    let without_year = RE_YEAR_TOKEN.replace_all(&stripped, " ");
    RE_SPACES.replace_all(&without_year, " ").trim().to_string()
}

/// Classify a standalone file. Returns `None` for non-video files.
pub fn classify_file(path: &Path) -> Option<MediaItem> {
    let raw_name = path.file_name()?.to_str()?.to_string();
    if !is_video_file(&raw_name) {
        return None;
    }

    let dot = raw_name.rfind('.').unwrap_or(raw_name.len());
    let stem = &raw_name[..dot];
    let extension = raw_name[dot..].to_string();

    let parent_folder = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let item = if let Some((season, episode)) = episode_numbers(stem) {
        MediaItem {
            path: path.to_path_buf(),
            raw_name: raw_name.clone(),
            extension,
            clean_title: clean_episode_title(stem),
            kind: MediaKind::Episode(EpisodeItem {
                season,
                episode,
                parent_folder,
            }),
        }
    } else {
        MediaItem {
            path: path.to_path_buf(),
            raw_name: raw_name.clone(),
            extension,
            clean_title: clean_movie_title(stem),
            kind: MediaKind::Movie(MovieItem {
                year: extract_year(stem),
                ..Default::default()
            }),
        }
    };

    Some(item)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
