//! Final name synthesis: pure string functions, no I/O.
//!
//! Every synthesized name passes through [`sanitize`] before it is used
//! as a path segment, so resolved titles can never smuggle separators or
//! reserved characters into the filesystem.

use std::sync::LazyLock;

use regex::Regex;

static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Make a string safe as a single path segment on common filesystems.
///
/// Trailing dots are trimmed because they are illegal on NTFS. The
/// function is idempotent: sanitizing an already-sanitized string is a
/// no-op.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            ':' => out.push_str(" -"),
            '/' | '\\' => out.push(' '),
            '<' | '>' | '?' | '*' => {}
            '|' => out.push('-'),
            '"' => out.push('\''),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    RE_SPACES
        .replace_all(&out, " ")
        .trim_matches([' ', '.'])
        .to_string()
}

fn title_with_year(title: &str, year: Option<u16>) -> String {
    match year {
        Some(y) => format!("{title} ({y})"),
        None => title.to_string(),
    }
}

/// `"<SeriesTitle> S01E02[ - <EpisodeName>]<ext>"`. The episode-name
/// suffix is omitted entirely when the name is empty or sanitizes away,
/// never left as a dangling `" - "`.
pub fn episode_filename(
    series_title: &str,
    season: u32,
    episode: u32,
    episode_name: &str,
    extension: &str,
) -> String {
    let name = sanitize(episode_name);
    let stem = if name.is_empty() {
        format!("{series_title} S{season:02}E{episode:02}")
    } else {
        format!("{series_title} S{season:02}E{episode:02} - {name}")
    };
    format!("{}{extension}", sanitize(&stem))
}

/// `"<Title>[ (<year>)]<ext>"`.
pub fn movie_filename(title: &str, year: Option<u16>, extension: &str) -> String {
    format!("{}{extension}", sanitize(&title_with_year(title, year)))
}

/// `"<Title>[ (<year>)]"`.
pub fn movie_folder_name(title: &str, year: Option<u16>) -> String {
    sanitize(&title_with_year(title, year))
}

/// `"<Title>[ (<year>)]"`.
pub fn series_folder_name(title: &str, year: Option<u16>) -> String {
    sanitize(&title_with_year(title, year))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
