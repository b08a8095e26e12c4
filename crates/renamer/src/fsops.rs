//! Filesystem side of a rename: collision checks, parent creation and
//! subtitle companion discovery. All mutation funnels through [`RenameOp`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One planned move/rename of a file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub src: PathBuf,
    pub dst: PathBuf,
}

impl RenameOp {
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// A plan whose destination equals its source needs no filesystem call.
    pub fn is_noop(&self) -> bool {
        self.src == self.dst
    }

    /// Collision pre-flight, no mutation. An existing destination that is
    /// not the source itself refuses the operation; nothing is ever
    /// overwritten or auto-suffixed.
    pub fn check(&self) -> Result<(), RenameError> {
        if !self.is_noop() && self.dst.exists() {
            return Err(RenameError::DestinationExists(self.dst.clone()));
        }
        Ok(())
    }

    /// Perform the move, creating destination parents as needed.
    pub fn apply(&self) -> Result<(), RenameError> {
        if self.is_noop() {
            return Ok(());
        }
        self.check()?;
        if let Some(parent) = self.dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&self.src, &self.dst)?;
        Ok(())
    }
}

/// Subtitle files sitting next to `video` whose name starts with the
/// video's stem (`Movie.srt`, `Movie.en.srt`, ...).
pub fn subtitle_companions(video: &Path) -> Vec<PathBuf> {
    let (Some(dir), Some(stem)) = (video.parent(), video.file_stem().and_then(|s| s.to_str()))
    else {
        return Vec::new();
    };
    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot list directory for subtitles");
            return Vec::new();
        }
    };

    let mut subs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(stem) && renamarr_scanner::parser::is_subtitle_file(n))
        })
        .collect();
    subs.sort();
    subs
}

/// Destination for a companion subtitle: the new stem plus whatever
/// trailed the old stem, so `Movie.en.srt` follows `Movie.mkv` as
/// `New Title.en.srt`.
pub fn companion_destination(
    subtitle: &Path,
    old_stem: &str,
    new_stem: &str,
    dst_dir: &Path,
) -> Option<PathBuf> {
    let name = subtitle.file_name()?.to_str()?;
    let suffix = name.strip_prefix(old_stem)?;
    Some(dst_dir.join(format!("{new_stem}{suffix}")))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn noop_succeeds_without_touching_the_filesystem() {
        let op = RenameOp::new("/nonexistent/a.mkv", "/nonexistent/a.mkv");
        assert!(op.is_noop());
        op.apply().unwrap();
    }

    #[test]
    fn existing_destination_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.mkv");
        let dst = tmp.path().join("dst.mkv");
        touch(&src);
        touch(&dst);

        let err = RenameOp::new(&src, &dst).apply().unwrap_err();
        assert!(matches!(err, RenameError::DestinationExists(p) if p == dst));
        assert!(src.exists());
    }

    #[test]
    fn apply_creates_missing_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.mkv");
        let dst = tmp.path().join("Movies/Inception (2010)/Inception (2010).mkv");
        touch(&src);

        RenameOp::new(&src, &dst).apply().unwrap();
        assert!(dst.exists());
        assert!(!src.exists());
    }

    #[test]
    fn companions_are_matched_by_stem_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let video = tmp.path().join("Movie.2010.mkv");
        touch(&video);
        touch(&tmp.path().join("Movie.2010.srt"));
        touch(&tmp.path().join("Movie.2010.en.srt"));
        touch(&tmp.path().join("Other.srt"));
        touch(&tmp.path().join("Movie.2010.nfo"));

        let subs = subtitle_companions(&video);
        assert_eq!(subs.len(), 2);
        assert!(subs.iter().all(|s| {
            s.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("Movie.2010"))
        }));
    }

    #[test]
    fn companion_destination_keeps_the_language_suffix() {
        let dst = companion_destination(
            Path::new("/in/Movie.2010.en.srt"),
            "Movie.2010",
            "Inception (2010)",
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(dst, Path::new("/out/Inception (2010).en.srt"));
    }
}
