use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{RevealError, RevealResult},
};

const PREFIX: &str = "frame_";
const MIN_DIGITS: usize = 4;

/// On-disk naming of the frame sequence: `<dir>/frame_<index>.<ext>`, zero-padded to a fixed
/// width of at least four digits and at least the digit count of the total frame count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    dir: PathBuf,
    ext: String,
    digits: usize,
}

fn digit_count(mut n: u64) -> usize {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

impl FrameLayout {
    /// PNG sequence in `dir` sized for `total_frames`.
    pub fn new(dir: impl Into<PathBuf>, total_frames: u64) -> Self {
        Self {
            dir: dir.into(),
            ext: "png".to_string(),
            digits: digit_count(total_frames).max(MIN_DIGITS),
        }
    }

    /// Directory holding the sequence.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Zero-padding width.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Path of frame `idx`.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!(
            "{PREFIX}{:0width$}.{}",
            idx.0,
            self.ext,
            width = self.digits
        ))
    }

    /// printf-style input pattern understood by `ffmpeg`, e.g. `frame_%04d.png`.
    pub fn ffmpeg_pattern(&self) -> PathBuf {
        self.dir
            .join(format!("{PREFIX}%0{}d.{}", self.digits, self.ext))
    }

    /// Create the sequence directory.
    pub fn ensure_dir(&self) -> RevealResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frame directory '{}'", self.dir.display()))?;
        Ok(())
    }

    /// Frame index encoded in `file_name`, if it belongs to this sequence.
    fn parse_index(&self, file_name: &str) -> Option<u64> {
        let stem = file_name
            .strip_prefix(PREFIX)?
            .strip_suffix(self.ext.as_str())?
            .strip_suffix('.')?;
        if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        stem.parse().ok()
    }

    /// Indices in `[1, total]` that have no file.
    pub fn missing_frames(&self, total: u64) -> Vec<FrameIndex> {
        (1..=total)
            .map(FrameIndex)
            .filter(|f| !self.path_for(*f).is_file())
            .collect()
    }

    /// Check that exactly `[1, total]` exists with no gaps and nothing past `total`.
    pub fn verify_contiguous(&self, total: u64) -> RevealResult<()> {
        let missing = self.missing_frames(total);
        if let Some(first) = missing.first() {
            return Err(RevealError::validation(format!(
                "frame sequence in '{}' is incomplete: {} of {total} frames missing (first: {})",
                self.dir.display(),
                missing.len(),
                self.path_for(*first).display()
            )));
        }
        if self.path_for(FrameIndex(total + 1)).exists() {
            return Err(RevealError::validation(format!(
                "frame sequence in '{}' runs past frame {total}",
                self.dir.display()
            )));
        }
        Ok(())
    }

    /// Remove sequence files with an index above `total` left over from longer runs.
    ///
    /// Returns the number of files removed.
    pub fn prune_beyond(&self, total: u64) -> RevealResult<usize> {
        if !self.dir.is_dir() {
            return Ok(0);
        }
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list '{}'", self.dir.display()))?;

        let mut removed = 0;
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to list '{}'", self.dir.display()))?;
            let name = entry.file_name();
            let Some(idx) = name.to_str().and_then(|n| self.parse_index(n)) else {
                continue;
            };
            if idx > total {
                std::fs::remove_file(entry.path())
                    .with_context(|| format!("failed to remove stale frame '{}'", entry.path().display()))?;
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!(removed, total, dir = %self.dir.display(), "pruned stale frames");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/layout.rs"]
mod tests;
