use anyhow::Context as _;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{RevealError, RevealResult},
    sequence::layout::FrameLayout,
};

/// Pad the sequence to `target_total` frames by copying frame `last_rendered` into every slot in
/// `(last_rendered, target_total]`.
///
/// Copies overwrite, so re-running with the same inputs yields byte-identical files. Frames up to
/// `last_rendered` are never touched. Returns the number of frames written.
#[tracing::instrument(skip(layout), fields(dir = %layout.dir().display()))]
pub fn extend(layout: &FrameLayout, last_rendered: FrameIndex, target_total: u64) -> RevealResult<u64> {
    if last_rendered.0 > target_total {
        return Err(RevealError::validation(format!(
            "cannot extend to {target_total} frames: frame {last_rendered} was already rendered"
        )));
    }

    let source = layout.path_for(last_rendered);
    if !source.is_file() {
        return Err(RevealError::extension(source));
    }

    let mut written = 0;
    for idx in (last_rendered.0 + 1)..=target_total {
        let dest = layout.path_for(FrameIndex(idx));
        std::fs::copy(&source, &dest).with_context(|| {
            format!(
                "failed to copy '{}' to '{}'",
                source.display(),
                dest.display()
            )
        })?;
        written += 1;
    }

    tracing::info!(written, target_total, "extended final frame");
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/extend.rs"]
mod tests;
