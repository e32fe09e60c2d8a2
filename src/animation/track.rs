use std::collections::BTreeMap;

use crate::{
    animation::value::{Lerp, ParamPath, Target, Value, ValueKind},
    foundation::core::FrameIndex,
    foundation::error::{RevealError, RevealResult},
    scene::model::SceneModel,
};

/// One `(frame, value)` sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Frame the sample is pinned to.
    pub frame: FrameIndex,
    /// Sampled value.
    pub value: Value,
}

/// Linearly interpolated samples for one `(target, parameter)` pair.
///
/// Invariant: `keys` is sorted by frame with no duplicate frames, and every value has `kind`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct KeyframeTrack {
    target: Target,
    path: ParamPath,
    kind: ValueKind,
    keys: Vec<Keyframe>,
}

impl KeyframeTrack {
    /// Create an empty track for `path` on `target`.
    pub fn new(target: Target, path: ParamPath) -> Self {
        let kind = path.kind();
        Self {
            target,
            path,
            kind,
            keys: Vec::new(),
        }
    }

    /// Animated entity.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Animated parameter.
    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    /// Samples sorted by frame.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Insert a sample, keeping frame order. A sample at an existing frame is replaced.
    pub fn insert(&mut self, frame: FrameIndex, value: Value) -> RevealResult<()> {
        if value.kind() != self.kind {
            return Err(RevealError::animation(format!(
                "parameter '{}' expects a {:?} value, got {:?}",
                self.path,
                self.kind,
                value.kind()
            )));
        }

        match self.keys.binary_search_by_key(&frame, |k| k.frame) {
            Ok(i) => self.keys[i].value = value,
            Err(i) => self.keys.insert(i, Keyframe { frame, value }),
        }
        Ok(())
    }

    /// Sample the track at `frame`, clamping outside the keyed span.
    ///
    /// Returns `None` only when the track holds no samples.
    pub fn sample(&self, frame: FrameIndex) -> Option<Value> {
        let first = self.keys.first()?;
        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return Some(first.value);
        }
        if idx >= self.keys.len() {
            return Some(self.keys[self.keys.len() - 1].value);
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        if a.frame.0 == f {
            return Some(a.value);
        }

        let t = ((f - a.frame.0) as f64) / ((b.frame.0 - a.frame.0) as f64);
        Some(Value::lerp(&a.value, &b.value, t))
    }
}

/// All keyframe tracks of a scene, keyed by `(target, parameter)`.
///
/// Built during scene construction and read-only while rendering.
#[derive(Clone, Debug, Default)]
pub struct TrackStore {
    tracks: BTreeMap<(Target, ParamPath), KeyframeTrack>,
}

impl TrackStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. The parameter must exist on `target` in `scene`.
    pub fn set_keyframe(
        &mut self,
        scene: &SceneModel,
        target: Target,
        path: ParamPath,
        frame: u64,
        value: impl Into<Value>,
    ) -> RevealResult<()> {
        let value = value.into();
        scene.static_value(target, &path).map_err(|e| {
            RevealError::animation(format!(
                "cannot keyframe '{path}' on {target:?}: {e}"
            ))
        })?;

        self.tracks
            .entry((target, path.clone()))
            .or_insert_with(|| KeyframeTrack::new(target, path))
            .insert(FrameIndex(frame), value)
    }

    /// Value of `path` on `target` at `frame`, falling back to the static scene value.
    pub fn evaluate(
        &self,
        scene: &SceneModel,
        target: Target,
        path: &ParamPath,
        frame: FrameIndex,
    ) -> RevealResult<Value> {
        if let Some(v) = self
            .tracks
            .get(&(target, path.clone()))
            .and_then(|t| t.sample(frame))
        {
            return Ok(v);
        }
        scene.static_value(target, path)
    }

    /// Track for `(target, path)`, if one was recorded.
    pub fn track(&self, target: Target, path: &ParamPath) -> Option<&KeyframeTrack> {
        self.tracks.get(&(target, path.clone()))
    }

    /// Iterate tracks in stable `(target, parameter)` order.
    pub fn tracks(&self) -> impl Iterator<Item = &KeyframeTrack> {
        self.tracks.values()
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Return `true` when no parameter is animated.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Last keyed frame over all tracks.
    pub fn last_keyed_frame(&self) -> Option<FrameIndex> {
        self.tracks
            .values()
            .filter_map(|t| t.keys().last().map(|k| k.frame))
            .max()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
