use std::path::PathBuf;
use std::sync::Arc;

use image::RgbImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{FlyError, FlyResult};
use crate::frames::decode::decode_animation;
use crate::frames::synth::{SynthParams, synthesize};

/// One base image of the celebration loop.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrame {
    pub image: RgbImage,
    pub duration_secs: f64,
}

/// Fixed-length cyclic frame loop. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Vec<AnimationFrame>,
}

impl FrameSequence {
    pub fn new(frames: Vec<AnimationFrame>) -> FlyResult<Self> {
        if frames.is_empty() {
            return Err(FlyError::asset("animation has no frames"));
        }
        Ok(Self { frames })
    }

    pub(crate) fn from_nonempty(frames: Vec<AnimationFrame>) -> Self {
        debug_assert!(!frames.is_empty());
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index` modulo the loop length.
    pub fn get(&self, index: usize) -> &AnimationFrame {
        &self.frames[index % self.frames.len()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnimationFrame> {
        self.frames.iter()
    }
}

/// Where the base frames came from.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameSet {
    Decoded(FrameSequence),
    Synthesized(FrameSequence),
}

impl FrameSet {
    pub fn frames(&self) -> &FrameSequence {
        match self {
            Self::Decoded(seq) | Self::Synthesized(seq) => seq,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

/// Bundled animation asset.
#[derive(Clone, Debug, Default)]
pub enum AnimationAsset {
    /// Always synthesize.
    #[default]
    None,
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// Builds the celebration loop for one canvas.
///
/// The asset strategy is fixed at construction; [`FrameSource::build`] decodes
/// it and falls back to the synthesized flag on any asset failure, so it
/// always returns a usable sequence.
#[derive(Clone, Debug)]
pub struct FrameSource {
    asset: AnimationAsset,
    canvas: Canvas,
}

impl FrameSource {
    pub fn new(asset: AnimationAsset, canvas: Canvas) -> Self {
        Self { asset, canvas }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn asset(&self) -> &AnimationAsset {
        &self.asset
    }

    pub fn build(&self, params: &SynthParams<'_>) -> FrameSet {
        match self.decode() {
            Ok(seq) => {
                tracing::info!(
                    frames = seq.len(),
                    width = self.canvas.width,
                    height = self.canvas.height,
                    "loaded animation asset"
                );
                FrameSet::Decoded(seq)
            }
            Err(e) => {
                if matches!(self.asset, AnimationAsset::None) {
                    tracing::debug!("no animation asset configured, synthesizing flag");
                } else {
                    tracing::warn!(error = %e, "animation asset unusable, synthesizing flag");
                }
                FrameSet::Synthesized(synthesize(self.canvas, params))
            }
        }
    }

    fn decode(&self) -> FlyResult<FrameSequence> {
        match &self.asset {
            AnimationAsset::None => Err(FlyError::asset("no animation asset")),
            AnimationAsset::Path(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    FlyError::asset(format!("read '{}': {e}", path.display()))
                })?;
                decode_animation(&bytes, self.canvas)
            }
            AnimationAsset::Bytes(bytes) => decode_animation(bytes, self.canvas),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/sequence.rs"]
mod tests;
