use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbImage;

use crate::foundation::error::FlyResult;

/// Host display contract: present one fully composited canvas-sized frame.
pub trait DisplaySink: Send {
    fn present(&mut self, frame: &RgbImage) -> FlyResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) frames: Vec<RgbImage>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in presentation order.
    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    pub fn last(&self) -> Option<&RgbImage> {
        self.frames.last()
    }
}

impl DisplaySink for InMemorySink {
    fn present(&mut self, frame: &RgbImage) -> FlyResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Writes every presented frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    next: u64,
}

impl PngSequenceSink {
    pub fn create(dir: impl Into<PathBuf>) -> FlyResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self { dir, next: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.next
    }

    fn path_for(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("frame_{idx:05}.png"))
    }
}

impl DisplaySink for PngSequenceSink {
    fn present(&mut self, frame: &RgbImage) -> FlyResult<()> {
        let path = self.path_for(self.next);
        frame
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        self.next += 1;
        Ok(())
    }
}
