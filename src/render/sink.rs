use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{ImageFormat, RgbImage};

use crate::foundation::error::PartyResult;

/// Configuration provided to a [`FrameSink`] before a transition starts emitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will follow.
    pub frames: u32,
}

/// Consumer of transition frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing `idx` (starting at 0) and
/// non-decreasing blend factor `t` between one `begin` and its `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PartyResult<()>;
    /// Push one frame; `t` is the blend factor toward the target image.
    fn push_frame(&mut self, idx: u32, t: f32, frame: &RgbImage) -> PartyResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PartyResult<()>;
}

/// One frame captured by [`InMemorySink`].
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Position within the transition.
    pub idx: u32,
    /// Blend factor toward the target.
    pub t: f32,
    /// Pixels as emitted.
    pub image: RgbImage,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    pub(crate) frames: Vec<CapturedFrame>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Blend factors of the captured frames, in emission order.
    pub fn factors(&self) -> Vec<f32> {
        self.frames.iter().map(|f| f.t).collect()
    }

    /// `true` once `end` has been called for the current run.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PartyResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, t: f32, frame: &RgbImage) -> PartyResult<()> {
        self.frames.push(CapturedFrame {
            idx,
            t,
            image: frame.clone(),
        });
        Ok(())
    }

    fn end(&mut self) -> PartyResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every frame as a numbered PNG into a directory.
///
/// Numbering continues across runs, so several transitions can share one sink and produce a
/// single ordered sequence (`frame_00000.png`, `frame_00001.png`, ...).
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    prefix: String,
    next: u64,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    /// Sink writing into `dir` (created on `begin`) with the default `frame` prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_string(),
            next: 0,
            written: Vec::new(),
        }
    }

    /// Replace the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> PartyResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory {}", self.dir.display()))?;
        Ok(())
    }

    fn push_frame(&mut self, _idx: u32, _t: f32, frame: &RgbImage) -> PartyResult<()> {
        let path = self
            .dir
            .join(format!("{}_{:05}.png", self.prefix, self.next));
        frame
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("write frame {}", path.display()))?;
        self.next += 1;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PartyResult<()> {
        tracing::debug!(dir = %self.dir.display(), total = self.next, "png frames flushed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
