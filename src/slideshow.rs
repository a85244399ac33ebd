//! Slideshow navigation and playback over the stored collection.

use image::RgbImage;

use crate::foundation::error::PartyResult;
use crate::render::sink::FrameSink;
use crate::render::transition::{FadeOpts, fade};
use crate::store::entry::Entry;

/// Position within a collection of `len` slides.
///
/// Navigation saturates at both ends. An empty collection has no current slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlideCursor {
    index: usize,
    len: usize,
}

impl SlideCursor {
    /// Cursor on the first of `len` slides.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Zero-based index of the current slide.
    pub fn index(self) -> usize {
        self.index
    }

    /// Number of slides.
    pub fn len(self) -> usize {
        self.len
    }

    /// `true` when there are no slides.
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Move to the first slide.
    pub fn first(self) -> Self {
        Self { index: 0, ..self }
    }

    /// Previous slide, staying on the first.
    pub fn prev(self) -> Self {
        Self {
            index: self.index.saturating_sub(1),
            ..self
        }
    }

    /// Next slide, staying on the last.
    pub fn next(self) -> Self {
        self.jump(self.index.saturating_add(1))
    }

    /// Move to the last slide.
    pub fn last(self) -> Self {
        Self {
            index: self.len.saturating_sub(1),
            ..self
        }
    }

    /// Move to `index`, clamped to the last slide.
    pub fn jump(self, index: usize) -> Self {
        Self {
            index: index.min(self.len.saturating_sub(1)),
            ..self
        }
    }

    /// Same position after the collection was reloaded with `len` slides.
    pub fn resized(self, len: usize) -> Self {
        Self { len, ..self }.jump(self.index)
    }

    /// 1-based label, e.g. `"Slide 2 / 5"`.
    pub fn position(self) -> String {
        if self.is_empty() {
            return "Slide 0 / 0".to_string();
        }
        format!("Slide {} / {}", self.index + 1, self.len)
    }

    /// Entry under the cursor, `None` when empty or out of range.
    pub fn current(self, entries: &[Entry]) -> Option<&Entry> {
        if self.is_empty() {
            return None;
        }
        entries.get(self.index)
    }
}

/// Fade through `entries` in order, each transition starting from the previous slide.
///
/// Entries whose image cannot be decoded are skipped. Returns the total number of frames pushed.
#[tracing::instrument(skip(entries, opts, sink), fields(slides = entries.len()))]
pub fn play(entries: &[Entry], opts: &FadeOpts, sink: &mut dyn FrameSink) -> PartyResult<u32> {
    let mut prev: Option<RgbImage> = None;
    let mut frames = 0;
    for entry in entries {
        let image = match entry.load_image() {
            Ok(img) => img.to_rgb8(),
            Err(e) => {
                tracing::warn!(id = entry.id.as_str(), error = %e, "slide skipped");
                continue;
            }
        };
        frames += fade(prev.as_ref(), &image, opts, sink)?;
        prev = Some(image);
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../tests/unit/slideshow.rs"]
mod tests;
