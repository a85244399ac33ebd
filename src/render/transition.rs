use std::time::Duration;

use image::{Rgb, RgbImage, imageops};

use crate::foundation::core::{CANVAS_BG, Rgb8};
use crate::foundation::error::{PartyError, PartyResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::sink::{FrameSink, SinkConfig};

/// Options for [`fade`].
#[derive(Clone, Debug)]
pub struct FadeOpts {
    /// Wall-clock length of the whole transition.
    pub duration: Duration,
    /// Number of blend steps; `steps + 1` frames are emitted.
    pub steps: u32,
    /// Fill for the padding around images smaller than the shared frame.
    pub background: Rgb8,
}

impl Default for FadeOpts {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            steps: 10,
            background: CANVAS_BG,
        }
    }
}

/// Cross-fade from `from` to `to`, pushing every intermediate frame into `sink`.
///
/// With no previous image the target is emitted once at `t = 1.0`; the same happens for
/// `steps = 0`. Otherwise both images are centered on a shared `max(w) x max(h)` frame and
/// `steps + 1` frames with `t = i / steps` are emitted, sleeping `duration / steps` between
/// consecutive frames. Blocks the caller for roughly `duration`.
///
/// Returns the number of frames emitted.
#[tracing::instrument(skip(from, to, opts, sink), fields(steps = opts.steps, has_prev = from.is_some()))]
pub fn fade(
    from: Option<&RgbImage>,
    to: &RgbImage,
    opts: &FadeOpts,
    sink: &mut dyn FrameSink,
) -> PartyResult<u32> {
    let from = match from {
        Some(prev) if opts.steps > 0 => prev,
        _ => {
            sink.begin(SinkConfig {
                width: to.width(),
                height: to.height(),
                frames: 1,
            })?;
            sink.push_frame(0, 1.0, to)?;
            sink.end()?;
            return Ok(1);
        }
    };

    let width = from.width().max(to.width());
    let height = from.height().max(to.height());
    let a = pad_to(from, width, height, opts.background);
    let b = pad_to(to, width, height, opts.background);

    let frames = opts.steps + 1;
    let pause = opts.duration / opts.steps;

    sink.begin(SinkConfig {
        width,
        height,
        frames,
    })?;
    for i in 0..=opts.steps {
        let t = i as f32 / opts.steps as f32;
        let frame = crossfade_rgb(&a, &b, t)?;
        sink.push_frame(i, t, &frame)?;
        if i < opts.steps && !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
    sink.end()?;
    Ok(frames)
}

/// Per-channel linear blend `a * (1 - t) + b * t` with 8-bit weights.
///
/// `t` is clamped to `[0, 1]`; `t = 0` reproduces `a` and `t = 1` reproduces `b` exactly.
pub fn crossfade_rgb(a: &RgbImage, b: &RgbImage, t: f32) -> PartyResult<RgbImage> {
    if a.dimensions() != b.dimensions() {
        return Err(PartyError::validation(format!(
            "crossfade expects equal sizes, got {:?} and {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = RgbImage::new(a.width(), a.height());
    for ((o, pa), pb) in out.pixels_mut().zip(a.pixels()).zip(b.pixels()) {
        for i in 0..3 {
            let av = mul_div255_u8(u16::from(pa[i]), it);
            let bv = mul_div255_u8(u16::from(pb[i]), tt);
            o[i] = av.saturating_add(bv);
        }
    }
    Ok(out)
}

/// Center `image` on a `width x height` frame filled with `background`.
///
/// Images larger than the frame are cropped symmetrically.
pub fn pad_to(image: &RgbImage, width: u32, height: u32, background: Rgb8) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    let mut frame = RgbImage::from_pixel(width, height, Rgb(background));
    let x = (i64::from(width) - i64::from(image.width())) / 2;
    let y = (i64::from(height) - i64::from(image.height())) / 2;
    imageops::replace(&mut frame, image, x, y);
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/render/transition.rs"]
mod tests;
