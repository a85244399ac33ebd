use image::{Rgb, RgbImage};

use crate::foundation::core::{BLACK, Canvas, Rgb8, WHITE};
use crate::foundation::math::lerp_channel;
use crate::text::fonts::{FontSet, Typeface};
use crate::text::mask::{LineSpec, TextMask};

/// Options for [`render_placeholder`].
#[derive(Clone, Debug)]
pub struct PlaceholderOpts {
    /// Output size.
    pub canvas: Canvas,
    /// Gradient color at the first scanline.
    pub top_color: Rgb8,
    /// Gradient color approached at the last scanline.
    pub bottom_color: Rgb8,
    /// Caption size in pixels (bold face).
    pub caption_px: f32,
    /// Fixed secondary line drawn beneath the caption.
    pub subtitle: String,
    /// Secondary line size in pixels (regular face).
    pub subtitle_px: f32,
}

impl Default for PlaceholderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::REFERENCE,
            top_color: [102, 126, 234],
            bottom_color: [255, 75, 75],
            caption_px: 70.0,
            subtitle: "Imagem não encontrada".to_string(),
            subtitle_px: 40.0,
        }
    }
}

const CAPTION_LIFT: i64 = 30;
const SUBTITLE_GAP: i64 = 20;
const SHADOW_OPACITY: u8 = 180;
const SUBTITLE_OPACITY: u8 = 200;

/// Synthesize a stand-in image: vertical gradient plus centered caption and "not found" line.
///
/// Pure and infallible. Each line gets an offset dark shadow pass before the light foreground
/// pass so it stays legible anywhere on the gradient.
pub fn render_placeholder(caption: &str, fonts: &FontSet, opts: &PlaceholderOpts) -> RgbImage {
    let Canvas { width, height } = opts.canvas;
    let mut img = gradient(width, height, opts.top_color, opts.bottom_color);
    if width == 0 || height == 0 {
        return img;
    }

    let center_x = width as f32 / 2.0;
    let caption_mask = line_mask(&fonts.bold, caption, opts.caption_px, center_x, width, height);
    let subtitle_mask = line_mask(
        &fonts.regular,
        &opts.subtitle,
        opts.subtitle_px,
        center_x,
        width,
        height,
    );

    let caption_h = caption_mask
        .ink_bounds()
        .map(|b| i64::from(b.height()))
        .unwrap_or(0);
    let caption_top = (i64::from(height) - caption_h) / 2 - CAPTION_LIFT;

    if let Some(ink) = caption_mask.ink_bounds() {
        let dy = (caption_top - i64::from(ink.y0)) as i32;
        caption_mask.stamp(&mut img, 4, dy + 4, BLACK, SHADOW_OPACITY);
        caption_mask.stamp(&mut img, 0, dy, WHITE, 255);
    }

    if let Some(ink) = subtitle_mask.ink_bounds() {
        let sub_top = caption_top + caption_h + SUBTITLE_GAP;
        let dy = (sub_top - i64::from(ink.y0)) as i32;
        subtitle_mask.stamp(&mut img, 2, dy + 2, BLACK, SHADOW_OPACITY);
        subtitle_mask.stamp(&mut img, 0, dy, WHITE, SUBTITLE_OPACITY);
    }

    img
}

/// Rasterize one line far enough from the top edge that accents above the ascent keep their ink.
///
/// Callers re-anchor the mask by its ink bounds, so the exact top only has to leave room.
fn line_mask(
    face: &Typeface,
    text: &str,
    size_px: f32,
    center_x: f32,
    width: u32,
    height: u32,
) -> TextMask {
    let line = LineSpec {
        text,
        size_px,
        center_x,
        top: size_px,
    };
    TextMask::rasterize(face, line, width, height)
}

/// Vertical linear gradient, one color per scanline.
pub(crate) fn gradient(width: u32, height: u32, top: Rgb8, bottom: Rgb8) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        let c = Rgb([
            lerp_channel(top[0], bottom[0], y, height),
            lerp_channel(top[1], bottom[1], y, height),
            lerp_channel(top[2], bottom[2], y, height),
        ]);
        for x in 0..width {
            img.put_pixel(x, y, c);
        }
    }
    img
}

#[cfg(test)]
#[path = "../../tests/unit/render/placeholder.rs"]
mod tests;
