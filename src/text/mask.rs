use image::RgbImage;

use crate::foundation::core::Rgb8;
use crate::foundation::math::{blend_rgb, mul_div255_u8};
use crate::text::bitmap;
use crate::text::fonts::{OutlineFace, Typeface, make_font_resolver};

/// Baseline position relative to the requested top edge, as a fraction of the font size.
const ASCENT_EM: f32 = 0.8;

/// One line of text to rasterize, horizontally centered on `center_x`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineSpec<'a> {
    pub(crate) text: &'a str,
    pub(crate) size_px: f32,
    pub(crate) center_x: f32,
    /// Top of the line box; the baseline sits `0.8 em` below.
    pub(crate) top: f32,
}

/// Canvas-sized 8-bit coverage of a rasterized line.
#[derive(Clone, Debug)]
pub(crate) struct TextMask {
    width: u32,
    alpha: Vec<u8>,
}

/// Inclusive-exclusive pixel bounds of the inked area of a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InkBounds {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl InkBounds {
    pub(crate) fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

impl TextMask {
    fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            alpha: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Rasterize `line` into a `width x height` mask using `face`.
    ///
    /// Outline faces that fail to produce any ink (parse error, missing glyphs) fall back to the
    /// bitmap font, so a non-blank line always leaves a mark.
    pub(crate) fn rasterize(face: &Typeface, line: LineSpec<'_>, width: u32, height: u32) -> Self {
        if line.text.trim().is_empty() || width == 0 || height == 0 {
            return Self::empty(width, height);
        }
        if let Typeface::Outline(outline) = face {
            if let Some(mask) = rasterize_outline(outline, line, width, height) {
                if mask.ink_bounds().is_some() {
                    return mask;
                }
            }
            tracing::debug!(text = line.text, "outline text produced no ink, using bitmap font");
        }
        rasterize_bitmap(line, width, height)
    }

    pub(crate) fn ink_bounds(&self) -> Option<InkBounds> {
        let w = self.width as usize;
        let mut bounds: Option<InkBounds> = None;
        for (i, &a) in self.alpha.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let x = (i % w) as u32;
            let y = (i / w) as u32;
            bounds = Some(match bounds {
                None => InkBounds {
                    x0: x,
                    y0: y,
                    x1: x + 1,
                    y1: y + 1,
                },
                Some(b) => InkBounds {
                    x0: b.x0.min(x),
                    y0: b.y0.min(y),
                    x1: b.x1.max(x + 1),
                    y1: b.y1.max(y + 1),
                },
            });
        }
        bounds
    }

    /// Blend `color` through this mask onto `canvas`, shifted by `(dx, dy)`.
    ///
    /// `opacity` scales the mask coverage. Pixels shifted outside the canvas are dropped.
    pub(crate) fn stamp(&self, canvas: &mut RgbImage, dx: i32, dy: i32, color: Rgb8, opacity: u8) {
        let Some(ink) = self.ink_bounds() else {
            return;
        };
        self.stamp_within(canvas, ink, dx, dy, color, opacity);
    }

    fn stamp_within(
        &self,
        canvas: &mut RgbImage,
        ink: InkBounds,
        dx: i32,
        dy: i32,
        color: Rgb8,
        opacity: u8,
    ) {
        let (cw, ch) = canvas.dimensions();
        for y in ink.y0..ink.y1 {
            let ty = y as i64 + i64::from(dy);
            if ty < 0 || ty >= i64::from(ch) {
                continue;
            }
            let row = (y as usize) * (self.width as usize);
            for x in ink.x0..ink.x1 {
                let a = self.alpha[row + x as usize];
                if a == 0 {
                    continue;
                }
                let tx = x as i64 + i64::from(dx);
                if tx < 0 || tx >= i64::from(cw) {
                    continue;
                }
                let coverage = if opacity == 255 {
                    a
                } else {
                    mul_div255_u8(u16::from(a), u16::from(opacity))
                };
                let px = canvas.get_pixel_mut(tx as u32, ty as u32);
                px.0 = blend_rgb(px.0, color, coverage);
            }
        }
    }

    /// Outline technique: `outline` at every integer offset within `radius`, then `fill` on top.
    pub(crate) fn draw_outlined(&self, canvas: &mut RgbImage, radius: u32, outline: Rgb8, fill: Rgb8) {
        let Some(ink) = self.ink_bounds() else {
            return;
        };
        let r = radius as i32;
        for ox in -r..=r {
            for oy in -r..=r {
                if ox == 0 && oy == 0 {
                    continue;
                }
                self.stamp_within(canvas, ink, ox, oy, outline, 255);
            }
        }
        self.stamp_within(canvas, ink, 0, 0, fill, 255);
    }
}

fn rasterize_outline(
    face: &OutlineFace,
    line: LineSpec<'_>,
    width: u32,
    height: u32,
) -> Option<TextMask> {
    let baseline = line.top + line.size_px * ASCENT_EM;
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" text-anchor="middle" font-family="{family}" font-size="{size}" font-weight="{weight}" fill="#ffffff" xml:space="preserve">{text}</text></svg>"##,
        w = width,
        h = height,
        x = line.center_x,
        y = baseline,
        family = escape_xml(&face.family),
        size = line.size_px,
        weight = face.weight,
        text = escape_xml(line.text),
    );

    let opts = usvg::Options {
        fontdb: face.db.clone(),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = match usvg::Tree::from_data(svg.as_bytes(), &opts) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::debug!(error = %e, "text svg rejected");
            return None;
        }
    };

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    // premultiplied white: alpha is the coverage
    let alpha = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    Some(TextMask {
        width,
        alpha,
    })
}

fn rasterize_bitmap(line: LineSpec<'_>, width: u32, height: u32) -> TextMask {
    let mut mask = TextMask::empty(width, height);
    let scale = bitmap::scale_for(line.size_px);
    let run_width = bitmap::line_width(line.text, scale);
    if run_width == 0 {
        return mask;
    }

    let baseline = (line.top + line.size_px * ASCENT_EM).round() as i64;
    let left = (f64::from(line.center_x) - run_width as f64 / 2.0).round() as i64;
    let top = baseline.saturating_sub(bitmap::line_height(scale) as i64);
    bitmap::draw(line.text, scale, left, top, width, &mut mask.alpha);
    mask
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/mask.rs"]
mod tests;
