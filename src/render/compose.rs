use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use crate::foundation::core::{ACCENT, BLACK, CANVAS_BG, Canvas, Placement, Rgb8, WHITE};
use crate::foundation::math::blend_rgb;
use crate::text::fonts::FontSet;
use crate::text::mask::{LineSpec, TextMask};

/// Title drawn on every meme.
pub const DEFAULT_TITLE: &str = "HEAR ME OUT";

/// Layout and styling for [`compose`]. Defaults match the 1200x675 reference layout.
#[derive(Clone, Debug)]
pub struct ComposeOpts {
    /// Output size.
    pub canvas: Canvas,
    /// Canvas fill, also used to flatten transparent sources.
    pub background: Rgb8,
    /// Height of the reserved text band at the top.
    pub text_band: u32,
    /// Title size in pixels.
    pub title_px: f32,
    /// Top of the title line.
    pub title_top: f32,
    /// Title outline radius.
    pub title_outline: u32,
    /// Title foreground.
    pub title_fill: Rgb8,
    /// Caption size in pixels.
    pub caption_px: f32,
    /// Top of the caption line.
    pub caption_top: f32,
    /// Caption outline radius.
    pub caption_outline: u32,
    /// Caption foreground.
    pub caption_fill: Rgb8,
    /// Outline color for both lines.
    pub outline: Rgb8,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::REFERENCE,
            background: CANVAS_BG,
            text_band: 150,
            title_px: 80.0,
            title_top: 20.0,
            title_outline: 5,
            title_fill: WHITE,
            caption_px: 50.0,
            caption_top: 110.0,
            caption_outline: 3,
            caption_fill: ACCENT,
            outline: BLACK,
        }
    }
}

impl ComposeOpts {
    /// Image area below the text band.
    pub fn viewport(&self) -> Placement {
        let band = self.text_band.min(self.canvas.height);
        Placement {
            x: 0,
            y: band,
            width: self.canvas.width,
            height: self.canvas.height - band,
        }
    }
}

/// Aspect-preserving fit of a `src_w x src_h` image, centered inside `viewport`.
///
/// The scale factor is `min(vw / w, vh / h)`, so the result never crops or distorts and never
/// leaves the viewport. Returns `None` when either side has zero area.
pub fn fit_within(src_w: u32, src_h: u32, viewport: Placement) -> Option<Placement> {
    if src_w == 0 || src_h == 0 || viewport.width == 0 || viewport.height == 0 {
        return None;
    }
    let scale = (f64::from(viewport.width) / f64::from(src_w))
        .min(f64::from(viewport.height) / f64::from(src_h));

    let width = ((f64::from(src_w) * scale) as u32).clamp(1, viewport.width);
    let height = ((f64::from(src_h) * scale) as u32).clamp(1, viewport.height);

    Some(Placement {
        x: viewport.x + (viewport.width - width) / 2,
        y: viewport.y + (viewport.height - height) / 2,
        width,
        height,
    })
}

/// Lay `image` out beneath an outlined `title` and accent-colored `caption`.
///
/// Output dimensions always equal `opts.canvas`. An empty caption skips the caption pass.
#[tracing::instrument(skip(image, fonts, opts), fields(src_w = image.width(), src_h = image.height()))]
pub fn compose(
    image: &DynamicImage,
    title: &str,
    caption: &str,
    fonts: &FontSet,
    opts: &ComposeOpts,
) -> RgbImage {
    let Canvas { width, height } = opts.canvas;
    let mut canvas = RgbImage::from_pixel(width, height, Rgb(opts.background));

    match fit_within(image.width(), image.height(), opts.viewport()) {
        Some(place) => {
            let scaled = image.resize_exact(place.width, place.height, FilterType::Lanczos3);
            let flat = flatten_onto(&scaled, opts.background);
            imageops::replace(&mut canvas, &flat, i64::from(place.x), i64::from(place.y));
        }
        None => tracing::debug!("degenerate source or viewport, skipping paste"),
    }

    let center_x = width as f32 / 2.0;
    let title_mask = TextMask::rasterize(
        &fonts.bold,
        LineSpec {
            text: title,
            size_px: opts.title_px,
            center_x,
            top: opts.title_top,
        },
        width,
        height,
    );
    title_mask.draw_outlined(&mut canvas, opts.title_outline, opts.outline, opts.title_fill);

    if !caption.is_empty() {
        let caption_mask = TextMask::rasterize(
            &fonts.bold,
            LineSpec {
                text: caption,
                size_px: opts.caption_px,
                center_x,
                top: opts.caption_top,
            },
            width,
            height,
        );
        caption_mask.draw_outlined(
            &mut canvas,
            opts.caption_outline,
            opts.outline,
            opts.caption_fill,
        );
    }

    canvas
}

/// Alpha-composite onto a solid `background` and drop the alpha channel.
pub(crate) fn flatten_onto(image: &DynamicImage, background: Rgb8) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let p = rgba.get_pixel(x, y).0;
        Rgb(blend_rgb(background, [p[0], p[1], p[2]], p[3]))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
