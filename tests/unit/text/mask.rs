use super::*;
use crate::text::fonts::FontSet;

fn line(text: &str, size_px: f32, center_x: f32, top: f32) -> LineSpec<'_> {
    LineSpec {
        text,
        size_px,
        center_x,
        top,
    }
}

#[test]
fn blank_text_has_no_ink() {
    let mask = TextMask::rasterize(&Typeface::Bitmap, line("   ", 40.0, 50.0, 0.0), 100, 60);
    assert!(mask.ink_bounds().is_none());
}

#[test]
fn bitmap_line_is_centered() {
    let mask = TextMask::rasterize(&Typeface::Bitmap, line("HI", 50.0, 100.0, 10.0), 200, 80);
    let ink = mask.ink_bounds().expect("ink");
    let center = (ink.x0 + ink.x1) as f32 / 2.0;
    assert!((center - 100.0).abs() <= 3.0, "center {center}");
    // baseline at top + 0.8em
    assert_eq!(ink.y1, 50);
    assert_eq!(ink.height(), 7 * 5);
}

#[test]
fn text_beyond_canvas_is_clipped_not_panicking() {
    let long = "W".repeat(200);
    let mask = TextMask::rasterize(&Typeface::Bitmap, line(&long, 80.0, 50.0, -30.0), 100, 40);
    let ink = mask.ink_bounds().expect("ink");
    assert!(ink.x1 <= 100 && ink.y1 <= 40);
}

#[test]
fn very_long_bitmap_line_is_clipped_to_the_canvas() {
    let long = "W".repeat(200_000);
    let mask = TextMask::rasterize(&Typeface::Bitmap, line(&long, 50.0, 600.0, 20.0), 1200, 150);
    assert_eq!(mask.alpha.len(), 1200 * 150);
    let ink = mask.ink_bounds().expect("ink");
    // ink reaches both edges, within one glyph advance
    assert!(ink.x0 < 30 && ink.x1 > 1170, "{ink:?}");
}

#[test]
fn stamp_blends_inside_canvas_only() {
    let mask = TextMask::rasterize(&Typeface::Bitmap, line("I", 10.0, 5.0, 0.0), 10, 10);
    let mut canvas = RgbImage::from_pixel(10, 10, image::Rgb([0, 0, 0]));
    mask.stamp(&mut canvas, 100, 100, [255, 0, 0], 255);
    assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));

    mask.stamp(&mut canvas, 0, 0, [255, 0, 0], 255);
    assert!(canvas.pixels().any(|p| p.0 == [255, 0, 0]));
}

#[test]
fn outline_surrounds_fill() {
    let (w, h) = (120u32, 60u32);
    let mask = TextMask::rasterize(&Typeface::Bitmap, line("I", 40.0, 60.0, 10.0), w, h);
    let ink = mask.ink_bounds().unwrap();
    let mut canvas = RgbImage::from_pixel(w, h, image::Rgb([128, 128, 128]));
    mask.draw_outlined(&mut canvas, 3, [0, 0, 0], [255, 255, 255]);

    // glyph pixels are white, pixels just outside the ink box are black
    let cx = (ink.x0 + ink.x1) / 2;
    assert_eq!(canvas.get_pixel(cx, ink.y0).0, [255, 255, 255]);
    assert_eq!(canvas.get_pixel(cx, ink.y0 - 2).0, [0, 0, 0]);
    assert_eq!(canvas.get_pixel(cx, ink.y1 + 2).0, [0, 0, 0]);
    // far away stays untouched
    assert_eq!(canvas.get_pixel(2, 2).0, [128, 128, 128]);
}

#[test]
fn outline_face_renders_ink_when_a_font_is_installed() {
    let fonts = FontSet::discover(&crate::text::fonts::FontCandidates::default());
    let mask = TextMask::rasterize(&fonts.bold, line("HEAR ME OUT", 80.0, 600.0, 20.0), 1200, 150);
    // with or without installed fonts, a non-blank line leaves ink
    let ink = mask.ink_bounds().expect("ink");
    let center = (ink.x0 + ink.x1) as f32 / 2.0;
    assert!((center - 600.0).abs() < 40.0, "center {center}");
}

#[test]
fn escape_xml_handles_markup() {
    assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    assert_eq!(escape_xml("x\u{0007}y"), "xy");
}
