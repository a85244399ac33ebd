use super::*;

fn render(text: &str, scale: u32) -> (u32, Vec<u8>) {
    let w = line_width(text, scale) as u32;
    let h = line_height(scale) as u32;
    let mut coverage = vec![0u8; (w * h) as usize];
    draw(text, scale, 0, 0, w, &mut coverage);
    (w, coverage)
}

#[test]
fn scale_tracks_font_size() {
    assert_eq!(scale_for(80.0), 8);
    assert_eq!(scale_for(50.0), 5);
    assert_eq!(scale_for(1.0), 1);
    assert_eq!(scale_for(f32::NAN), 1);
    assert_eq!(scale_for(-3.0), 1);
}

#[test]
fn run_dimensions_follow_advance() {
    assert_eq!(line_width("AB", 2), (2 * 6 - 1) * 2);
    assert_eq!(line_height(2), 7 * 2);
    assert_eq!(line_width("", 3), 0);
}

#[test]
fn huge_lines_measure_without_overflow() {
    let long = "W".repeat(2_000_000);
    let w = line_width(&long, 1000);
    assert_eq!(w, (2_000_000 * 6 - 1) * 1000);
    assert!(w > u64::from(u32::MAX));
}

#[test]
fn space_is_blank_and_letters_ink() {
    let (_, blank) = render(" ", 1);
    assert!(blank.iter().all(|&c| c == 0));

    let (_, ink) = render("H", 1);
    // top-left and top-right pixels of 'H'
    assert_eq!(ink[0], 255);
    assert_eq!(ink[4], 255);
    assert_eq!(ink[2], 0);
}

#[test]
fn lowercase_and_accents_fold() {
    assert_eq!(render("a", 1), render("A", 1));
    assert_eq!(render("ã", 1), render("A", 1));
    assert_eq!(render("É", 1), render("E", 1));
}

#[test]
fn unknown_glyph_is_a_box() {
    let (_, coverage) = render("🎉", 1);
    let filled = coverage.iter().filter(|&&c| c == 255).count();
    // perimeter of a 5x7 box
    assert_eq!(filled, 5 * 2 + 5 * 2);
}

#[test]
fn draw_clips_to_the_buffer() {
    // first 'H' shifted three columns left and one row up
    let mut coverage = vec![0u8; 4 * 7];
    draw("HH", 1, -3, -1, 4, &mut coverage);
    // x = 0 is column 3 of the first 'H', inked only on the bar row
    assert_eq!(coverage[0], 0);
    assert_eq!(coverage[2 * 4], 255);
    // col 4 of the first 'H' is its right stem
    assert_eq!(coverage[1], 255);
    // second 'H' starts at x = 3
    assert_eq!(coverage[3], 255);
    // the last buffer row lies below the shifted glyph
    assert_eq!(coverage[6 * 4 + 1], 0);
}
