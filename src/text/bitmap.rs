//! Built-in 5x7 bitmap font, the last link of the font chain.
//!
//! Coverage is binary and glyphs are scaled by an integer factor, so text rendered with it is
//! blocky but always legible. Lowercase maps to uppercase, common Latin accents fold to their
//! base letter and anything else renders as a hollow box.

pub(crate) const GLYPH_COLS: u32 = 5;
pub(crate) const GLYPH_ROWS: u32 = 7;
/// Horizontal advance in glyph cells (one column of spacing).
const ADVANCE_COLS: u32 = GLYPH_COLS + 1;

const BOX: [u8; 7] = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn glyph(ch: char) -> [u8; 7] {
    match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '\'' => [0b01100, 0b00100, 0b01000, 0, 0, 0, 0],
        '"' => [0b01010, 0b01010, 0b01010, 0, 0, 0, 0],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        '/' => [0, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '*' => [0, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0],
        _ => BOX,
    }
}

fn fold(ch: char) -> char {
    let upper = ch.to_uppercase().next().unwrap_or(ch);
    match upper {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ñ' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        other => other,
    }
}

/// Integer scale that makes a glyph roughly `size_px` tall (cap height ~ 0.7 em).
pub(crate) fn scale_for(size_px: f32) -> u32 {
    if !size_px.is_finite() || size_px <= 0.0 {
        return 1;
    }
    ((size_px * 0.7 / GLYPH_ROWS as f32).round() as u32).max(1)
}

/// Pixel width of `text` set at `scale`.
pub(crate) fn line_width(text: &str, scale: u32) -> u64 {
    let n = text.chars().filter(|c| !c.is_control()).count() as u64;
    if n == 0 {
        return 0;
    }
    (n * u64::from(ADVANCE_COLS) - 1) * u64::from(scale.max(1))
}

/// Pixel height of a line set at `scale`.
pub(crate) fn line_height(scale: u32) -> u64 {
    u64::from(GLYPH_ROWS) * u64::from(scale.max(1))
}

/// Draw `text` with its top-left corner at `(left, top)` into a row-major coverage buffer that is
/// `width` pixels wide.
///
/// Only glyphs that overlap the buffer are touched; the walk stops at the first glyph past the
/// right edge.
pub(crate) fn draw(text: &str, scale: u32, left: i64, top: i64, width: u32, coverage: &mut [u8]) {
    if width == 0 {
        return;
    }
    let w = i64::from(width);
    let h = (coverage.len() / width as usize) as i64;
    let s = i64::from(scale.max(1));
    let advance = i64::from(ADVANCE_COLS) * s;
    let glyph_w = i64::from(GLYPH_COLS) * s;

    let chars = text.chars().filter(|c| !c.is_control()).map(fold);
    for (i, ch) in chars.enumerate() {
        let origin_x = left.saturating_add((i as i64).saturating_mul(advance));
        if origin_x >= w {
            break;
        }
        if origin_x + glyph_w <= 0 {
            continue;
        }
        for (row, bits) in glyph(ch).into_iter().enumerate() {
            let y0 = (top + row as i64 * s).max(0);
            let y1 = (top + (row as i64 + 1) * s).min(h);
            if y0 >= y1 {
                continue;
            }
            for col in 0..GLYPH_COLS {
                if bits & (1u8 << (GLYPH_COLS - 1 - col)) == 0 {
                    continue;
                }
                let x0 = (origin_x + i64::from(col) * s).max(0);
                let x1 = (origin_x + i64::from(col + 1) * s).min(w);
                for y in y0..y1 {
                    let base = (y * w) as usize;
                    for x in x0..x1 {
                        coverage[base + x as usize] = 255;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/bitmap.rs"]
mod tests;
