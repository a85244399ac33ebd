pub use kurbo::Rect;

/// Straight (non-premultiplied) RGB8 color.
pub type Rgb8 = [u8; 3];

/// Canvas background shared by the compositor and the slideshow.
pub const CANVAS_BG: Rgb8 = [26, 26, 26];
/// Caption accent color.
pub const ACCENT: Rgb8 = [255, 75, 75];
/// Outline / shadow color.
pub const BLACK: Rgb8 = [0, 0, 0];
/// Foreground text color.
pub const WHITE: Rgb8 = [255, 255, 255];

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reference meme resolution (16:9).
    pub const REFERENCE: Canvas = Canvas {
        width: 1200,
        height: 675,
    };
}

impl Default for Canvas {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Integer placement of a scaled image inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Left edge in canvas pixels.
    pub x: u32,
    /// Top edge in canvas pixels.
    pub y: u32,
    /// Scaled width.
    pub width: u32,
    /// Scaled height.
    pub height: u32,
}

impl Placement {
    /// The placed region as a [`Rect`].
    pub fn rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }

    /// Return `true` when the placed region lies entirely inside `outer`.
    pub fn is_within(self, outer: Rect) -> bool {
        let r = self.rect();
        r.x0 >= outer.x0 && r.y0 >= outer.y0 && r.x1 <= outer.x1 && r.y1 <= outer.y1
    }
}
