//! Drawing surface abstraction. The layout code only issues primitive
//! draw commands; a backend turns them into pixels or markup.

/// 0xAARRGGBB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// `#rrggbb`, alpha dropped.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn opacity(self) -> f64 {
        self.alpha() as f64 / 255.0
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        let (r, g, b) = self.rgb();
        image::Rgba([r, g, b, self.alpha()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
}

impl Paint {
    pub const fn fill(color: u32) -> Self {
        Self {
            color: Color(color),
            style: PaintStyle::Fill,
        }
    }

    pub const fn stroke(color: u32, width: f64) -> Self {
        Self {
            color: Color(color),
            style: PaintStyle::Stroke { width },
        }
    }

    /// Width used when the paint draws a line.
    pub fn line_width(&self) -> f64 {
        match self.style {
            PaintStyle::Stroke { width } => width,
            PaintStyle::Fill => 1.0,
        }
    }
}

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

pub type Point = (f64, f64);

pub trait Canvas {
    fn rect(&mut self, left: f64, top: f64, right: f64, bottom: f64, paint: &Paint);

    fn round_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64, radius: f64, paint: &Paint);

    fn line(&mut self, from: Point, to: Point, paint: &Paint);

    /// Line drawn as alternating `dash`-long segments and gaps.
    fn dashed_line(&mut self, from: Point, to: Point, dash: f64, paint: &Paint);

    /// Closed polygon through `points`.
    fn polygon(&mut self, points: &[Point], paint: &Paint);

    /// Text with its baseline at `y`.
    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: TextAnchor, paint: &Paint);
}
