//! Linear RGB color and its 8-bit display form.

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Mul};

/// Linear-light RGB color.
///
/// Components are unbounded while shading; only [`Color::to_drawing_color`]
/// clamps, and only from above.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);

    /// Color returned for rays that hit nothing.
    pub const BACKGROUND: Color = Color::BLACK;

    /// Starting value for light accumulation.
    pub const DEFAULT: Color = Color::BLACK;

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(k * self.r, k * self.g, k * self.b)
    }

    /// Convert to an 8-bit display triple.
    ///
    /// Each channel is capped at 1 and then floored after scaling by 255.
    /// Negative channels are not lifted; the float-to-int cast saturates them to 0.
    pub fn to_drawing_color(self) -> Rgb8 {
        Rgb8 {
            r: display_channel(self.r),
            g: display_channel(self.g),
            b: display_channel(self.b),
        }
    }
}

#[inline]
fn legalize(d: f64) -> f64 {
    if d > 1.0 {
        1.0
    } else {
        d
    }
}

#[inline]
fn display_channel(d: f64) -> u8 {
    (legalize(d) * 255.0).floor() as u8
}

impl Add for Color {
    type Output = Color;
    #[inline]
    fn add(self, o: Color) -> Color {
        Color::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, o: Color) {
        *self = *self + o;
    }
}

/// Componentwise product.
impl Mul for Color {
    type Output = Color;
    #[inline]
    fn mul(self, o: Color) -> Color {
        Color::new(self.r * o.r, self.g * o.g, self.b * o.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;
    #[inline]
    fn mul(self, k: f64) -> Color {
        self.scale(k)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;
    #[inline]
    fn mul(self, c: Color) -> Color {
        c.scale(self)
    }
}

/// 8-bit RGB pixel as written to an output surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
