use std::ops::{ Add, Sub, Mul, Div };

use crate::feq;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Channels are
/// nominally between 0.0 and 1.0, but they are never clamped while rendering;
/// lights brighter than white and sums of several lights overshoot 1.0. The
/// image writer is responsible for clamping.
///
/// # Examples
///
/// Construct the color red:
///
/// ```
/// # use whitted_tracer::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
/// ```
///
/// Blend two colors:
///
/// ```
/// # use whitted_tracer::color::Color;
/// let blend = Color::average(&Color::green(), &Color::blue());
/// assert_eq!(blend, Color::rgb(0.0, 0.5, 0.5));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple4D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

/// Conversion from an `[r, g, b]` array, as found in scene descriptions.
impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color { r: v[0], g: v[1], b: v[2] }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// The color red.
    pub fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    /// The color green.
    pub fn green() -> Color {
        Color::rgb(0.0, 1.0, 0.0)
    }

    /// The color blue.
    pub fn blue() -> Color {
        Color::rgb(0.0, 0.0, 1.0)
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// This is provided as an associated function of `Color` to prevent
    /// possible confusion with the `*` operator.
    ///
    /// The hadamard product multiplies each component of the two colors, and
    /// yields a new color containing those products. This is how a surface
    /// color is filtered by the color of the light falling on it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted_tracer::color::Color;
    /// let yellow = Color::rgb(1.0, 1.0, 0.0);
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let product = Color::hadamard(&yellow, &purple);
    /// assert_eq!(product, Color::red());
    /// ```
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color::rgb(c1.r * c2.r, c1.g * c2.g, c1.b * c2.b)
    }

    /// Averages two colors, channel by channel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted_tracer::color::Color;
    /// let cyan = Color::rgb(0.0, 1.0, 1.0);
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let avg = Color::average(&cyan, &purple);
    /// assert_eq!(avg, Color::rgb(0.5, 0.5, 1.0));
    /// ```
    pub fn average(c1: &Color, c2: &Color) -> Color {
        (*c1 + *c2) / 2.0
    }
}

/// Channel-wise operator between two colors.
macro_rules! channelwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<Color> for Color {
            type Output = Color;

            fn $method(self, other: Color) -> Color {
                Color::rgb(self.r $op other.r, self.g $op other.g, self.b $op other.b)
            }
        }
    };
}

/// Operator between a color and a scalar applied to every channel.
macro_rules! scalar {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Color {
            type Output = Color;

            fn $method(self, k: f64) -> Color {
                Color::rgb(self.r $op k, self.g $op k, self.b $op k)
            }
        }
    };
}

channelwise!(Add, add, +);
channelwise!(Sub, sub, -);
scalar!(Mul, mul, *);
scalar!(Div, div, /);

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `Color::hadamard(&c1, &c2)`.
///
/// # Examples
///
/// ```
/// # use whitted_tracer::color::Color;
/// let c1 = Color::red();
/// let c2 = Color::blue();
/// assert_eq!(c1 * c2, Color::hadamard(&c1, &c2));
/// ```
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color { r: 1.6, g: 0.7, b: 1.0 });
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color { r: 0.2, g: 0.5, b: 0.5 });
}

#[test]
fn multiply_color_by_scalar() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c1 * 2.0, Color { r: 0.4, g: 0.6, b: 0.8 });
    assert_eq!(2.0 * c1, Color { r: 0.4, g: 0.6, b: 0.8 });
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn divide_color() {
    let c = Color::rgb(2.0, 1.0, 0.5);

    assert_eq!(c / 4.0, Color::rgb(0.5, 0.25, 0.125));
}

#[test]
fn color_from_array() {
    let c: Color = [0.1, 0.2, 0.3].into();

    assert_eq!(c, Color::rgb(0.1, 0.2, 0.3));
}
