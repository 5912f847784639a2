//! Iteration count to RGB.
//!
//! Both mappings return raw, unclamped channel values. Some inputs leave
//! `[0, 255]` (the piecewise mapping gives blue = 256 at `n == iter_max`, the
//! default smooth palette peaks near 392 in red); rasterisation saturates.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::RenderBuffer;
use crate::iteration_field::IterationField;

/// Colors per channel in the piecewise mapping.
const DIGIT_BASE: i64 = 256;

/// An unclamped color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into `[0, 255]`.
    pub fn saturate(self) -> [u8; 3] {
        [
            self.r.clamp(0, 255) as u8,
            self.g.clamp(0, 255) as u8,
            self.b.clamp(0, 255) as u8,
        ]
    }
}

/// `t = n / iter_max` expanded to `[0, 256³]` and split into base-256 digits.
///
/// The most significant digit goes to blue, then red, then green.
pub fn piecewise_linear(n: u32, iter_max: u32) -> Rgb {
    if iter_max == 0 {
        return Rgb::BLACK;
    }
    let t = n as f64 / iter_max as f64;
    let m = (t * (DIGIT_BASE * DIGIT_BASE * DIGIT_BASE) as f64) as i64;
    let b = m / (DIGIT_BASE * DIGIT_BASE);
    let rest = m - b * DIGIT_BASE * DIGIT_BASE;
    let r = rest / DIGIT_BASE;
    let g = rest - r * DIGIT_BASE;
    Rgb::new(r as i32, g as i32, b as i32)
}

/// One channel of a smooth palette:
/// `coefficient · (1-t)^one_minus_t_exp · t^t_exp · (1+t)^one_plus_t_exp · 255`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelPolynomial {
    pub coefficient: f64,
    #[serde(default)]
    pub one_minus_t_exp: i32,
    #[serde(default)]
    pub t_exp: i32,
    #[serde(default)]
    pub one_plus_t_exp: i32,
}

impl ChannelPolynomial {
    pub const fn new(coefficient: f64, one_minus_t_exp: i32, t_exp: i32, one_plus_t_exp: i32) -> Self {
        Self {
            coefficient,
            one_minus_t_exp,
            t_exp,
            one_plus_t_exp,
        }
    }

    /// Channel value at `t`, truncated toward zero.
    pub fn eval(&self, t: f64) -> i32 {
        let v = self.coefficient
            * (1.0 - t).powi(self.one_minus_t_exp)
            * t.powi(self.t_exp)
            * (1.0 + t).powi(self.one_plus_t_exp)
            * 255.0;
        v as i32
    }
}

/// Bernstein-style polynomial palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothPalette {
    pub red: ChannelPolynomial,
    pub green: ChannelPolynomial,
    pub blue: ChannelPolynomial,
}

impl SmoothPalette {
    /// Magenta edges, green mid-range, gold highlights:
    /// `r = 4(1-t²)t`, `g = 15(1-t)²t²`, `b = 8.5(1-t)³t`.
    pub const fn magenta_green_gold() -> Self {
        Self {
            red: ChannelPolynomial::new(4.0, 1, 1, 1),
            green: ChannelPolynomial::new(15.0, 2, 2, 0),
            blue: ChannelPolynomial::new(8.5, 3, 1, 0),
        }
    }

    /// The textbook Bernstein set: `9(1-t)t³`, `15(1-t)²t²`, `8.5(1-t)³t`.
    pub const fn bernstein() -> Self {
        Self {
            red: ChannelPolynomial::new(9.0, 1, 3, 0),
            green: ChannelPolynomial::new(15.0, 2, 2, 0),
            blue: ChannelPolynomial::new(8.5, 3, 1, 0),
        }
    }

    pub fn rgb(&self, n: u32, iter_max: u32) -> Rgb {
        if iter_max == 0 {
            return Rgb::BLACK;
        }
        let t = n as f64 / iter_max as f64;
        Rgb::new(self.red.eval(t), self.green.eval(t), self.blue.eval(t))
    }
}

impl Default for SmoothPalette {
    fn default() -> Self {
        Self::magenta_green_gold()
    }
}

/// Selects how escape counts become colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMapper {
    PiecewiseLinear,
    Smooth { palette: SmoothPalette },
}

impl ColorMapper {
    /// Boolean selection: `true` picks the default smooth palette.
    pub fn from_smooth(smooth: bool) -> Self {
        if smooth {
            Self::Smooth {
                palette: SmoothPalette::default(),
            }
        } else {
            Self::PiecewiseLinear
        }
    }

    pub fn is_smooth(&self) -> bool {
        matches!(self, Self::Smooth { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PiecewiseLinear => "piecewise",
            Self::Smooth { .. } => "smooth",
        }
    }

    pub fn rgb(&self, n: u32, iter_max: u32) -> Rgb {
        match self {
            Self::PiecewiseLinear => piecewise_linear(n, iter_max),
            Self::Smooth { palette } => palette.rgb(n, iter_max),
        }
    }

    /// Color a whole field into an opaque RGBA buffer, saturating channels.
    pub fn colorize(&self, field: &IterationField) -> RenderBuffer {
        let mut pixels = vec![0u8; field.data.len() * 4];
        pixels
            .par_chunks_mut(4)
            .zip(field.data.par_iter())
            .for_each(|(pixel, &n)| {
                let [r, g, b] = self.rgb(n, field.iter_max).saturate();
                pixel.copy_from_slice(&[r, g, b, 255]);
            });
        RenderBuffer {
            width: field.width,
            height: field.height,
            pixels,
        }
    }
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self::from_smooth(true)
    }
}
