use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Per-pixel update `z_{n+1} = f(z_n, c)`.
///
/// The escape-time engine is generic over this trait, so callers pass the
/// formula explicitly and the compiler can inline it into the hot loop. Any
/// `Fn(Complex, Complex) -> Complex + Sync` closure qualifies.
pub trait UpdateFn: Sync {
    fn apply(&self, z: Complex, c: Complex) -> Complex;
}

impl<F> UpdateFn for F
where
    F: Fn(Complex, Complex) -> Complex + Sync,
{
    #[inline]
    fn apply(&self, z: Complex, c: Complex) -> Complex {
        self(z, c)
    }
}

/// `z² + c`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mandelbrot;

impl UpdateFn for Mandelbrot {
    #[inline]
    fn apply(&self, z: Complex, c: Complex) -> Complex {
        z.square() + c
    }
}

/// `k·z² + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledMandelbrot {
    pub k: Complex,
}

impl ScaledMandelbrot {
    /// `k = cos(45) + i·cos(30)` (radians), a skewed variant of the set.
    pub fn tilted() -> Self {
        Self {
            k: Complex::new(45f64.cos(), 30f64.cos()),
        }
    }
}

impl UpdateFn for ScaledMandelbrot {
    #[inline]
    fn apply(&self, z: Complex, c: Complex) -> Complex {
        self.k * z.square() + c
    }
}

/// `zⁿ + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multibrot {
    pub power: u32,
}

impl UpdateFn for Multibrot {
    #[inline]
    fn apply(&self, z: Complex, c: Complex) -> Complex {
        z.powi(self.power) + c
    }
}

/// Named formula, selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    #[default]
    Mandelbrot,
    Tilted,
    Cubic,
    Quartic,
}

impl Formula {
    pub const ALL: [Formula; 4] = [
        Formula::Mandelbrot,
        Formula::Tilted,
        Formula::Cubic,
        Formula::Quartic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "mandelbrot",
            Self::Tilted => "tilted",
            Self::Cubic => "cubic",
            Self::Quartic => "quartic",
        }
    }
}

impl UpdateFn for Formula {
    #[inline]
    fn apply(&self, z: Complex, c: Complex) -> Complex {
        match self {
            Self::Mandelbrot => Mandelbrot.apply(z, c),
            Self::Tilted => ScaledMandelbrot::tilted().apply(z, c),
            Self::Cubic => Multibrot { power: 3 }.apply(z, c),
            Self::Quartic => Multibrot { power: 4 }.apply(z, c),
        }
    }
}

impl FromStr for Formula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown formula {s:?}"))
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters bounding the escape test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EscapeParams {
    /// Iteration cap; a pixel that reaches it is treated as bounded.
    pub iter_max: u32,
    /// `|z|` at or beyond which the orbit has escaped.
    pub threshold: f64,
}

impl EscapeParams {
    pub const DEFAULT_ITER_MAX: u32 = 500;
    pub const DEFAULT_THRESHOLD: f64 = 2.0;

    pub fn new(iter_max: u32, threshold: f64) -> crate::Result<Self> {
        if iter_max < 1 {
            return Err(CoreError::InvalidMaxIterations(iter_max));
        }
        if threshold <= 0.0 || !threshold.is_finite() {
            return Err(CoreError::InvalidThreshold(threshold));
        }
        Ok(Self { iter_max, threshold })
    }

    pub fn with_iter_max(self, iter_max: u32) -> Self {
        Self { iter_max, ..self }
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            iter_max: Self::DEFAULT_ITER_MAX,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Count applications of `f` before `|z|` reaches the threshold, capped at
/// `iter_max`. Starting from `z = 0`, so the function is applied at least once
/// whenever `iter_max > 0`.
#[inline]
pub fn escape<F: UpdateFn + ?Sized>(c: Complex, params: &EscapeParams, f: &F) -> u32 {
    let threshold_sq = params.threshold * params.threshold;
    let mut z = Complex::ZERO;
    let mut n = 0;
    while z.norm_sq() < threshold_sq && n < params.iter_max {
        z = f.apply(z, c);
        n += 1;
    }
    n
}
