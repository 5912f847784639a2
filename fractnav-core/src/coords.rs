use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use tracing::debug;

use crate::history::{ZoomHistory, ZoomHistoryEntry};

/// Numeric types a [`CoordinateSystem`] can be laid over.
///
/// Implemented for `i32` (screen pixels) and `f64` (complex plane).
pub trait Scalar:
    Copy
    + PartialOrd
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const TWO: Self;

    fn to_f64(self) -> f64;

    /// Conversion from `f64`; integer types truncate toward zero.
    fn from_f64(value: f64) -> Self;
}

impl Scalar for i32 {
    const TWO: Self = 2;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as i32
    }
}

impl Scalar for f64 {
    const TWO: Self = 2.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// A rectangular window `[x_min, x_max] × [y_min, y_max]` over a numeric domain.
///
/// The same type describes the output raster (`CoordinateSystem<i32>`) and the
/// visible region of the complex plane (`CoordinateSystem<f64>`). Bounds are
/// never validated: callers keep `x_max >= x_min` and `y_max >= y_min`, and a
/// zero-area window simply produces an empty iteration field.
///
/// Every instance carries a [`ZoomHistory`]; only plane windows ever append to
/// it, through [`CoordinateSystem::zoom`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystem<T: Scalar> {
    x_min: T,
    x_max: T,
    y_min: T,
    y_max: T,
    history: ZoomHistory,
}

impl<T: Scalar> CoordinateSystem<T> {
    pub fn new(x_min: T, x_max: T, y_min: T, y_max: T) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            history: ZoomHistory::new(),
        }
    }

    #[inline]
    pub fn x_min(&self) -> T {
        self.x_min
    }

    #[inline]
    pub fn x_max(&self) -> T {
        self.x_max
    }

    #[inline]
    pub fn y_min(&self) -> T {
        self.y_min
    }

    #[inline]
    pub fn y_max(&self) -> T {
        self.y_max
    }

    #[inline]
    pub fn width(&self) -> T {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> T {
        self.y_max - self.y_min
    }

    /// Area of the window (pixel count for screen windows).
    pub fn size(&self) -> T {
        self.width() * self.height()
    }

    /// `(x_min + width/2, y_min + height/2)`, using integer division for `i32`.
    pub fn midpoint(&self) -> (T, T) {
        (
            self.x_min + self.width() / T::TWO,
            self.y_min + self.height() / T::TWO,
        )
    }

    /// Replace all four bounds.
    pub fn reset(&mut self, x_min: T, x_max: T, y_min: T, y_max: T) {
        self.x_min = x_min;
        self.x_max = x_max;
        self.y_min = y_min;
        self.y_max = y_max;
    }

    /// Recentre on `(x_mid, y_mid)` as a square of half-size `r`.
    pub fn reset_centered(&mut self, x_mid: T, y_mid: T, r: T) {
        self.reset(x_mid - r, x_mid + r, y_mid - r, y_mid + r);
    }

    pub fn history(&self) -> &ZoomHistory {
        &self.history
    }
}

impl CoordinateSystem<f64> {
    /// Seed the window with a previously recorded history so that further
    /// zooms continue its numbering.
    pub fn with_history(mut self, history: ZoomHistory) -> Self {
        self.history = history;
        self
    }

    /// Move the window to `[x0, x1]` horizontally and record the move.
    ///
    /// The vertical span is forced to `(x1 - x0) * window_ratio` starting at
    /// `y0`; `_y1` is accepted for call-site symmetry but never used. The
    /// appended entry holds the final bounds.
    pub fn zoom(&mut self, window_ratio: f64, x0: f64, x1: f64, y0: f64, _y1: f64) -> &ZoomHistoryEntry {
        let y1 = y0 + (x1 - x0) * window_ratio;
        self.reset(x0, x1, y0, y1);
        let entry = self.history.append(x0, x1, y0, y1);
        debug!(
            seq = entry.sequence_number,
            x1 = entry.x1,
            x2 = entry.x2,
            y1 = entry.y1,
            y2 = entry.y2,
            "Zoom recorded"
        );
        entry
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for CoordinateSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
