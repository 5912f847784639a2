pub mod complex;
pub mod coords;
pub mod error;
pub mod escape;
pub mod history;
pub mod mapper;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use coords::{CoordinateSystem, Scalar};
pub use error::CoreError;
pub use escape::{escape, EscapeParams, Formula, Mandelbrot, Multibrot, ScaledMandelbrot, UpdateFn};
pub use history::{ZoomHistory, ZoomHistoryEntry};
pub use mapper::{PixelRect, PlaneRect, ViewportMapper};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
