pub mod buffer;
pub mod color;
pub mod engine;
pub mod error;
pub mod export;
pub mod iteration_field;
pub mod overlay;

pub use buffer::RenderBuffer;
pub use color::{piecewise_linear, ChannelPolynomial, ColorMapper, Rgb, SmoothPalette};
pub use engine::compute_iteration_field;
pub use error::RenderError;
pub use export::{export_png, FrameMeta};
pub use iteration_field::IterationField;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
