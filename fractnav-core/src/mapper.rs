use crate::complex::Complex;
use crate::coords::{CoordinateSystem, Scalar};

/// A rectangle in pixel space of a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x1: i32,
    pub x2: i32,
    pub y1: i32,
    pub y2: i32,
}

impl PixelRect {
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// A rectangle on the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneRect {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl PlaneRect {
    /// The current bounds of a plane window.
    pub fn of(plane: &CoordinateSystem<f64>) -> Self {
        Self {
            x1: plane.x_min(),
            x2: plane.x_max(),
            y1: plane.y_min(),
            y2: plane.y_max(),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Stateless linear map from a screen window onto a plane window.
///
/// Positions are divided by the *width/height* of the source window and
/// offset by the *minimum* of the target window, so the source is assumed to
/// start at zero (as every raster does).
pub struct ViewportMapper;

impl ViewportMapper {
    /// Map pixel `p` (`re` = column, `im` = row) to a point on the plane.
    #[inline]
    pub fn scale(screen: &CoordinateSystem<i32>, plane: &CoordinateSystem<f64>, p: Complex) -> Complex {
        Complex::new(
            plane.x_min() + p.re / screen.width() as f64 * plane.width(),
            plane.y_min() + p.im / screen.height() as f64 * plane.height(),
        )
    }

    /// The same map between any two windows, for arbitrary scalar types.
    pub fn scale_pair<F: Scalar, T: Scalar>(
        from: &CoordinateSystem<F>,
        to: &CoordinateSystem<T>,
        (x, y): (F, F),
    ) -> (T, T) {
        let x = to.x_min().to_f64() + x.to_f64() / from.width().to_f64() * to.width().to_f64();
        let y = to.y_min().to_f64() + y.to_f64() / from.height().to_f64() * to.height().to_f64();
        (T::from_f64(x), T::from_f64(y))
    }

    /// Turn a rectangle selected on the previous frame into the plane
    /// rectangle it covers.
    pub fn pixel_rect_to_plane(
        screen: &CoordinateSystem<i32>,
        plane: &CoordinateSystem<f64>,
        rect: PixelRect,
    ) -> PlaneRect {
        let (x1, y1) = Self::scale_pair(screen, plane, (rect.x1, rect.y1));
        let (x2, y2) = Self::scale_pair(screen, plane, (rect.x2, rect.y2));
        PlaneRect { x1, x2, y1, y2 }
    }
}
