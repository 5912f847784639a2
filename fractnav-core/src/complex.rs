use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A complex number with two `f64` components.
///
/// Doubles as a 2-D point: the viewport mapper feeds pixel positions through
/// the same type (`re` = column, `im` = row) before they become plane points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `re² + im²`.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Modulus `|z|`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    pub fn square(self) -> Self {
        Self {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    /// Integer power by repeated squaring. `powi(0)` is one.
    pub fn powi(self, mut exp: u32) -> Self {
        let mut base = self;
        let mut acc = Self::ONE;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base;
            }
            base = base.square();
            exp >>= 1;
        }
        acc
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: Complex, b: Complex) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn multiplication() {
        // (1 + 2i)(3 + 4i) = -5 + 10i
        let c = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);
        assert!(approx_eq(c, Complex::new(-5.0, 10.0)));
    }

    #[test]
    fn square_matches_self_product() {
        let z = Complex::new(0.3, -1.7);
        assert!(approx_eq(z.square(), z * z));
    }

    #[test]
    fn powi_small_exponents() {
        let z = Complex::new(1.0, 1.0);
        assert!(approx_eq(z.powi(0), Complex::ONE));
        assert!(approx_eq(z.powi(1), z));
        // (1+i)^3 = -2 + 2i
        assert!(approx_eq(z.powi(3), Complex::new(-2.0, 2.0)));
        // (1+i)^4 = -4
        assert!(approx_eq(z.powi(4), Complex::new(-4.0, 0.0)));
    }

    #[test]
    fn norm_of_three_four() {
        let z = Complex::new(3.0, 4.0);
        assert!((z.norm() - 5.0).abs() < EPSILON);
        assert!((z.norm_sq() - 25.0).abs() < EPSILON);
    }

    #[test]
    fn display_signs() {
        assert_eq!(Complex::new(1.0, -2.0).to_string(), "1 - 2i");
        assert_eq!(Complex::new(1.5, 0.5).to_string(), "1.5 + 0.5i");
    }
}
