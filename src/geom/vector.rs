// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Vector types
//!
//! All dimensions use the `f64` type.

use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector
///
/// Usually used as either a coordinate or a difference of coordinates, but
/// may have some other uses.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2(pub f64, pub f64);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2::splat(0.0);

    /// One
    pub const ONE: Vec2 = Vec2::splat(1.0);

    /// Constructs a new instance with each element initialized to `value`.
    #[inline]
    pub const fn splat(value: f64) -> Self {
        Vec2(value, value)
    }

    /// Return the sum of the terms
    #[inline]
    pub fn sum(self) -> f64 {
        self.0 + self.1
    }

    /// Return the sum of the square of the terms
    #[inline]
    pub fn sum_square(self) -> f64 {
        self.0 * self.0 + self.1 * self.1
    }

    /// Return the length of the vector
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.sum_square().sqrt()
    }

    /// Return the distance from `self` to `other`
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).magnitude()
    }

    /// Return the angle between the vector and the positive x-axis
    ///
    /// The result is in radians, normalized to the range `[0, 2π)`.
    pub fn direction(self) -> f64 {
        let a = self.1.atan2(self.0);
        if a < 0.0 { a + TAU } else { a }
    }

    /// Multiply two vectors as if they are complex numbers
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn complex_mul(self, rhs: Self) -> Self {
        Vec2(
            self.0 * rhs.0 - self.1 * rhs.1,
            self.0 * rhs.1 + self.1 * rhs.0,
        )
    }

    /// Divide by a second vector as if they are complex numbers
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn complex_div(self, rhs: Self) -> Self {
        self.complex_mul(rhs.complex_inv())
    }

    /// Take the complex reciprocal
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn complex_inv(self) -> Self {
        let ssi = 1.0 / self.sum_square();
        Vec2(self.0 * ssi, -self.1 * ssi)
    }

    /// True if both components are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Self::Output {
        Vec2(-self.0, -self.1)
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign<Vec2> for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl SubAssign<Vec2> for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.0 -= rhs.0;
        self.1 -= rhs.1;
    }
}

impl Mul<Vec2> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2(self.0 * rhs.0, self.1 * rhs.1)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vec2(self.0 * rhs, self.1 * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2(self * rhs.0, self * rhs.1)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Vec2(self.0 / rhs, self.1 / rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from(arg: (f64, f64)) -> Self {
        Vec2(arg.0, arg.1)
    }
}

impl From<Vec2> for (f64, f64) {
    #[inline]
    fn from(v: Vec2) -> Self {
        (v.0, v.1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn arithmetic() {
        let a = Vec2(3.0, -1.0);
        let b = Vec2(1.0, 2.0);
        assert_eq!(a + b, Vec2(4.0, 1.0));
        assert_eq!(a - b, Vec2(2.0, -3.0));
        assert_eq!(-a, Vec2(-3.0, 1.0));
        assert_eq!(a * 2.0, Vec2(6.0, -2.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, Vec2(1.5, -0.5));
    }

    #[test]
    fn magnitude_and_distance() {
        assert_eq!(Vec2(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vec2::ZERO.magnitude(), 0.0);
        assert_eq!(Vec2(1.0, 1.0).distance(Vec2(4.0, 5.0)), 5.0);
    }

    #[test]
    fn direction_is_normalized() {
        assert_eq!(Vec2(1.0, 0.0).direction(), 0.0);
        assert_eq!(Vec2(0.0, 1.0).direction(), FRAC_PI_2);
        assert_eq!(Vec2(-1.0, 0.0).direction(), PI);
        // atan2 yields -π/2 here; direction maps into [0, 2π)
        assert_eq!(Vec2(0.0, -1.0).direction(), 3.0 * FRAC_PI_2);
        let d = Vec2(1.0, -1.0).direction();
        assert!(d > PI && d < TAU);
    }

    #[test]
    fn complex_ops() {
        let i = Vec2(0.0, 1.0);
        assert_eq!(i.complex_mul(i), Vec2(-1.0, 0.0));

        let a = Vec2(3.0, 2.0);
        let b = Vec2(-1.0, 4.0);
        let c = a.complex_mul(b).complex_div(b);
        assert!((c - a).magnitude() < 1e-12);
    }
}
