// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Affine transformation

use super::Vec2;
use std::ops::{Mul, MulAssign};

/// Linear transformation: scaling and rotation
///
/// This represents scaling and rotation transformations (i.e. the linear
/// mappings on [`Vec2`] in the mathematical sense, excluding skew).
///
/// A `Linear` transform `a` may be applied to a vector `v` via multiplication:
/// `a * v`. Multiple transforms can be combined: `a * (b * v) == (a * b) * v`.
/// Multiplication of `Linear` transforms is commutative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Linear(Vec2);

impl Linear {
    /// The identity transform
    pub const IDENTITY: Linear = Linear(Vec2(1.0, 0.0));

    /// Construct as a complex number
    ///
    /// The state is treated as a complex number of the form
    /// `u + v*i = a * e^{i*t}` where `a` is the scale component and `t` is the
    /// angle of rotation.
    #[inline]
    pub fn new(u: f64, v: f64) -> Self {
        Linear(Vec2(u, v))
    }

    /// Construct a scaling transform
    #[inline]
    pub fn scale(scale: f64) -> Self {
        Linear(Vec2(scale, 0.0))
    }

    /// Construct a rotating transform
    ///
    /// To also scale, use `Linear::rotate(radians) * Linear::scale(scale)`.
    pub fn rotate(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Linear(Vec2(c, s))
    }

    /// Get the internal representation
    ///
    /// The state is treated as a complex number of the form
    /// `u + v*i = a * e^{i*t}` where `a` is the scale component and `t` is the
    /// angle of rotation.
    ///
    /// The matrix form of this transform is:
    /// ```none
    ///     u  -v
    ///     v   u
    /// ```
    #[inline]
    pub fn get_complex(self) -> (f64, f64) {
        (self.0.0, self.0.1)
    }

    /// Calculate the change in scale (non-trivial)
    #[inline]
    pub fn get_scale(self) -> f64 {
        self.0.sum_square().sqrt()
    }

    /// Calculate the rotation angle (non-trivial)
    ///
    /// The result is in radians in the range `(-π, π]`.
    #[inline]
    pub fn get_angle(self) -> f64 {
        self.0.1.atan2(self.0.0)
    }

    /// True if all components are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Remove the scaling component
    #[inline]
    pub fn normalize(self) -> Self {
        Linear(self.0 / self.0.sum_square().sqrt())
    }

    /// Calculate the inverse
    ///
    /// Due to the limitations of floating-point numbers, it is not guaranteed
    /// that `self * self.inverse() == Self::IDENTITY` in general.
    #[inline]
    pub fn inverse(self) -> Self {
        Linear(self.0.complex_inv())
    }
}

impl Mul<Linear> for Linear {
    type Output = Linear;

    #[inline]
    fn mul(self, rhs: Linear) -> Linear {
        Linear(self.0.complex_mul(rhs.0))
    }
}

impl MulAssign<Linear> for Linear {
    #[inline]
    fn mul_assign(&mut self, rhs: Linear) {
        *self = *self * rhs;
    }
}

impl Mul<Vec2> for Linear {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.0.complex_mul(rhs)
    }
}

/// Affine transformations: move/scale/rotate
///
/// Note that the representation is limited to transformations which preserve
/// the angle: it cannot represent reflection or shear transformations.
///
/// An `Affine` transform `a` may be applied to a [`Vec2`] coordinate `v` via
/// multiplication: `a * v`. This is equivalent to `a.alpha() * v + a.delta()`.
/// Two transforms `a`, `b` may be combined via multiplication: `a * b`. Note
/// that this is associative but not commutative:
/// `b * (a * v) == (b * a) * v` but `a * b != b * a` in general.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine {
    /// Rotation and scale component
    alpha: Linear,
    /// Translation component
    delta: Vec2,
}

impl Affine {
    /// The identity transform
    pub const IDENTITY: Affine = Affine {
        alpha: Linear::IDENTITY,
        delta: Vec2::ZERO,
    };

    /// Construct from components
    #[inline]
    pub fn new(alpha: Linear, delta: Vec2) -> Self {
        Affine { alpha, delta }
    }

    /// Construct a translation transform
    #[inline]
    pub fn translate(delta: Vec2) -> Self {
        Affine {
            alpha: Linear::IDENTITY,
            delta,
        }
    }

    /// Get component `alpha`
    ///
    /// This represents scaling and rotation transformations.
    #[inline]
    pub fn alpha(self) -> Linear {
        self.alpha
    }

    /// Get component `delta`
    ///
    /// This is the translation, applied after rotation and scaling.
    #[inline]
    pub fn delta(self) -> Vec2 {
        self.delta
    }

    /// Get as `delta` if `self` represents a pure translation
    #[inline]
    pub fn as_translation(self) -> Option<Vec2> {
        if self.alpha == Linear::IDENTITY {
            Some(self.delta)
        } else {
            None
        }
    }

    /// True if all components are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.alpha.is_finite() && self.delta.is_finite()
    }

    /// Calculate the inverse transform
    ///
    /// If `self` has scale zero (i.e. maps everything to a point) then the
    /// result will not be finite.
    pub fn inverse(self) -> Self {
        let alpha = self.alpha.inverse();
        let delta = -(alpha * self.delta);
        Affine { alpha, delta }
    }

    /// Get the matrix components `[a, b, c, d, tx, ty]`
    ///
    /// Components use the row-vector convention:
    /// `(x', y') = (x, y) * [[a, b], [c, d]] + (tx, ty)`.
    /// Since the representation preserves angles, `d == a` and `c == -b`.
    #[inline]
    pub fn components(self) -> [f64; 6] {
        let (u, v) = self.alpha.get_complex();
        [u, v, -v, u, self.delta.0, self.delta.1]
    }

    /// Construct from matrix components `[a, b, c, d, tx, ty]`
    ///
    /// The inverse of [`Self::components`]. Returns `None` unless the matrix
    /// preserves angles (`d == a` and `c == -b`): shear and reflection cannot
    /// be represented.
    pub fn from_components(components: [f64; 6]) -> Option<Self> {
        let [a, b, c, d, tx, ty] = components;
        if d == a && c == -b {
            Some(Affine {
                alpha: Linear::new(a, b),
                delta: Vec2(tx, ty),
            })
        } else {
            None
        }
    }
}

impl From<Linear> for Affine {
    #[inline]
    fn from(alpha: Linear) -> Self {
        Affine {
            alpha,
            delta: Vec2::ZERO,
        }
    }
}

impl Mul<Vec2> for Affine {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.alpha * rhs + self.delta
    }
}

impl Mul<Affine> for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        let alpha = self.alpha * rhs.alpha;
        let delta = self.alpha * rhs.delta + self.delta;
        Affine { alpha, delta }
    }
}

impl MulAssign<Affine> for Affine {
    #[inline]
    fn mul_assign(&mut self, rhs: Affine) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_approx(a: Affine, b: Affine) {
        let (ac, bc) = (a.components(), b.components());
        for i in 0..6 {
            assert!(
                (ac[i] - bc[i]).abs() < 1e-9,
                "component {i}: {a:?} != {b:?}"
            );
        }
    }

    #[test]
    fn linear_components() {
        let r = Linear::rotate(FRAC_PI_2);
        assert!((r.get_angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((r.get_scale() - 1.0).abs() < 1e-12);

        let s = Linear::scale(3.0);
        assert_eq!(s.get_angle(), 0.0);
        assert_eq!(s.get_scale(), 3.0);

        let rs = r * s;
        assert!((rs.get_angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((rs.get_scale() - 3.0).abs() < 1e-12);
        assert_eq!(rs, s * r);
        assert!((rs.normalize().get_scale() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn application() {
        let v = Vec2(2.0, 1.0);
        assert_eq!(Linear::scale(2.0) * v, Vec2(4.0, 2.0));

        let r = Linear::rotate(PI) * v;
        assert!((r - Vec2(-2.0, -1.0)).magnitude() < 1e-12);

        let t = Affine::translate(Vec2(1.0, -1.0));
        assert_eq!(t * v, Vec2(3.0, 0.0));
    }

    #[test]
    fn composition_order() {
        let t = Affine::translate(Vec2(1.0, 0.0));
        let s = Affine::from(Linear::scale(2.0));

        // In a * b, b applies first
        assert_eq!((s * t) * Vec2::ZERO, Vec2(2.0, 0.0));
        assert_eq!((t * s) * Vec2::ZERO, Vec2(1.0, 0.0));

        // identity laws
        assert_eq!(Affine::IDENTITY * t, t);
        assert_eq!(t * Affine::IDENTITY, t);
    }

    #[test]
    fn inverse_round_trip() {
        let a = Affine::translate(Vec2(3.0, -2.0))
            * Affine::from(Linear::rotate(0.7) * Linear::scale(1.5));
        assert_approx(a * a.inverse(), Affine::IDENTITY);
        assert_approx(a.inverse() * a, Affine::IDENTITY);
    }

    #[test]
    fn components_round_trip() {
        let a = Affine::new(Linear::new(0.5, 1.25), Vec2(-4.0, 9.0));
        let c = a.components();
        assert_eq!(c, [0.5, 1.25, -1.25, 0.5, -4.0, 9.0]);
        assert_eq!(Affine::from_components(c), Some(a));

        assert_eq!(
            Affine::from_components([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
            Some(Affine::IDENTITY)
        );

        // shear and reflection are rejected
        assert_eq!(Affine::from_components([1.0, 0.0, 0.5, 1.0, 0.0, 0.0]), None);
        assert_eq!(Affine::from_components([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]), None);
    }
}
