// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Mul;

use kurbo::{Affine, Vec2};

/// A 2×2 linear map with row-major coefficients.
///
/// Applied to a vector `(x, y)` it yields `(m11·x + m12·y, m21·x + m22·y)`.
/// Products compose right-to-left: `(a * b).transform_vector(v)` applies `b`
/// first and then `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2x2 {
    /// Row 1, column 1.
    pub m11: f64,
    /// Row 1, column 2.
    pub m12: f64,
    /// Row 2, column 1.
    pub m21: f64,
    /// Row 2, column 2.
    pub m22: f64,
}

impl Transform2x2 {
    /// The identity map.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a transform from its four coefficients.
    #[must_use]
    pub const fn new(m11: f64, m12: f64, m21: f64, m22: f64) -> Self {
        Self { m11, m12, m21, m22 }
    }

    /// A counter-clockwise rotation by `radians` (in a y-up frame).
    ///
    /// The determinant is always `1`.
    #[must_use]
    pub fn rotation(radians: f64) -> Self {
        let Vec2 { x: cos, y: sin } = Vec2::from_angle(radians);
        Self::new(cos, -sin, sin, cos)
    }

    /// An axis-aligned scale by `sx` and `sy`.
    #[must_use]
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy)
    }

    /// Returns the determinant `m11·m22 − m12·m21`.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Standard 2×2 · 2×1 multiplication.
    #[must_use]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m11 * v.x + self.m12 * v.y,
            self.m21 * v.x + self.m22 * v.y,
        )
    }

    /// Returns the inverse map, or `None` when the transform is singular or
    /// not finite.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = det.recip();
        Some(Self::new(
            self.m22 * inv,
            -self.m12 * inv,
            -self.m21 * inv,
            self.m11 * inv,
        ))
    }

    /// Converts into a Kurbo [`Affine`] with no translation.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        // Kurbo stores column-major `[a, b, c, d, e, f]`.
        Affine::new([self.m11, self.m21, self.m12, self.m22, 0.0, 0.0])
    }
}

impl Default for Transform2x2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.m11 * rhs.m11 + self.m12 * rhs.m21,
            self.m11 * rhs.m12 + self.m12 * rhs.m22,
            self.m21 * rhs.m11 + self.m22 * rhs.m21,
            self.m21 * rhs.m12 + self.m22 * rhs.m22,
        )
    }
}

impl Mul<Vec2> for Transform2x2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_vector(rhs)
    }
}
