// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Allowed range for the uniform view scale.
///
/// The default range is `[0.5, 3.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    min: f64,
    max: f64,
}

impl ScaleLimits {
    /// Smallest default scale (zoomed out).
    pub const DEFAULT_MIN: f64 = 0.5;
    /// Largest default scale (zoomed in).
    pub const DEFAULT_MAX: f64 = 3.0;

    /// Creates limits from two bounds.
    ///
    /// The provided range is normalized so that `min <= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `scale` into the range.
    ///
    /// A NaN scale clamps to the lower bound so it never escapes into the view.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }

    /// Returns `true` if `scale` lies inside the range.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Global rotate/zoom state of the radar view.
///
/// Rotation and scale always travel together: writers replace the whole value
/// so a reader never sees a new scale paired with a stale rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Rotation in radians. Unconstrained.
    pub rotation: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl ViewState {
    /// No rotation, unit scale.
    pub const IDENTITY: Self = Self {
        rotation: 0.0,
        scale: 1.0,
    };

    /// Creates a view state from a rotation and a scale.
    #[must_use]
    pub const fn new(rotation: f64, scale: f64) -> Self {
        Self { rotation, scale }
    }

    /// Returns a copy with the scale clamped into `limits`.
    #[must_use]
    pub fn clamped(self, limits: &ScaleLimits) -> Self {
        Self {
            rotation: self.rotation,
            scale: limits.clamp(self.scale),
        }
    }

    /// Returns a copy with the rotation wrapped into `[0, 2π)`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let tau = core::f64::consts::TAU;
        let mut rotation = self.rotation % tau;
        if rotation < 0.0 {
            rotation += tau;
        }
        // `-ε % τ + τ` can round up to exactly τ.
        if rotation >= tau {
            rotation = 0.0;
        }
        Self {
            rotation,
            scale: self.scale,
        }
    }

    /// Returns `true` if this is exactly the identity view.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::IDENTITY
    }
}
