// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::config::RadarConfig;

/// A point after sphere projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// Curved position relative to the nucleus, in pixels.
    pub position: Point,
    /// Visual closeness in `(0, 1]`; `1` at the center, approaching `0` at the edge.
    pub depth: f64,
}

impl ProjectedPoint {
    /// The undistorted center with maximum depth.
    pub const CENTER: Self = Self {
        position: Point::ORIGIN,
        depth: 1.0,
    };
}

/// Projects a flat point onto a globe-like bulge.
///
/// With `n = point / sphere_radius` and `d = sqrt(|n|² + 1)`, the result is
/// `n / d * sphere_radius * bulge_factor` with depth `1 / d`. Non-finite input
/// or a non-positive radius yields [`ProjectedPoint::CENTER`].
#[must_use]
pub fn project(point: Point, sphere_radius: f64, bulge_factor: f64) -> ProjectedPoint {
    if !point.is_finite() || !sphere_radius.is_finite() || sphere_radius <= 0.0 {
        return ProjectedPoint::CENTER;
    }
    let n = point.to_vec2() / sphere_radius;
    let denom = (n.hypot2() + 1.0).sqrt();
    let curved = n / denom * (sphere_radius * bulge_factor);
    ProjectedPoint {
        position: curved.to_point(),
        depth: denom.recip(),
    }
}

/// The one projection used for every point in a radar scene.
///
/// Grid lines and markers must share the same radius and bulge or the grid
/// drifts away from the markers it is meant to align with. Building both from
/// a single `SphereProjector` keeps them in step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereProjector {
    sphere_radius: f64,
    bulge_factor: f64,
}

impl SphereProjector {
    /// Creates a projector from the sphere settings of `config`.
    #[must_use]
    pub fn new(config: &RadarConfig) -> Self {
        Self {
            sphere_radius: config.sphere_radius,
            bulge_factor: config.bulge_factor,
        }
    }

    /// Sphere radius in pixels.
    #[must_use]
    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }

    /// Outward bulge multiplier.
    #[must_use]
    pub fn bulge_factor(&self) -> f64 {
        self.bulge_factor
    }

    /// Projects `point`.
    #[must_use]
    pub fn project(&self, point: Point) -> ProjectedPoint {
        project(point, self.sphere_radius, self.bulge_factor)
    }
}

impl Default for SphereProjector {
    fn default() -> Self {
        Self::new(&RadarConfig::default())
    }
}
