// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::config::RadarConfig;

/// Maps a distance in feet to a radius in pixels.
///
/// `min(distance / max_radius_feet, 1) * max_radius_pixels`: anything beyond
/// range sits on the boundary. Negative or non-finite distances count as `0`,
/// as does a non-positive range.
#[must_use]
pub fn radius_pixels(distance_feet: f64, max_radius_feet: f64, max_radius_pixels: f64) -> f64 {
    if max_radius_feet.is_nan() || max_radius_feet <= 0.0 {
        return 0.0;
    }
    let ratio = (sanitize_distance(distance_feet) / max_radius_feet).min(1.0);
    ratio * max_radius_pixels
}

/// Replaces negative and non-finite distances with `0`.
#[must_use]
pub fn sanitize_distance(distance_feet: f64) -> f64 {
    if distance_feet.is_finite() && distance_feet > 0.0 {
        distance_feet
    } else {
        0.0
    }
}

/// Distance-to-position mapping with grid snapping.
///
/// Positions are relative to the nucleus, in pixels. Snapping rounds the
/// Cartesian coordinates independently to the nearest multiple of
/// [`RadialMapper::grid_pixel_spacing`] so markers sit on drawn grid
/// intersections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialMapper {
    max_radius_feet: f64,
    max_radius_pixels: f64,
    grid_spacing_feet: f64,
}

impl RadialMapper {
    /// Creates a mapper from the range and grid settings of `config`.
    #[must_use]
    pub fn new(config: &RadarConfig) -> Self {
        Self {
            max_radius_feet: config.max_radius_feet,
            max_radius_pixels: config.max_radius_pixels,
            grid_spacing_feet: config.grid_spacing_feet,
        }
    }

    /// Maximum range in feet.
    #[must_use]
    pub fn max_radius_feet(&self) -> f64 {
        self.max_radius_feet
    }

    /// Radius in pixels of the range boundary.
    #[must_use]
    pub fn max_radius_pixels(&self) -> f64 {
        self.max_radius_pixels
    }

    /// Pixels per foot along a radius.
    #[must_use]
    pub fn pixels_per_foot(&self) -> f64 {
        self.max_radius_pixels / self.max_radius_feet
    }

    /// Distance between grid lines, in pixels.
    #[must_use]
    pub fn grid_pixel_spacing(&self) -> f64 {
        self.pixels_per_foot() * self.grid_spacing_feet
    }

    /// Clamps a reported distance into `[0, max_radius_feet]`.
    #[must_use]
    pub fn clamp_distance(&self, distance_feet: f64) -> f64 {
        sanitize_distance(distance_feet).min(self.max_radius_feet)
    }

    /// Unsnapped radius in pixels for `distance_feet`.
    #[must_use]
    pub fn radius_pixels(&self, distance_feet: f64) -> f64 {
        radius_pixels(distance_feet, self.max_radius_feet, self.max_radius_pixels)
    }

    /// Unsnapped Cartesian position at `distance_feet` along `angle`.
    #[must_use]
    pub fn polar(&self, distance_feet: f64, angle: f64) -> Point {
        (Vec2::from_angle(angle) * self.radius_pixels(distance_feet)).to_point()
    }

    /// Rounds each coordinate to the nearest grid line.
    #[must_use]
    pub fn snap_to_grid(&self, point: Point) -> Point {
        let spacing = self.grid_pixel_spacing();
        if !spacing.is_finite() || spacing <= 0.0 {
            return point;
        }
        Point::new(
            (point.x / spacing).round() * spacing,
            (point.y / spacing).round() * spacing,
        )
    }

    /// Grid-snapped position at `distance_feet` along `angle`.
    #[must_use]
    pub fn place(&self, distance_feet: f64, angle: f64) -> Point {
        self.snap_to_grid(self.polar(distance_feet, angle))
    }
}

impl Default for RadialMapper {
    fn default() -> Self {
        Self::new(&RadarConfig::default())
    }
}
