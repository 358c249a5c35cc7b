// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radar geometry configuration and its validation.

use core::fmt;

/// What happens to devices that stop appearing in scan results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EvictionPolicy {
    /// Keep every device at its last known position indefinitely.
    #[default]
    Never,
    /// Drop a device once more than `ttl_ms` milliseconds have passed since
    /// its last sighting.
    AfterIdle {
        /// Idle time after which a device is dropped.
        ttl_ms: u64,
    },
}

impl EvictionPolicy {
    /// Returns `true` if a device last seen at `last_seen_ms` should be
    /// dropped at `now_ms`.
    #[must_use]
    pub fn is_stale(&self, last_seen_ms: u64, now_ms: u64) -> bool {
        match *self {
            Self::Never => false,
            Self::AfterIdle { ttl_ms } => now_ms.saturating_sub(last_seen_ms) > ttl_ms,
        }
    }
}

/// Error returned when a [`RadarConfig`] holds an unusable value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_radius_feet` must be positive and finite.
    MaxRadiusFeet(f64),
    /// `max_radius_pixels` must be positive and finite.
    MaxRadiusPixels(f64),
    /// `grid_spacing_feet` must be positive and finite.
    GridSpacingFeet(f64),
    /// `sphere_radius` must be positive and finite.
    SphereRadius(f64),
    /// `bulge_factor` must be finite.
    BulgeFactor(f64),
    /// `max_radius_feet / grid_spacing_feet` exceeds
    /// [`RadarConfig::MAX_GRID_DIVISIONS`].
    GridTooDense {
        /// Configured range in feet.
        max_radius_feet: f64,
        /// Configured grid spacing in feet.
        grid_spacing_feet: f64,
    },
    /// `grid_samples` must be within `2..=`[`RadarConfig::MAX_GRID_SAMPLES`].
    GridSamples(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxRadiusFeet(v) => {
                write!(f, "max radius must be a positive number of feet, got {v}")
            }
            Self::MaxRadiusPixels(v) => {
                write!(f, "max radius must be a positive number of pixels, got {v}")
            }
            Self::GridSpacingFeet(v) => {
                write!(f, "grid spacing must be a positive number of feet, got {v}")
            }
            Self::SphereRadius(v) => write!(f, "sphere radius must be positive, got {v}"),
            Self::BulgeFactor(v) => write!(f, "bulge factor must be finite, got {v}"),
            Self::GridTooDense {
                max_radius_feet,
                grid_spacing_feet,
            } => write!(
                f,
                "grid spacing of {grid_spacing_feet} ft over a {max_radius_feet} ft range \
                 exceeds {} grid lines per half-axis",
                RadarConfig::MAX_GRID_DIVISIONS
            ),
            Self::GridSamples(n) => write!(
                f,
                "grid lines need between 2 and {} samples, got {n}",
                RadarConfig::MAX_GRID_SAMPLES
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Geometry of one radar screen.
///
/// All fields are public; [`RadarConfig::validate`] checks them and the
/// engine constructors call it before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarConfig {
    /// Distance, in feet, that maps to the outer boundary.
    pub max_radius_feet: f64,
    /// Radius of the outer boundary, in pixels.
    pub max_radius_pixels: f64,
    /// Distance between grid lines, in feet.
    pub grid_spacing_feet: f64,
    /// Sphere radius for the bulge projection, in pixels.
    pub sphere_radius: f64,
    /// Outward bulge multiplier applied after projection.
    pub bulge_factor: f64,
    /// Points sampled along each grid line.
    pub grid_samples: u32,
    /// Device eviction policy.
    pub eviction: EvictionPolicy,
}

impl RadarConfig {
    /// Most grid lines allowed from the nucleus to the boundary along one
    /// half-axis. A frame holds at most `2 * (2 * MAX_GRID_DIVISIONS + 1)`
    /// grid polylines.
    pub const MAX_GRID_DIVISIONS: f64 = 256.0;

    /// Most points sampled along one grid line.
    pub const MAX_GRID_SAMPLES: u32 = 4096;

    /// Starts a builder from the defaults.
    #[must_use]
    pub fn builder() -> RadarConfigBuilder {
        RadarConfigBuilder::default()
    }

    /// Checks every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(v: f64) -> bool {
            v.is_finite() && v > 0.0
        }
        if !positive(self.max_radius_feet) {
            return Err(ConfigError::MaxRadiusFeet(self.max_radius_feet));
        }
        if !positive(self.max_radius_pixels) {
            return Err(ConfigError::MaxRadiusPixels(self.max_radius_pixels));
        }
        if !positive(self.grid_spacing_feet) {
            return Err(ConfigError::GridSpacingFeet(self.grid_spacing_feet));
        }
        if !positive(self.sphere_radius) {
            return Err(ConfigError::SphereRadius(self.sphere_radius));
        }
        if !self.bulge_factor.is_finite() {
            return Err(ConfigError::BulgeFactor(self.bulge_factor));
        }
        if self.max_radius_feet / self.grid_spacing_feet > Self::MAX_GRID_DIVISIONS {
            return Err(ConfigError::GridTooDense {
                max_radius_feet: self.max_radius_feet,
                grid_spacing_feet: self.grid_spacing_feet,
            });
        }
        if !(2..=Self::MAX_GRID_SAMPLES).contains(&self.grid_samples) {
            return Err(ConfigError::GridSamples(self.grid_samples));
        }
        Ok(())
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
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            max_radius_feet: 33.0,
            max_radius_pixels: 165.0,
            grid_spacing_feet: 3.0,
            sphere_radius: 165.0,
            bulge_factor: 1.25,
            grid_samples: 24,
            eviction: EvictionPolicy::Never,
        }
    }
}

/// Fluent builder for [`RadarConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RadarConfigBuilder {
    config: RadarConfig,
}

impl RadarConfigBuilder {
    /// Sets the distance that maps to the outer boundary.
    #[must_use]
    pub fn max_radius_feet(mut self, feet: f64) -> Self {
        self.config.max_radius_feet = feet;
        self
    }

    /// Sets the outer boundary radius in pixels.
    #[must_use]
    pub fn max_radius_pixels(mut self, pixels: f64) -> Self {
        self.config.max_radius_pixels = pixels;
        self
    }

    /// Sets the grid spacing in feet.
    #[must_use]
    pub fn grid_spacing_feet(mut self, feet: f64) -> Self {
        self.config.grid_spacing_feet = feet;
        self
    }

    /// Sets the sphere radius and bulge used for every projected point.
    #[must_use]
    pub fn sphere(mut self, radius: f64, bulge_factor: f64) -> Self {
        self.config.sphere_radius = radius;
        self.config.bulge_factor = bulge_factor;
        self
    }

    /// Sets the number of points sampled along each grid line.
    #[must_use]
    pub fn grid_samples(mut self, samples: u32) -> Self {
        self.config.grid_samples = samples;
        self
    }

    /// Sets the eviction policy.
    #[must_use]
    pub fn eviction(mut self, policy: EvictionPolicy) -> Self {
        self.config.eviction = policy;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<RadarConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
