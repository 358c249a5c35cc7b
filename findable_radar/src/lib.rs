// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Findable Radar: the spatial positioning engine behind the proximity radar.
//!
//! Given a stream of `(identity, distance)` readings from a nearby-device
//! scanner, this crate decides where each device is drawn:
//! - [`angle_for`]: a stable bearing derived from the identity string.
//! - [`RadialMapper`]: distance → radius, clamped to the boundary and snapped
//!   to the grid.
//! - [`SphereProjector`]: the globe-like bulge applied to every point, returning
//!   a depth factor for scaling and fading.
//! - [`MotionEstimator`] and [`DeviceSpatialState`]: finite-difference velocity
//!   and acceleration plus kinematic prediction.
//! - [`DeviceTracker`]: per-identity state across scan ticks, with optional
//!   idle eviction and [`TrackerTrace`] diagnostics.
//! - [`RadarScreen`]: the per-screen context that combines the tracker, the
//!   two-finger gesture controller, and the set of linked identities, and
//!   builds a [`Frame`] of markers, grid lines and the boundary ring.
//!
//! Distances are feet and lengths are pixels. Positions handed to the renderer
//! are absolute screen points around a caller-supplied nucleus; everything
//! before the final step is relative to that nucleus.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use findable_radar::{RadarConfig, RadarScreen, ScanReading};
//!
//! let mut screen = RadarScreen::new(RadarConfig::default()).unwrap();
//! screen.ingest_scan(
//!     &[ScanReading::new("alice", 6.0), ScanReading::new("bob", 40.0)],
//!     1_000,
//! );
//!
//! let frame = screen.frame(Point::new(180.0, 320.0));
//! assert_eq!(frame.markers.len(), 2);
//!
//! // Readings beyond the range are pinned to the boundary.
//! let bob = screen.tracker().state("bob").unwrap();
//! assert_eq!(bob.distance_feet, 33.0);
//!
//! // A pinch that doubles the finger spread doubles the view scale.
//! screen.handle_touches(&[Point::new(0.0, 0.0), Point::new(50.0, 0.0)]);
//! screen.handle_touches(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
//! assert!((screen.view_state().scale - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Determinism
//!
//! Nothing here reads a clock or a random source. Timestamps come from the
//! caller, bearings come from the identity, and frames list markers in
//! identity order, so identical inputs always produce identical frames.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod angle;
mod config;
mod motion;
mod radial;
mod screen;
mod sphere;
pub mod trace;
mod tracker;

pub use angle::angle_for;
pub use config::{ConfigError, EvictionPolicy, RadarConfig, RadarConfigBuilder};
pub use motion::{DeviceSpatialState, MotionEstimator};
pub use radial::{RadialMapper, radius_pixels, sanitize_distance};
pub use screen::{Frame, Marker, MarkerKind, RadarScreen, ScenePipeline};
pub use sphere::{ProjectedPoint, SphereProjector, project};
pub use trace::{TraceLog, TrackerEvent, TrackerTrace};
pub use tracker::{DeviceTracker, ScanOutcome, ScanReading};

pub use findable_gesture::{GestureController, GestureEvent, GesturePhase, GestureSession};
pub use findable_view::{ScaleLimits, Transform2x2, ViewState, ViewTransform};
