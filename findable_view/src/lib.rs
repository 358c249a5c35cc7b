// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Findable View: rotate/zoom state and 2×2 view transforms for the radar display.
//!
//! This crate provides small, headless models of the radar's global view:
//! - [`ViewState`]: the current rotation (radians) and uniform scale.
//! - [`ScaleLimits`]: the allowed scale range, `[0.5, 3.0]` by default.
//! - [`Transform2x2`]: a plain 2×2 linear map with explicit coefficients.
//! - [`ViewTransform`]: the per-frame scale-then-rotate transform derived from
//!   a [`ViewState`] and applied uniformly to every rendered point.
//!
//! It does **not** own any scene or rendering backend. Callers are expected to:
//! - Drive [`ViewState`] from a gesture layer (for example `findable_gesture`).
//! - Build one [`ViewTransform`] per frame and pass every renderable point
//!   (grid lines, blips, link markers) through that same instance so the scene
//!   rotates and zooms as one rigid unit.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use findable_view::{ViewState, ViewTransform};
//!
//! let state = ViewState::new(core::f64::consts::FRAC_PI_2, 2.0);
//! let transform = ViewTransform::from_state(&state);
//!
//! // Scale first (to (20, 0)), then rotate a quarter turn (to (0, 20)).
//! let v = transform.transform_vector(Vec2::new(10.0, 0.0));
//! assert!(v.x.abs() < 1e-9);
//! assert!((v.y - 20.0).abs() < 1e-9);
//!
//! // Screen placement is relative to the nucleus (usually the screen center).
//! let nucleus = Point::new(200.0, 300.0);
//! let screen = transform.to_screen(nucleus, Vec2::new(10.0, 0.0));
//! assert!((screen.y - 320.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Scale is uniform; non-uniform scaling is only available on [`Transform2x2`].
//! - Rotation is unconstrained; callers may normalize it but need not.
//! - There is no pan: the nucleus is fixed and supplied at render time.
//!
//! This crate is `no_std`.

#![no_std]

mod matrix;
mod state;
mod transform;

pub use matrix::Transform2x2;
pub use state::{ScaleLimits, ViewState};
pub use transform::ViewTransform;
