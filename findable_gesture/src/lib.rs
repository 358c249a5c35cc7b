// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Findable Gesture: the two-finger pinch/rotate state machine for the radar view.
//!
//! This crate provides one small, focused state machine that turns a per-frame
//! list of active touch points into updates of a
//! [`ViewState`](findable_view::ViewState):
//!
//! - [`GestureController`]: owns the view state and the current session.
//! - [`GestureSession`]: the baseline (touch distance, touch angle, scale,
//!   rotation) captured when exactly two touches come down.
//! - [`GesturePhase`]: `Idle` or `TwoFingerActive`.
//! - [`GestureEvent`]: `Began` / `Changed` / `Ended` transitions.
//!
//! ## Design Philosophy
//!
//! - **Relative to a baseline**: each update is computed from the session
//!   baseline, not from the previous frame, so rounding never accumulates.
//! - **Abrupt stop**: when fewer than two touches remain the session is simply
//!   discarded. There is no inertia, timer, or cleanup.
//! - **Atomic view updates**: rotation and scale are written as one value.
//! - **Host-agnostic**: the controller accepts raw [`kurbo::Point`]s and does
//!   not assume any particular event system.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use findable_gesture::{GestureController, GesturePhase};
//!
//! let mut gestures = GestureController::new();
//! gestures.update_touches(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
//! assert_eq!(gestures.phase(), GesturePhase::TwoFingerActive);
//!
//! // The "reset view" control bypasses the recognizer.
//! gestures.reset_view();
//! assert!(gestures.view_state().is_identity());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod two_finger;

pub use two_finger::{GestureController, GestureEvent, GesturePhase, GestureSession};
