// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch/rotate recognizer that owns the radar [`ViewState`].
//!
//! ## Usage
//!
//! 1) Each frame, pass the host's active touch points to
//!    [`GestureController::update_touches`].
//! 2) Exactly two touches begin a [`GestureSession`] capturing the baseline
//!    separation, angle, scale, and rotation.
//! 3) While two touches remain, each update rewrites the view state relative
//!    to that baseline.
//! 4) Dropping below two touches discards the session; motion stops at once.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use findable_gesture::{GestureController, GestureEvent};
//!
//! let mut gestures = GestureController::new();
//!
//! // Two fingers land 100px apart.
//! let began = gestures.update_touches(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
//! assert!(matches!(began, Some(GestureEvent::Began(_))));
//!
//! // Spread them to 200px: the view doubles in scale.
//! gestures.update_touches(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)]);
//! assert_eq!(gestures.view_state().scale, 2.0);
//!
//! // Lift one finger.
//! let ended = gestures.update_touches(&[Point::new(0.0, 0.0)]);
//! assert!(matches!(ended, Some(GestureEvent::Ended(_))));
//! ```

use kurbo::{Point, Vec2};

use findable_view::{ScaleLimits, ViewState, ViewTransform};

/// Baseline captured when two-finger contact begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    /// Distance between the two touches at gesture start.
    pub initial_touch_distance: f64,
    /// `atan2(dy, dx)` from the first touch to the second at gesture start.
    pub initial_touch_angle: f64,
    /// View scale at gesture start.
    pub initial_scale: f64,
    /// View rotation at gesture start.
    pub initial_rotation: f64,
}

impl GestureSession {
    fn capture(a: Point, b: Point, view: ViewState) -> Self {
        let span = b - a;
        Self {
            initial_touch_distance: span.length(),
            initial_touch_angle: span.atan2(),
            initial_scale: view.scale,
            initial_rotation: view.rotation,
        }
    }

    /// Computes the view for the current touch pair relative to this baseline.
    ///
    /// Coincident baseline touches leave the scale at its initial value; the
    /// rotation is still tracked.
    #[must_use]
    pub fn resolve(&self, a: Point, b: Point, limits: &ScaleLimits) -> ViewState {
        let span: Vec2 = b - a;
        let scale = if self.initial_touch_distance == 0.0 {
            self.initial_scale
        } else {
            limits.clamp(span.length() / self.initial_touch_distance * self.initial_scale)
        };
        let rotation = self.initial_rotation + (span.atan2() - self.initial_touch_angle);
        ViewState { rotation, scale }
    }
}

/// Recognizer phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No two-finger gesture in progress.
    #[default]
    Idle,
    /// Exactly two touches were down when the current session began.
    TwoFingerActive,
}

/// Transition reported by [`GestureController::update_touches`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A session began with this baseline.
    Began(GestureSession),
    /// The view changed to this state.
    Changed(ViewState),
    /// The session ended; the view holds this final state.
    Ended(ViewState),
}

/// Owns the radar [`ViewState`] and the current [`GestureSession`].
///
/// One controller is created per radar screen. Only frames with exactly two
/// touches drive it; single-finger drags belong to other interactions.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    view: ViewState,
    limits: ScaleLimits,
    session: Option<GestureSession>,
}

impl GestureController {
    /// Creates an idle controller with the identity view and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle controller with custom scale limits.
    #[must_use]
    pub fn with_scale_limits(limits: ScaleLimits) -> Self {
        Self {
            view: ViewState::IDENTITY.clamped(&limits),
            limits,
            session: None,
        }
    }

    /// Current view state.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.view
    }

    /// Transform for the current view state.
    #[must_use]
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform::from_state(&self.view)
    }

    /// Current scale limits.
    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Replaces the scale limits and re-clamps the current scale.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        self.limits = ScaleLimits::new(min, max);
        self.view = self.view.clamped(&self.limits);
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        if self.session.is_some() {
            GesturePhase::TwoFingerActive
        } else {
            GesturePhase::Idle
        }
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Feeds this frame's active touch points.
    ///
    /// - Two touches while idle begin a session.
    /// - Two touches while active update the view.
    /// - Fewer than two touches while active end the session.
    /// - Three or more touches neither begin nor update; an active session
    ///   stays captured until the count drops below two.
    /// - A pair whose separation is not finite (a NaN or infinite coordinate)
    ///   is skipped: no session begins and the view is left as it was.
    pub fn update_touches(&mut self, touches: &[Point]) -> Option<GestureEvent> {
        match (touches, self.session) {
            ([a, b], _) if !(*b - *a).is_finite() => None,
            ([a, b], None) => {
                let session = GestureSession::capture(*a, *b, self.view);
                self.session = Some(session);
                Some(GestureEvent::Began(session))
            }
            ([a, b], Some(session)) => {
                let next = session.resolve(*a, *b, &self.limits);
                // Written as one value so rotation and scale never tear.
                self.view = next;
                Some(GestureEvent::Changed(next))
            }
            (t, Some(_)) if t.len() < 2 => {
                self.session = None;
                Some(GestureEvent::Ended(self.view))
            }
            _ => None,
        }
    }

    /// Ends any active session without changing the view.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.session.take().map(|_| GestureEvent::Ended(self.view))
    }

    /// Sets scale 1 and rotation 0, bypassing the recognizer.
    ///
    /// An active session is discarded so the next two-finger frame captures a
    /// fresh baseline instead of snapping back to the old one.
    pub fn reset_view(&mut self) {
        self.session = None;
        self.view = ViewState::IDENTITY.clamped(&self.limits);
    }

    /// Replaces the view state directly, clamping the scale.
    ///
    /// A non-finite rotation is ignored and the current view is kept.
    pub fn set_view_state(&mut self, view: ViewState) {
        if !view.rotation.is_finite() {
            return;
        }
        self.view = view.clamped(&self.limits);
    }
}
