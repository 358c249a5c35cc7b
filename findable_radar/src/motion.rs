// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Everything the engine knows about one device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceSpatialState {
    /// Grid-snapped position relative to the nucleus, before sphere projection.
    pub position: Point,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Pixels per second squared.
    pub acceleration: Vec2,
    /// Distance used for the last placement, in feet.
    pub distance_feet: f64,
    /// Bearing assigned on first sighting, in radians.
    pub angle_radians: f64,
    /// Host timestamp of the last sighting, in milliseconds.
    pub timestamp_ms: u64,
}

impl DeviceSpatialState {
    /// Kinematic extrapolation `dt_secs` seconds ahead:
    /// `position + velocity·dt + ½·acceleration·dt²`.
    #[must_use]
    pub fn predict(&self, dt_secs: f64) -> Point {
        self.position + self.velocity * dt_secs + self.acceleration * (0.5 * dt_secs * dt_secs)
    }
}

/// Finite-difference motion estimation over successive sightings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionEstimator;

impl MotionEstimator {
    /// Refreshes a device state from a new snapped position.
    ///
    /// With no `prior`, velocity and acceleration start at zero. Otherwise
    /// `dt = (now - prior.timestamp) / 1000` seconds; when `dt` is not positive
    /// (a repeated timestamp or a clock that went backwards) velocity and
    /// acceleration are zero instead of dividing by it.
    #[must_use]
    pub fn update(
        prior: Option<&DeviceSpatialState>,
        position: Point,
        distance_feet: f64,
        angle_radians: f64,
        now_ms: u64,
    ) -> DeviceSpatialState {
        let (velocity, acceleration) = match prior {
            Some(prior) if now_ms > prior.timestamp_ms => {
                let dt = millis_to_secs(now_ms - prior.timestamp_ms);
                let velocity = (position - prior.position) / dt;
                let acceleration = (velocity - prior.velocity) / dt;
                (velocity, acceleration)
            }
            _ => (Vec2::ZERO, Vec2::ZERO),
        };
        DeviceSpatialState {
            position,
            velocity,
            acceleration,
            distance_feet,
            angle_radians,
            timestamp_ms: now_ms,
        }
    }

    /// See [`DeviceSpatialState::predict`].
    #[must_use]
    pub fn predict(state: &DeviceSpatialState, dt_secs: f64) -> Point {
        state.predict(dt_secs)
    }
}

fn millis_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{DeviceSpatialState, MotionEstimator};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn first_sighting_is_at_rest() {
        let s = MotionEstimator::update(None, Point::new(15.0, 30.0), 7.0, 1.1, 500);
        assert_eq!(s.position, Point::new(15.0, 30.0));
        assert_eq!(s.velocity, Vec2::ZERO);
        assert_eq!(s.acceleration, Vec2::ZERO);
        assert_eq!(s.distance_feet, 7.0);
        assert_eq!(s.angle_radians, 1.1);
        assert_eq!(s.timestamp_ms, 500);
    }

    #[test]
    fn constant_velocity_has_no_acceleration() {
        let s0 = MotionEstimator::update(None, Point::new(0.0, 0.0), 0.0, 0.0, 0);
        let s1 = MotionEstimator::update(Some(&s0), Point::new(10.0, 0.0), 2.0, 0.0, 1_000);
        let s2 = MotionEstimator::update(Some(&s1), Point::new(20.0, 0.0), 4.0, 0.0, 2_000);

        assert!(close(s1.velocity, Vec2::new(10.0, 0.0)));
        assert!(close(s2.velocity, Vec2::new(10.0, 0.0)));
        assert!(close(s2.acceleration, Vec2::ZERO));
    }

    #[test]
    fn speeding_up_shows_acceleration() {
        let s0 = MotionEstimator::update(None, Point::ORIGIN, 0.0, 0.0, 0);
        let s1 = MotionEstimator::update(Some(&s0), Point::new(0.0, 5.0), 1.0, 0.0, 500);
        // 5px over 0.5s.
        assert!(close(s1.velocity, Vec2::new(0.0, 10.0)));
        assert!(close(s1.acceleration, Vec2::new(0.0, 20.0)));

        let s2 = MotionEstimator::update(Some(&s1), Point::new(0.0, 20.0), 4.0, 0.0, 1_000);
        assert!(close(s2.velocity, Vec2::new(0.0, 30.0)));
        assert!(close(s2.acceleration, Vec2::new(0.0, 40.0)));
    }

    #[test]
    fn repeated_timestamp_holds_motion_at_zero() {
        let s0 = MotionEstimator::update(None, Point::ORIGIN, 0.0, 0.0, 1_000);
        let s1 = MotionEstimator::update(Some(&s0), Point::new(30.0, 0.0), 6.0, 0.0, 1_000);
        assert_eq!(s1.position, Point::new(30.0, 0.0));
        assert_eq!(s1.velocity, Vec2::ZERO);
        assert_eq!(s1.acceleration, Vec2::ZERO);
        assert!(s1.velocity.is_finite());
    }

    #[test]
    fn clock_going_backwards_holds_motion_at_zero() {
        let s0 = MotionEstimator::update(None, Point::ORIGIN, 0.0, 0.0, 5_000);
        let s1 = MotionEstimator::update(Some(&s0), Point::new(15.0, 15.0), 4.0, 0.0, 4_000);
        assert_eq!(s1.velocity, Vec2::ZERO);
        assert_eq!(s1.timestamp_ms, 4_000);
    }

    #[test]
    fn predict_extrapolates_kinematically() {
        let s = DeviceSpatialState {
            position: Point::new(10.0, 0.0),
            velocity: Vec2::new(2.0, -1.0),
            acceleration: Vec2::new(4.0, 0.0),
            distance_feet: 2.0,
            angle_radians: 0.0,
            timestamp_ms: 0,
        };
        assert_eq!(s.predict(0.0), s.position);
        // 10 + 2*2 + 0.5*4*4 = 22; 0 - 1*2 = -2.
        let p = s.predict(2.0);
        assert!((p.x - 22.0).abs() < 1e-12);
        assert!((p.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn at_rest_prediction_stays_put() {
        let s = MotionEstimator::update(None, Point::new(45.0, -60.0), 15.0, 0.0, 0);
        assert_eq!(s.predict(3.5), Point::new(45.0, -60.0));
        assert_eq!(MotionEstimator::predict(&s, 3.5), s.predict(3.5));
    }
}
