// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::angle::angle_for;
use crate::config::{ConfigError, EvictionPolicy, RadarConfig};
use crate::motion::{DeviceSpatialState, MotionEstimator};
use crate::radial::RadialMapper;
use crate::sphere::{ProjectedPoint, SphereProjector};
use crate::trace::TrackerTrace;

/// One device as reported by a scan tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanReading {
    /// Stable device identity.
    pub identity: String,
    /// Estimated distance in feet.
    pub distance_feet: f64,
}

impl ScanReading {
    /// Creates a reading.
    #[must_use]
    pub fn new(identity: impl Into<String>, distance_feet: f64) -> Self {
        Self {
            identity: identity.into(),
            distance_feet,
        }
    }
}

/// Summary of one [`DeviceTracker::ingest_scan`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Number of readings processed.
    pub sighted: usize,
    /// Identities seen for the first time this tick, in reading order.
    pub first_sightings: SmallVec<[String; 4]>,
    /// Identities dropped by the eviction policy this tick, sorted.
    pub evicted: SmallVec<[String; 4]>,
}

/// Owns the per-device state map and turns sightings into projected points.
///
/// Each sighting runs the full pipeline:
/// 1. Bearing from [`angle_for`] on first sighting only; it never changes after.
/// 2. Distance sanitized and clamped into `[0, max_radius_feet]`.
/// 3. Grid-snapped position from the [`RadialMapper`].
/// 4. Motion refreshed against that snapped, unprojected position.
/// 5. [`SphereProjector`] output returned for display.
///
/// Devices stay in the map until the [`EvictionPolicy`] drops them or the
/// caller removes them.
#[derive(Clone, Debug)]
pub struct DeviceTracker {
    mapper: RadialMapper,
    projector: SphereProjector,
    eviction: EvictionPolicy,
    states: HashMap<String, DeviceSpatialState>,
}

impl DeviceTracker {
    /// Creates an empty tracker for `config`.
    pub fn new(config: &RadarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &RadarConfig) -> Self {
        Self {
            mapper: RadialMapper::new(config),
            projector: SphereProjector::new(config),
            eviction: config.eviction,
            states: HashMap::new(),
        }
    }

    /// The distance-to-position mapper.
    #[must_use]
    pub fn mapper(&self) -> &RadialMapper {
        &self.mapper
    }

    /// The projector shared by every point of the scene.
    #[must_use]
    pub fn projector(&self) -> &SphereProjector {
        &self.projector
    }

    /// Current eviction policy.
    #[must_use]
    pub fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    /// Replaces the eviction policy. Takes effect at the next eviction pass.
    pub fn set_eviction(&mut self, policy: EvictionPolicy) {
        self.eviction = policy;
    }

    /// Records a sighting and returns the projected point for display.
    pub fn position_of(
        &mut self,
        identity: &str,
        distance_feet: f64,
        now_ms: u64,
    ) -> ProjectedPoint {
        self.position_of_with_trace(identity, distance_feet, now_ms, &mut ())
    }

    /// Like [`DeviceTracker::position_of`], reporting to `trace`.
    pub fn position_of_with_trace<T>(
        &mut self,
        identity: &str,
        distance_feet: f64,
        now_ms: u64,
        trace: &mut T,
    ) -> ProjectedPoint
    where
        T: TrackerTrace + ?Sized,
    {
        let distance = self.mapper.clamp_distance(distance_feet);
        if !distance_feet.is_finite() || distance_feet < 0.0 {
            trace.distance_sanitized(identity, distance_feet, distance);
        }

        let position = match self.states.get_mut(identity) {
            Some(state) => {
                let angle = state.angle_radians;
                let position = self.mapper.place(distance, angle);
                *state =
                    MotionEstimator::update(Some(&*state), position, distance, angle, now_ms);
                trace.sighting(identity, state);
                position
            }
            None => {
                let angle = angle_for(identity);
                let position = self.mapper.place(distance, angle);
                let state = MotionEstimator::update(None, position, distance, angle, now_ms);
                trace.first_sighting(identity, &state);
                self.states.insert(identity.into(), state);
                position
            }
        };
        self.projector.project(position)
    }

    /// Processes one scan tick: every reading, then one eviction pass.
    ///
    /// The whole tick is applied before this returns, so a frame built
    /// afterwards never sees a half-updated device set. A device repeated
    /// within one tick is refreshed twice at the same timestamp, which leaves
    /// it with zero motion.
    pub fn ingest_scan(&mut self, readings: &[ScanReading], now_ms: u64) -> ScanOutcome {
        self.ingest_scan_with_trace(readings, now_ms, &mut ())
    }

    /// Like [`DeviceTracker::ingest_scan`], reporting to `trace`.
    pub fn ingest_scan_with_trace<T>(
        &mut self,
        readings: &[ScanReading],
        now_ms: u64,
        trace: &mut T,
    ) -> ScanOutcome
    where
        T: TrackerTrace + ?Sized,
    {
        let mut outcome = ScanOutcome::default();
        for reading in readings {
            if !self.states.contains_key(reading.identity.as_str()) {
                outcome.first_sightings.push(reading.identity.clone());
            }
            self.position_of_with_trace(&reading.identity, reading.distance_feet, now_ms, trace);
            outcome.sighted += 1;
        }
        outcome.evicted = self.evict_stale_with_trace(now_ms, trace);
        outcome
    }

    /// Drops devices the eviction policy considers stale at `now_ms`.
    ///
    /// Returns the dropped identities, sorted.
    pub fn evict_stale(&mut self, now_ms: u64) -> SmallVec<[String; 4]> {
        self.evict_stale_with_trace(now_ms, &mut ())
    }

    /// Like [`DeviceTracker::evict_stale`], reporting to `trace`.
    pub fn evict_stale_with_trace<T>(
        &mut self,
        now_ms: u64,
        trace: &mut T,
    ) -> SmallVec<[String; 4]>
    where
        T: TrackerTrace + ?Sized,
    {
        let mut evicted = SmallVec::new();
        let policy = self.eviction;
        if policy == EvictionPolicy::Never {
            return evicted;
        }
        self.states.retain(|identity, state| {
            if policy.is_stale(state.timestamp_ms, now_ms) {
                trace.evicted(identity, state.timestamp_ms);
                evicted.push(identity.clone());
                false
            } else {
                true
            }
        });
        evicted.sort_unstable();
        evicted
    }

    /// State of a tracked device.
    #[must_use]
    pub fn state(&self, identity: &str) -> Option<&DeviceSpatialState> {
        self.states.get(identity)
    }

    /// Projection of a tracked device's current position.
    #[must_use]
    pub fn projected(&self, identity: &str) -> Option<ProjectedPoint> {
        self.state(identity)
            .map(|state| self.projector.project(state.position))
    }

    /// Kinematic prediction of a tracked device `dt_secs` ahead, unprojected.
    #[must_use]
    pub fn predict(&self, identity: &str, dt_secs: f64) -> Option<Point> {
        self.state(identity).map(|state| state.predict(dt_secs))
    }

    /// Iterates over tracked devices in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceSpatialState)> + '_ {
        self.states.iter().map(|(id, state)| (id.as_str(), state))
    }

    /// Returns `true` if `identity` is tracked.
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.states.contains_key(identity)
    }

    /// Number of tracked devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no devices are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Stops tracking `identity`, returning its last state.
    pub fn remove(&mut self, identity: &str) -> Option<DeviceSpatialState> {
        self.states.remove(identity)
    }

    /// Stops tracking every device.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

impl Default for DeviceTracker {
    fn default() -> Self {
        Self::from_valid(&RadarConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Point, Vec2};

    use super::{DeviceTracker, ScanReading};
    use crate::trace::{TraceLog, TrackerEvent};
    use crate::{ConfigError, EvictionPolicy, ProjectedPoint, RadarConfig, angle_for};

    #[test]
    fn zero_distance_renders_at_nucleus() {
        let mut tracker = DeviceTracker::default();
        let p = tracker.position_of("beacon", 0.0, 0);
        assert_eq!(p, ProjectedPoint::CENTER);
    }

    #[test]
    fn first_sighting_creates_state_at_rest() {
        let mut tracker = DeviceTracker::default();
        tracker.position_of("alice", 6.0, 1_000);

        let state = tracker.state("alice").unwrap();
        assert_eq!(state.angle_radians, angle_for("alice"));
        assert_eq!(state.distance_feet, 6.0);
        assert_eq!(state.velocity, Vec2::ZERO);
        assert_eq!(state.timestamp_ms, 1_000);
        assert_eq!(
            state.position,
            tracker.mapper().place(6.0, angle_for("alice"))
        );
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn returned_point_is_projection_of_snapped_position() {
        let mut tracker = DeviceTracker::default();
        let p = tracker.position_of("bob", 20.0, 0);
        let state = tracker.state("bob").unwrap();
        assert_eq!(p, tracker.projector().project(state.position));
        assert_eq!(tracker.projected("bob"), Some(p));
        assert!(p.depth < 1.0);
    }

    #[test]
    fn motion_is_estimated_on_unprojected_positions() {
        let mut tracker = DeviceTracker::default();
        // "Z" has a bearing of exactly 90 degrees: straight along +y.
        tracker.position_of("Z", 0.0, 0);
        tracker.position_of("Z", 3.0, 1_000);
        tracker.position_of("Z", 6.0, 2_000);

        let state = tracker.state("Z").unwrap();
        // 3ft = 15px per second, one grid cell.
        assert!(state.velocity.x.abs() < 1e-9);
        assert!((state.velocity.y - 15.0).abs() < 1e-9);
        assert!(state.acceleration.hypot() < 1e-9);

        let ahead = tracker.predict("Z", 1.0).unwrap();
        assert!((ahead.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_is_fixed_after_first_sighting() {
        let mut tracker = DeviceTracker::default();
        tracker.position_of("carol", 10.0, 0);
        let angle = tracker.state("carol").unwrap().angle_radians;
        for (i, d) in [3.0, 30.0, 0.0, 15.0].into_iter().enumerate() {
            tracker.position_of("carol", d, 1_000 * (i as u64 + 1));
            assert_eq!(tracker.state("carol").unwrap().angle_radians, angle);
        }
    }

    #[test]
    fn malformed_distance_is_clamped_and_traced() {
        let mut tracker = DeviceTracker::default();
        let mut log = TraceLog::new();
        for d in [f64::NAN, -4.0, f64::INFINITY] {
            let p = tracker.position_of_with_trace("dave", d, 0, &mut log);
            assert_eq!(p, ProjectedPoint::CENTER);
        }
        let sanitized = log
            .events()
            .iter()
            .filter(|e| matches!(e, TrackerEvent::DistanceSanitized { used, .. } if *used == 0.0))
            .count();
        assert_eq!(sanitized, 3);
        assert_eq!(tracker.state("dave").unwrap().distance_feet, 0.0);
    }

    #[test]
    fn out_of_range_distance_sits_on_boundary_without_trace() {
        let mut tracker = DeviceTracker::default();
        let mut log = TraceLog::new();
        tracker.position_of_with_trace("Z", 500.0, 0, &mut log);

        let state = tracker.state("Z").unwrap();
        assert_eq!(state.distance_feet, 33.0);
        assert!(state.position.x.abs() < 1e-9);
        assert_eq!(state.position.y, 165.0);
        assert!(matches!(log.events(), [TrackerEvent::FirstSighting { .. }]));
    }

    #[test]
    fn ingest_scan_reports_new_devices() {
        let mut tracker = DeviceTracker::default();
        let scan = vec![ScanReading::new("a", 3.0), ScanReading::new("b", 9.0)];
        let outcome = tracker.ingest_scan(&scan, 0);
        assert_eq!(outcome.sighted, 2);
        assert_eq!(outcome.first_sightings.as_slice(), ["a", "b"]);
        assert!(outcome.evicted.is_empty());

        let outcome = tracker.ingest_scan(&[ScanReading::new("b", 6.0)], 2_000);
        assert_eq!(outcome.sighted, 1);
        assert!(outcome.first_sightings.is_empty());
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn devices_are_sticky_by_default() {
        let mut tracker = DeviceTracker::default();
        tracker.ingest_scan(&[ScanReading::new("ghost", 12.0)], 0);
        let before = *tracker.state("ghost").unwrap();

        for tick in 1..10 {
            tracker.ingest_scan(&[], tick * 60_000);
        }
        assert_eq!(tracker.state("ghost"), Some(&before));
        assert!(tracker.evict_stale(u64::MAX).is_empty());
    }

    #[test]
    fn idle_devices_are_evicted_after_ttl() {
        let config = RadarConfig::builder()
            .eviction(EvictionPolicy::AfterIdle { ttl_ms: 10_000 })
            .build()
            .unwrap();
        let mut tracker = DeviceTracker::new(&config).unwrap();
        let mut log = TraceLog::new();

        tracker.ingest_scan(
            &[ScanReading::new("stays", 3.0), ScanReading::new("leaves", 3.0)],
            0,
        );
        tracker.ingest_scan(&[ScanReading::new("stays", 3.0)], 6_000);
        let outcome =
            tracker.ingest_scan_with_trace(&[ScanReading::new("stays", 3.0)], 12_000, &mut log);

        assert_eq!(outcome.evicted.as_slice(), ["leaves"]);
        assert!(tracker.contains("stays"));
        assert!(!tracker.contains("leaves"));
        assert!(log.events().iter().any(|e| matches!(
            e,
            TrackerEvent::Evicted { identity, last_seen_ms: 0 } if identity == "leaves"
        )));
    }

    #[test]
    fn evicted_device_returns_as_new() {
        let mut tracker = DeviceTracker::default();
        tracker.set_eviction(EvictionPolicy::AfterIdle { ttl_ms: 1 });
        tracker.ingest_scan(&[ScanReading::new("x", 3.0)], 0);
        tracker.ingest_scan(&[], 5);
        let outcome = tracker.ingest_scan(&[ScanReading::new("x", 6.0)], 10);
        assert_eq!(outcome.first_sightings.as_slice(), ["x"]);
        assert_eq!(tracker.state("x").unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn duplicate_reading_in_one_tick_zeroes_motion() {
        let mut tracker = DeviceTracker::default();
        tracker.position_of("Z", 0.0, 0);
        tracker.ingest_scan(
            &[ScanReading::new("Z", 3.0), ScanReading::new("Z", 6.0)],
            1_000,
        );
        let state = tracker.state("Z").unwrap();
        assert_eq!(state.velocity, Vec2::ZERO);
        assert_eq!(state.distance_feet, 6.0);
    }

    #[test]
    fn remove_and_clear() {
        let mut tracker = DeviceTracker::default();
        tracker.position_of("a", 1.0, 0);
        tracker.position_of("b", 2.0, 0);
        assert!(tracker.remove("a").is_some());
        assert!(tracker.remove("a").is_none());
        let ids: Vec<&str> = tracker.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["b"]);
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.predict("b", 1.0), None::<Point>);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RadarConfig {
            grid_spacing_feet: 0.0,
            ..RadarConfig::default()
        };
        assert_eq!(
            DeviceTracker::new(&config).err(),
            Some(ConfigError::GridSpacingFeet(0.0))
        );
    }
}
