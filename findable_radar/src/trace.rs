// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics hooks for the device tracker.
//!
//! The tracker does not log on its own. Callers that want to know why a marker
//! moved, which inputs were malformed, or when a device was dropped pass a
//! [`TrackerTrace`] sink to the `*_with_trace` entry points on
//! [`DeviceTracker`](crate::DeviceTracker). The unit type `()` is the no-op
//! sink; [`TraceLog`] records everything into a `Vec` for inspection or for
//! forwarding to the host's logger.

use alloc::string::String;
use alloc::vec::Vec;

use crate::motion::DeviceSpatialState;

/// A callback sink for tracker events.
pub trait TrackerTrace {
    /// A device identity was seen for the first time.
    fn first_sighting(&mut self, identity: &str, state: &DeviceSpatialState);

    /// A known device was seen again and its state refreshed.
    fn sighting(&mut self, identity: &str, state: &DeviceSpatialState);

    /// A negative or non-finite distance was replaced before use.
    fn distance_sanitized(&mut self, identity: &str, reported: f64, used: f64);

    /// A device was dropped by the eviction policy.
    fn evicted(&mut self, identity: &str, last_seen_ms: u64);
}

impl TrackerTrace for () {
    fn first_sighting(&mut self, _identity: &str, _state: &DeviceSpatialState) {}

    fn sighting(&mut self, _identity: &str, _state: &DeviceSpatialState) {}

    fn distance_sanitized(&mut self, _identity: &str, _reported: f64, _used: f64) {}

    fn evicted(&mut self, _identity: &str, _last_seen_ms: u64) {}
}

/// A recorded tracker event.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    /// See [`TrackerTrace::first_sighting`].
    FirstSighting {
        /// Device identity.
        identity: String,
        /// State after the sighting.
        state: DeviceSpatialState,
    },
    /// See [`TrackerTrace::sighting`].
    Sighting {
        /// Device identity.
        identity: String,
        /// State after the sighting.
        state: DeviceSpatialState,
    },
    /// See [`TrackerTrace::distance_sanitized`].
    DistanceSanitized {
        /// Device identity.
        identity: String,
        /// Distance as reported by the scanner.
        reported: f64,
        /// Distance actually used.
        used: f64,
    },
    /// See [`TrackerTrace::evicted`].
    Evicted {
        /// Device identity.
        identity: String,
        /// Timestamp of the final sighting.
        last_seen_ms: u64,
    },
}

impl TrackerEvent {
    /// The device this event concerns.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::FirstSighting { identity, .. }
            | Self::Sighting { identity, .. }
            | Self::DistanceSanitized { identity, .. }
            | Self::Evicted { identity, .. } => identity,
        }
    }
}

/// Records every event in order.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    events: Vec<TrackerEvent>,
}

impl TraceLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TrackerEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<TrackerEvent> {
        core::mem::take(&mut self.events)
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TrackerTrace for TraceLog {
    fn first_sighting(&mut self, identity: &str, state: &DeviceSpatialState) {
        self.events.push(TrackerEvent::FirstSighting {
            identity: identity.into(),
            state: *state,
        });
    }

    fn sighting(&mut self, identity: &str, state: &DeviceSpatialState) {
        self.events.push(TrackerEvent::Sighting {
            identity: identity.into(),
            state: *state,
        });
    }

    fn distance_sanitized(&mut self, identity: &str, reported: f64, used: f64) {
        self.events.push(TrackerEvent::DistanceSanitized {
            identity: identity.into(),
            reported,
            used,
        });
    }

    fn evicted(&mut self, identity: &str, last_seen_ms: u64) {
        self.events.push(TrackerEvent::Evicted {
            identity: identity.into(),
            last_seen_ms,
        });
    }
}
