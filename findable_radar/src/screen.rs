// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use findable_gesture::{GestureController, GestureEvent};
use findable_view::{ViewState, ViewTransform};
use hashbrown::HashSet;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::config::{ConfigError, RadarConfig};
use crate::sphere::SphereProjector;
use crate::trace::TrackerTrace;
use crate::tracker::{DeviceTracker, ScanOutcome, ScanReading};

/// How a tracked device is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// A nearby device the user has not exchanged with yet.
    Blip,
    /// A device the user already exchanged contact info with.
    Link,
}

/// One device placed on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Device identity.
    pub identity: String,
    /// Blip or link marker.
    pub kind: MarkerKind,
    /// Screen position in pixels.
    pub screen: Point,
    /// Depth factor in `(0, 1]` for scaling and fading.
    pub depth: f64,
}

/// Flat → sphere → view → screen, for one frame.
///
/// Every point of a frame goes through the same pipeline value, so grid lines
/// and markers always share projection parameters and view transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePipeline {
    projector: SphereProjector,
    transform: ViewTransform,
    nucleus: Point,
}

impl ScenePipeline {
    /// Creates a pipeline from its parts.
    #[must_use]
    pub fn new(projector: SphereProjector, transform: ViewTransform, nucleus: Point) -> Self {
        Self {
            projector,
            transform,
            nucleus,
        }
    }

    /// The view transform used for this frame.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// The nucleus used for this frame.
    #[must_use]
    pub fn nucleus(&self) -> Point {
        self.nucleus
    }

    /// Maps a flat, nucleus-relative point to a screen point and depth.
    #[must_use]
    pub fn place(&self, flat: Point) -> (Point, f64) {
        let projected = self.projector.project(flat);
        let screen = self
            .transform
            .to_screen(self.nucleus, projected.position.to_vec2());
        (screen, projected.depth)
    }

    /// Maps a flat, nucleus-relative point to a screen point.
    #[must_use]
    pub fn place_point(&self, flat: Point) -> Point {
        self.place(flat).0
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Screen point of the nucleus.
    pub nucleus: Point,
    /// View state the frame was built with.
    pub view: ViewState,
    /// Tracked devices, ordered by identity.
    pub markers: Vec<Marker>,
    /// Grid lines as screen-space polylines.
    pub grid_lines: Vec<Vec<Point>>,
    /// The range boundary as a closed screen-space polyline.
    pub boundary_ring: Vec<Point>,
}

impl Frame {
    /// Looks up the marker for `identity`.
    #[must_use]
    pub fn marker(&self, identity: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.identity == identity)
    }

    /// The marker nearest to `screen` within `tolerance` pixels.
    #[must_use]
    pub fn hit_test(&self, screen: Point, tolerance: f64) -> Option<&Marker> {
        let limit = tolerance * tolerance;
        self.markers
            .iter()
            .map(|m| (m, (m.screen - screen).hypot2()))
            .filter(|(_, d2)| *d2 <= limit)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(m, _)| m)
    }
}

/// The positioning engine for one radar screen.
///
/// Owns the device tracker, the gesture controller (and with it the view
/// state), and the set of linked identities. Create one per screen; nothing
/// here is shared or global.
///
/// ```rust
/// use kurbo::Point;
/// use findable_radar::{MarkerKind, RadarConfig, RadarScreen, ScanReading};
///
/// let mut screen = RadarScreen::new(RadarConfig::default()).unwrap();
/// screen.ingest_scan(&[ScanReading::new("phone-a", 0.0)], 0);
/// screen.mark_linked("phone-a");
///
/// let nucleus = Point::new(200.0, 400.0);
/// let frame = screen.frame(nucleus);
/// let marker = frame.marker("phone-a").unwrap();
/// assert_eq!(marker.kind, MarkerKind::Link);
/// assert_eq!(marker.screen, nucleus);
/// ```
#[derive(Clone, Debug)]
pub struct RadarScreen {
    config: RadarConfig,
    tracker: DeviceTracker,
    gestures: GestureController,
    linked: HashSet<String>,
}

impl RadarScreen {
    /// Creates an empty screen for `config`.
    pub fn new(config: RadarConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            tracker: DeviceTracker::new(&config)?,
            config,
            gestures: GestureController::new(),
            linked: HashSet::new(),
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// The device tracker.
    #[must_use]
    pub fn tracker(&self) -> &DeviceTracker {
        &self.tracker
    }

    /// Mutable access to the device tracker.
    pub fn tracker_mut(&mut self) -> &mut DeviceTracker {
        &mut self.tracker
    }

    /// The gesture controller.
    #[must_use]
    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// Mutable access to the gesture controller.
    pub fn gestures_mut(&mut self) -> &mut GestureController {
        &mut self.gestures
    }

    /// Current view state.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.gestures.view_state()
    }

    /// Applies one scan tick.
    pub fn ingest_scan(&mut self, readings: &[ScanReading], now_ms: u64) -> ScanOutcome {
        self.tracker.ingest_scan(readings, now_ms)
    }

    /// Like [`RadarScreen::ingest_scan`], reporting to `trace`.
    pub fn ingest_scan_with_trace<T>(
        &mut self,
        readings: &[ScanReading],
        now_ms: u64,
        trace: &mut T,
    ) -> ScanOutcome
    where
        T: TrackerTrace + ?Sized,
    {
        self.tracker.ingest_scan_with_trace(readings, now_ms, trace)
    }

    /// Feeds this frame's active touch points to the gesture controller.
    pub fn handle_touches(&mut self, touches: &[Point]) -> Option<GestureEvent> {
        self.gestures.update_touches(touches)
    }

    /// The "reset view" control: scale 1, rotation 0.
    pub fn reset_view(&mut self) {
        self.gestures.reset_view();
    }

    /// Marks `identity` as exchanged with. Returns `true` if newly linked.
    pub fn mark_linked(&mut self, identity: impl Into<String>) -> bool {
        self.linked.insert(identity.into())
    }

    /// Removes a link. Returns `true` if it was present.
    pub fn unlink(&mut self, identity: &str) -> bool {
        self.linked.remove(identity)
    }

    /// Returns `true` if `identity` is linked.
    #[must_use]
    pub fn is_linked(&self, identity: &str) -> bool {
        self.linked.contains(identity)
    }

    /// Linked identities, in arbitrary order.
    pub fn linked(&self) -> impl Iterator<Item = &str> + '_ {
        self.linked.iter().map(String::as_str)
    }

    /// The point pipeline for a frame centred on `nucleus`.
    #[must_use]
    pub fn pipeline(&self, nucleus: Point) -> ScenePipeline {
        ScenePipeline::new(
            *self.tracker.projector(),
            self.gestures.view_transform(),
            nucleus,
        )
    }

    /// Builds the render data for one frame.
    #[must_use]
    pub fn frame(&self, nucleus: Point) -> Frame {
        let pipeline = self.pipeline(nucleus);

        let mut markers: Vec<Marker> = self
            .tracker
            .iter()
            .map(|(identity, state)| {
                let (screen, depth) = pipeline.place(state.position);
                Marker {
                    identity: identity.into(),
                    kind: if self.linked.contains(identity) {
                        MarkerKind::Link
                    } else {
                        MarkerKind::Blip
                    },
                    screen,
                    depth,
                }
            })
            .collect();
        markers.sort_unstable_by(|a, b| a.identity.cmp(&b.identity));

        Frame {
            nucleus,
            view: self.gestures.view_state(),
            markers,
            grid_lines: self.grid_lines(&pipeline),
            boundary_ring: self.boundary_ring(&pipeline),
        }
    }

    /// Chords of the circular range at every grid multiple, both axes.
    fn grid_lines(&self, pipeline: &ScenePipeline) -> Vec<Vec<Point>> {
        let radius = self.config.max_radius_pixels;
        let spacing = self.config.grid_pixel_spacing();
        let samples = self.config.grid_samples;

        let mut lines = Vec::new();
        let mut step = 0_u32;
        loop {
            let offset = f64::from(step) * spacing;
            let half = (radius * radius - offset * offset).max(0.0).sqrt();
            if half <= 0.0 {
                break;
            }
            let offsets: &[f64] = if step == 0 { &[0.0] } else { &[offset, -offset] };
            for &c in offsets {
                lines.push(chord(pipeline, samples, half, |t| Point::new(c, t)));
                lines.push(chord(pipeline, samples, half, |t| Point::new(t, c)));
            }
            step += 1;
        }
        lines
    }

    fn boundary_ring(&self, pipeline: &ScenePipeline) -> Vec<Point> {
        let radius = self.config.max_radius_pixels;
        let segments = self.config.grid_samples.saturating_mul(4);
        (0..=segments)
            .map(|i| {
                let angle = core::f64::consts::TAU * f64::from(i) / f64::from(segments);
                pipeline.place_point((Vec2::from_angle(angle) * radius).to_point())
            })
            .collect()
    }
}

fn chord(
    pipeline: &ScenePipeline,
    samples: u32,
    half: f64,
    at: impl Fn(f64) -> Point,
) -> Vec<Point> {
    let last = f64::from(samples - 1);
    (0..samples)
        .map(|i| {
            let t = -half + 2.0 * half * f64::from(i) / last;
            pipeline.place_point(at(t))
        })
        .collect()
}
