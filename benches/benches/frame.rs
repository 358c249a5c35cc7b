// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use findable_gesture::GestureController;
use findable_radar::{RadarConfig, RadarScreen, ScanReading};
use kurbo::Point;

const NUCLEUS: Point = Point::new(180.0, 320.0);

fn populated_screen(config: RadarConfig, n: u32) -> RadarScreen {
    let mut screen = RadarScreen::new(config).unwrap();
    let readings: Vec<ScanReading> = (0..n)
        .map(|i| ScanReading::new(format!("device-{i:05}"), f64::from(i % 40)))
        .collect();
    screen.ingest_scan(&readings, 0);
    for i in (0..n).step_by(3) {
        screen.mark_linked(format!("device-{i:05}"));
    }
    screen
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("findable_frame");
    group.sample_size(50);

    for &samples in &[8_u32, 24_u32, 64_u32] {
        let config = RadarConfig::builder().grid_samples(samples).build().unwrap();
        for &n in &[16_u32, 256_u32] {
            let screen = populated_screen(config, n);
            group.bench_function(format!("frame(samples={samples},n={n})"), |b| {
                b.iter(|| black_box(screen.frame(black_box(NUCLEUS))));
            });
        }
    }

    group.bench_function("pinch_rotate_1k_updates", |b| {
        b.iter(|| {
            let mut gestures = GestureController::new();
            gestures.update_touches(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
            for i in 0..1_000_u32 {
                let t = f64::from(i) / 1_000.0;
                let end = Point::new(100.0 + 100.0 * (1.0 + t), 100.0 + 80.0 * t);
                black_box(gestures.update_touches(&[Point::new(100.0, 100.0), end]));
            }
            gestures.update_touches(&[]);
            black_box(gestures.view_state())
        });
    });

    let screen = populated_screen(RadarConfig::default(), 256);
    let frame = screen.frame(NUCLEUS);
    group.bench_function("hit_test(n=256)", |b| {
        b.iter(|| black_box(frame.hit_test(black_box(Point::new(230.0, 300.0)), 12.0)));
    });

    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
