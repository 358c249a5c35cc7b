// Copyright 2025 the Findable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use findable_radar::{DeviceTracker, EvictionPolicy, RadarConfig, ScanReading, angle_for};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }
}

fn identities(n: u32) -> Vec<String> {
    (0..n).map(|i| format!("device-{i:05}")).collect()
}

fn scan(ids: &[String], rng: &mut Lcg) -> Vec<ScanReading> {
    ids.iter()
        .map(|id| ScanReading::new(id.as_str(), rng.next_f64() * 40.0))
        .collect()
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("findable_tracker");
    group.sample_size(50);

    group.bench_function("angle_for(64 ids)", |b| {
        let ids = identities(64);
        b.iter(|| {
            for id in &ids {
                black_box(angle_for(id));
            }
        });
    });

    for &n in &[16_u32, 256_u32, 4_096_u32] {
        let ids = identities(n);

        group.bench_function(format!("first_scan(n={n})"), |b| {
            b.iter_batched(
                || {
                    let tracker = DeviceTracker::new(&RadarConfig::default()).unwrap();
                    let readings = scan(&ids, &mut Lcg::new(0xF1_0000_0000_0001));
                    (tracker, readings)
                },
                |(mut tracker, readings)| {
                    black_box(tracker.ingest_scan(&readings, 0));
                    black_box(tracker);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("steady_scan(n={n})"), |b| {
            let mut rng = Lcg::new(0xF1_0000_0000_0002);
            let mut tracker = DeviceTracker::new(&RadarConfig::default()).unwrap();
            tracker.ingest_scan(&scan(&ids, &mut rng), 0);
            let ticks: Vec<Vec<ScanReading>> = (0..8).map(|_| scan(&ids, &mut rng)).collect();
            let mut now = 0_u64;
            b.iter(|| {
                now += 1_000;
                let readings = &ticks[(now / 1_000) as usize % ticks.len()];
                black_box(tracker.ingest_scan(readings, now));
            });
        });

        group.bench_function(format!("evict_half(n={n})"), |b| {
            let config = RadarConfig::builder()
                .eviction(EvictionPolicy::AfterIdle { ttl_ms: 500 })
                .build()
                .unwrap();
            let half = &ids[..ids.len() / 2];
            b.iter_batched(
                || {
                    let mut rng = Lcg::new(0xF1_0000_0000_0003);
                    let mut tracker = DeviceTracker::new(&config).unwrap();
                    tracker.ingest_scan(&scan(&ids, &mut rng), 0);
                    (tracker, scan(half, &mut rng))
                },
                |(mut tracker, readings)| {
                    black_box(tracker.ingest_scan(&readings, 1_000));
                    black_box(tracker);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tracker);
criterion_main!(benches);
