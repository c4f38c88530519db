// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Affine, Point, Size, Vec2};
use understory_guide::resolve::{self, ResolveParams};
use understory_guide::{GuideLayout, Guides, GuidesOptions, HitTarget};
use understory_ruler::{Orientation, RecordingCanvas};

fn snaps(len: usize) -> Vec<f64> {
    (0..len).map(|i| (i as f64) * 7.5).collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("guide/resolve");

    // Snapping is a linear scan over the candidates.
    for len in [0usize, 16, 256, 4_096] {
        let snaps = snaps(len);
        let params = ResolveParams {
            orientation: Orientation::Horizontal,
            zoom: 1.5,
            digits: 2,
            snaps: &snaps,
            snap_threshold: 5.0,
        };
        group.throughput(Throughput::Elements(len.max(1) as u64));
        group.bench_with_input(BenchmarkId::new("resolve", len), &params, |b, params| {
            let offset = Vec2::new(0.0, 120.0);
            let transform = Affine::scale(0.5);
            let mut y = 0.0;
            b.iter(|| {
                y += 3.0;
                black_box(resolve::resolve(
                    params,
                    offset,
                    transform,
                    Vec2::new(0.0, black_box(y)),
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("sort_snaps", len), &snaps, |b, snaps| {
            b.iter(|| black_box(resolve::sort_snaps_by_distance(snaps, black_box(1_234.5))));
        });
    }

    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("guide/gesture");

    for guides in [0usize, 64, 1_024] {
        let options = GuidesOptions::default()
            .with_snaps(snaps(64), 5.0)
            .with_default_guides(snaps(guides));
        group.bench_with_input(
            BenchmarkId::new("create_from_ruler", guides),
            &options,
            |b, options| {
                b.iter_batched(
                    || {
                        let canvas = RecordingCanvas::new(Size::new(1_024.0, 30.0));
                        let mut guides = Guides::new(canvas, options.clone());
                        guides.mount();
                        guides
                    },
                    |mut guides| {
                        let layout = GuideLayout::default();
                        guides.pointer_down(HitTarget::Ruler, Point::ZERO, &layout);
                        for step in 1..=32 {
                            guides.pointer_move(Point::new(0.0, f64::from(step) * 11.3));
                            black_box(guides.view());
                        }
                        black_box(guides.pointer_up(Point::new(0.0, 361.6)));
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_gesture);
criterion_main!(benches);
