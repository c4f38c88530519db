// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_ruler::render::{self, RenderParams};
use understory_ruler::{Orientation, RecordingCanvas, Ruler, RulerOptions};

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("ruler/draw");

    // Longer rulers and higher zoom both grow the tick count linearly.
    for (width, zoom) in [(800.0, 1.0), (1_920.0, 1.0), (1_920.0, 4.0), (4_096.0, 8.0)] {
        let options = RulerOptions::new(Orientation::Horizontal).with_zoom(zoom);
        let size = Size::new(width, 30.0);
        let mut ruler = Ruler::new(RecordingCanvas::new(size), options);
        ruler.resize(None);
        let ticks = ruler.render_params().tick_indices().count();
        group.throughput(Throughput::Elements(ticks as u64));

        let id = BenchmarkId::new("horizontal", format!("{width}px@{zoom}x"));
        group.bench_function(id, |b| {
            let mut scroll = 0.0;
            b.iter(|| {
                ruler.canvas_mut().clear_commands();
                scroll += 13.0;
                ruler.scroll(black_box(scroll), None);
            });
        });
    }

    group.finish();
}

fn bench_tick_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("ruler/geometry");
    let options = RulerOptions::new(Orientation::Vertical).with_segment(10);
    let size = Size::new(30.0, 2_160.0);

    for scroll in [0.0, -5_000.0, 1.0e6] {
        let params = RenderParams::new(&options, size, scroll, 2.0);
        group.bench_with_input(
            BenchmarkId::new("tick_lines", scroll),
            &params,
            |b, params| b.iter(|| black_box(render::tick_lines(&options, params))),
        );
        group.bench_with_input(
            BenchmarkId::new("label_ticks", scroll),
            &params,
            |b, params| b.iter(|| black_box(render::label_ticks(&options, params))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_draw, bench_tick_geometry);
criterion_main!(benches);
