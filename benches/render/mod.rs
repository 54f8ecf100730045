//! Benchmarks for the software signal graph.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use simple_instruments::{engine::ManualClock, graph::SoftwareGraph, PortBank};

use crate::BLOCK_SIZES;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === ONE VOICE ===
        let mut single =
            PortBank::with_defaults(SoftwareGraph::new(48_000.0), ManualClock::new(0.0)).unwrap();
        single.send(0, &[0x90, 69, 100], None).unwrap();

        group.bench_with_input(BenchmarkId::new("one_voice", size), &size, |b, _| {
            b.iter(|| single.graph_mut().render(black_box(&mut buffer)))
        });

        // === FULL BANK ===
        // four-note chord on all sixteen ports
        let mut full =
            PortBank::with_defaults(SoftwareGraph::new(48_000.0), ManualClock::new(0.0)).unwrap();
        for port in 0..16 {
            for note in [48u8, 55, 60, 64] {
                full.send(port, &[0x90, note + port as u8, 100], None).unwrap();
            }
        }

        group.bench_with_input(BenchmarkId::new("sixty_four_voices", size), &size, |b, _| {
            b.iter(|| full.graph_mut().render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
