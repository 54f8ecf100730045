//! Benchmarks for message handling on the control side.
//!
//! Each iteration gets a fresh bank so automation timelines and node slabs
//! do not grow across iterations.

use std::hint::black_box;

use criterion::{BatchSize, Criterion};
use simple_instruments::{engine::ManualClock, graph::SoftwareGraph, PortBank};

fn bank() -> PortBank<SoftwareGraph, ManualClock> {
    PortBank::with_defaults(SoftwareGraph::new(48_000.0), ManualClock::new(0.0)).unwrap()
}

pub fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("first_note_on", |b| {
        b.iter_batched(
            bank,
            |mut bank| bank.send(0, black_box(&[0x90, 60, 100]), None),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("retrigger", |b| {
        b.iter_batched(
            || {
                let mut bank = bank();
                bank.send(0, &[0x90, 60, 100], None).unwrap();
                bank
            },
            |mut bank| {
                bank.send(0, black_box(&[0x80, 60, 0]), None).unwrap();
                bank.send(0, black_box(&[0x90, 60, 100]), None).unwrap();
                bank
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("ignored_controller", |b| {
        let mut bank = bank();
        b.iter(|| bank.send(0, black_box(&[0xB0, 64, 127]), None))
    });

    group.bench_function("chord_then_all_sound_off", |b| {
        b.iter_batched(
            bank,
            |mut bank| {
                for note in [60u8, 64, 67, 71] {
                    bank.send(1, black_box(&[0x90, note, 100]), None).unwrap();
                }
                bank.send(1, black_box(&[0xB0, 120, 0]), None).unwrap();
                bank
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}
