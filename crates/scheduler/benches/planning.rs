// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for classification and full planning over a large corpus.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use duration_model::DurationReport;
use scheduler::{JsonEmitter, PlanEmitter, Scheduler, SchedulerConfig};
use test_catalog::TestFile;

const FOLDERS: &[&str] = &[
    "spec/migrations",
    "spec/lib/gitlab/background_migration",
    "spec/models",
    "spec/services",
    "ee/spec/finders",
    "spec/requests",
    "spec/controllers",
    "spec/features",
    "ee/spec/features",
    "spec/support",
];

/// A corpus spread over every stock category, with some unmatched files.
fn corpus(n: usize) -> Vec<TestFile> {
    (0..n)
        .map(|i| TestFile::new(format!("{}/file_{i}_spec.rb", FOLDERS[i % FOLDERS.len()])))
        .collect()
}

/// Measured durations for every other file.
fn report(files: &[TestFile]) -> DurationReport {
    DurationReport::from_entries(
        files
            .iter()
            .step_by(2)
            .enumerate()
            .map(|(i, f)| (f.clone(), 1.0 + (i % 60) as f64)),
    )
}

fn bench_classify(c: &mut Criterion) {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let mut group = c.benchmark_group("classify");
    for n in [1_000, 20_000] {
        let files = corpus(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &files, |b, files| {
            b.iter(|| scheduler.classifier().classify(black_box(files)))
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let mut group = c.benchmark_group("plan");
    for n in [1_000, 20_000] {
        let files = corpus(n);
        let report = report(&files);
        group.bench_with_input(BenchmarkId::from_parameter(n), &files, |b, files| {
            b.iter(|| scheduler.plan(black_box(files), report.clone()).unwrap())
        });
    }
    group.finish();
}

fn bench_plan_and_emit(c: &mut Criterion) {
    let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
    let emitter = JsonEmitter::new();
    let files = corpus(20_000);
    let report = report(&files);

    c.bench_function("plan_and_emit/20000", |b| {
        b.iter(|| {
            let outcome = scheduler.plan(black_box(&files), report.clone()).unwrap();
            emitter.emit(&outcome).unwrap()
        })
    });
}

criterion_group!(benches, bench_classify, bench_plan, bench_plan_and_emit);
criterion_main!(benches);
