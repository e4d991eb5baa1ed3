//! Benchmarks for line-field clustering.
//!
//! Run with: cargo bench -p field-cluster

#![allow(missing_docs, clippy::cast_precision_loss, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use field_cluster::{ClusterParams, cluster, error_curve, furthest_init};
use field_mesh::Field;
use nalgebra::Vector3;

/// A smoothly rotating field, like principal curvature on a twisted strip.
fn twisted_field(count: usize) -> Field {
    let vectors = (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let angle = std::f64::consts::PI * t;
            Vector3::new(angle.cos(), angle.sin(), 0.3 * (4.0 * angle).sin())
        })
        .collect();
    Field::from_vectors("dir", vectors)
}

fn bench_seeding(c: &mut Criterion) {
    let field = twisted_field(4096);
    let mut group = c.benchmark_group("furthest_init");

    for k in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| furthest_init(black_box(&field), k, 0).unwrap());
        });
    }

    group.finish();
}

fn bench_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");

    for faces in [1024usize, 8192] {
        let field = twisted_field(faces);
        group.throughput(Throughput::Elements(faces as u64));
        group.bench_with_input(BenchmarkId::new("k8", faces), &field, |b, field| {
            b.iter(|| cluster(black_box(field), &ClusterParams::with_clusters(8)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("k8_merge_split", faces), &field, |b, field| {
            let params = ClusterParams::with_clusters(8).with_merge_split(true);
            b.iter(|| cluster(black_box(field), &params).unwrap());
        });
    }

    group.finish();
}

fn bench_error_curve(c: &mut Criterion) {
    let field = twisted_field(2048);
    let mut group = c.benchmark_group("error_curve");
    group.sample_size(20);
    group.bench_function("k1_to_16", |b| {
        b.iter(|| error_curve(black_box(&field), 1..=16, &ClusterParams::default()).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_seeding, bench_cluster, bench_error_curve);
criterion_main!(benches);
