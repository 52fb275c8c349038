//! Benchmarks for mesh-topology analysis.
//!
//! Run with: cargo bench -p mesh-topology
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-topology -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-topology -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_topology::{EdgeIncidence, analyze, find_connected_components};
use mesh_types::{Facet, Point3, TriangleSoup};
use std::collections::HashMap;

// =============================================================================
// Test Soup Generation
// =============================================================================

/// Create an icosphere soup with the given subdivision level.
fn create_sphere(subdivisions: u32) -> TriangleSoup {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let a = 1.0;
    let b = 1.0 / phi;

    let mut vertices: Vec<Point3<f64>> = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ]
    .iter()
    .map(|&v| Point3::from(Point3::from(v).coords.normalize()))
    .collect();

    let mut faces: Vec<[usize; 3]> = vec![
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    for _ in 0..subdivisions {
        let mut edge_midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);
        for &[v0, v1, v2] in &faces {
            let m01 = get_midpoint(v0, v1, &mut vertices, &mut edge_midpoints);
            let m12 = get_midpoint(v1, v2, &mut vertices, &mut edge_midpoints);
            let m20 = get_midpoint(v2, v0, &mut vertices, &mut edge_midpoints);
            next.push([v0, m01, m20]);
            next.push([v1, m12, m01]);
            next.push([v2, m20, m12]);
            next.push([m01, m12, m20]);
        }
        faces = next;
    }

    faces
        .iter()
        .map(|&[a, b, c]| Facet::from_vertices([vertices[a], vertices[b], vertices[c]]))
        .collect()
}

fn get_midpoint(
    v1: usize,
    v2: usize,
    vertices: &mut Vec<Point3<f64>>,
    edge_midpoints: &mut HashMap<(usize, usize), usize>,
) -> usize {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
    if let Some(&idx) = edge_midpoints.get(&key) {
        return idx;
    }
    let mid = sphere_midpoint(&vertices[v1], &vertices[v2]);
    let idx = vertices.len();
    vertices.push(mid);
    edge_midpoints.insert(key, idx);
    idx
}

fn sphere_midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::from(((a.coords + b.coords) / 2.0).normalize())
}

// =============================================================================
// Analysis Benchmarks
// =============================================================================

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analysis");

    let test_cases = [
        ("cube_12tri", TriangleSoup::unit_cube()),
        ("sphere_320tri", create_sphere(2)),
        ("sphere_5120tri", create_sphere(4)),
        ("sphere_20480tri", create_sphere(5)),
    ];

    for (name, soup) in &test_cases {
        group.throughput(Throughput::Elements(soup.face_count() as u64));
        group.bench_with_input(BenchmarkId::new("analyze", name), soup, |b, soup| {
            b.iter(|| analyze(black_box(soup)));
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stages");
    let soup = create_sphere(4);
    group.throughput(Throughput::Elements(soup.face_count() as u64));

    group.bench_function("edge_incidence", |b| {
        b.iter(|| EdgeIncidence::build(black_box(&soup)));
    });
    group.bench_function("components", |b| {
        b.iter(|| find_connected_components(black_box(&soup)));
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_stages);

criterion_main!(benches);
