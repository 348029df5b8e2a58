use ar_indoor_nav::core::{distance_to_destination, plot_route};
use ar_indoor_nav::{Waypoint, WaypointKind};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat4, Vec3};
use std::hint::black_box;

/// Synthetische Route: Zick-Zack-Korridor mit strikt fallender
/// Zieldistanz (keine Unterdrückung, Worst-Case für die Kettenlänge).
fn build_synthetic_route(waypoint_count: usize) -> Vec<Waypoint> {
    (0..waypoint_count)
        .map(|i| {
            let kind = if i == 0 {
                WaypointKind::Start
            } else if i + 1 == waypoint_count {
                WaypointKind::Destination
            } else {
                WaypointKind::Intermediate
            };
            let sway = if i % 2 == 0 { 0.4 } else { -0.4 };
            Waypoint::new(kind, Vec3::new(2.0, sway, 0.0), format!("wp{i}"))
        })
        .collect()
}

fn bench_plot_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot_route");
    let anchor = Mat4::from_rotation_y(0.3);

    for &count in &[100usize, 1_000usize, 10_000usize] {
        let waypoints = build_synthetic_route(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &waypoints, |b, wps| {
            b.iter(|| {
                let plotted = plot_route(black_box(anchor), black_box(wps), 0.1, 0.8);
                black_box(plotted.nodes.len())
            })
        });
    }
    group.finish();
}

fn bench_distance_scan(c: &mut Criterion) {
    let waypoints = build_synthetic_route(10_000);
    // Ausgangspunkt nahe am Listenanfang: nahezu voller Rückwärts-Scan
    let from = waypoints[1].clone();

    c.bench_function("distance_scan_10k", |b| {
        b.iter(|| black_box(distance_to_destination(black_box(&from), black_box(&waypoints))))
    });
}

criterion_group!(benches, bench_plot_route, bench_distance_scan);
criterion_main!(benches);
