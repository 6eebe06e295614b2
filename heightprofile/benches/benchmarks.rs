use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heightprofile::{Cartographic, LinearSpline, Plan, Polyline, Segments};

/// A zig-zag across the White Mountains.
fn polyline(vertices: usize) -> Polyline {
    let line = (0..vertices)
        .map(|i| {
            let lon = -71.4 + 0.002 * i as f64;
            let lat = 44.25 + if i % 2 == 0 { 0.0 } else { 0.03 };
            [lon, lat, 0.0]
        })
        .collect();
    Polyline::wgs84(line)
}

fn resample(vertices: &[Cartographic], resolution_m: f64, max_points: usize) -> usize {
    let segments = Segments::new(vertices).unwrap();
    let plan = Plan::new(segments.total_m(), resolution_m, max_points).unwrap();
    let spline = LinearSpline::from_segments(vertices, &segments, plan.resolution_m);
    (0..=plan.total_samples)
        .map(|i| spline.evaluate(i as f64).to_cartographic())
        .filter(|c| c.lat > 0.0)
        .count()
}

fn profile_resampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Profile Resampling");

    let short = polyline(10).to_cartographic();
    let long = polyline(500).to_cartographic();

    group.bench_with_input("short", &short, |b, v| {
        b.iter(|| resample(black_box(v), 10.0, 1000))
    });
    group.bench_with_input("long_capped", &long, |b, v| {
        b.iter(|| resample(black_box(v), 1.0, 5000))
    });
}

criterion_group!(benches, profile_resampling);
criterion_main!(benches);
