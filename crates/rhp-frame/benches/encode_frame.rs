use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rhp_columnar::{Column, GeoFrame};
use rhp_frame::{RhealpixBackend, RhpFrameExt};

fn bench_rows() -> usize {
    std::env::var("RHP_FRAME_ENCODE_BENCH_ROWS")
        .ok()
        .and_then(|v| v.replace('_', "").parse::<usize>().ok())
        .filter(|&v| (1_000..=1_000_000).contains(&v))
        .unwrap_or(100_000)
}

fn build_frame(rows: usize) -> GeoFrame {
    // Deterministic spread over the globe, avoiding the exact poles.
    let lats = (0..rows).map(|i| -89.0 + (i as f64 * 0.618_033_988_7 % 1.0) * 178.0);
    let lngs = (0..rows).map(|i| -180.0 + (i as f64 * 0.414_213_562_3 % 1.0) * 360.0);
    GeoFrame::from_columns(vec![
        ("lat", Column::numbers(lats)),
        ("lng", Column::numbers(lngs)),
    ])
    .expect("bench frame")
}

fn bench_encode(c: &mut Criterion) {
    let rows = bench_rows();
    let frame = build_frame(rows);
    let backend = RhealpixBackend::default();

    let mut group = c.benchmark_group("geo_to_rhp");
    group.throughput(Throughput::Elements(rows as u64));
    for resolution in [3, 9, 15] {
        let id = BenchmarkId::from_parameter(resolution);
        group.bench_with_input(id, &resolution, |b, &resolution| {
            b.iter(|| black_box(frame.rhp(&backend).geo_to_rhp(resolution)))
        });
    }
    group.finish();

    let cells = frame.rhp(&backend).geo_to_rhp(9).expect("encode");
    c.bench_function("rhp_to_parent/9->5", |b| {
        b.iter(|| black_box(cells.rhp(&backend).rhp_to_parent(Some(5)).expect("parent")))
    });
    c.bench_function("rhp_to_geo_boundary/9", |b| {
        b.iter(|| black_box(cells.rhp(&backend).rhp_to_geo_boundary()))
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
