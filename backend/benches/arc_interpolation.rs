use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use globeteller::{
    interpolate_arc,
    loader::parse_trip_str,
    models::Coordinate,
    route::trip_path,
};

const SAMPLE_TRIP: &str = include_str!("../data/sample_trip.json");

fn benchmark_interpolate_arc(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate_arc");

    let test_cases = [
        ("same_point", Coordinate::new(2.35, 48.85), Coordinate::new(2.35, 48.85)),
        ("city_hop", Coordinate::new(2.35, 48.85), Coordinate::new(4.83, 45.76)),
        ("ocean_crossing", Coordinate::new(139.69, 35.69), Coordinate::new(-122.42, 37.77)),
        ("antipodal", Coordinate::new(0.0, 0.0), Coordinate::new(180.0, 0.0)),
    ];

    for (name, start, end) in test_cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(start, end), |b, &(start, end)| {
            b.iter(|| interpolate_arc(black_box(start), black_box(end)).count());
        });
    }

    group.finish();
}

fn benchmark_parse_and_path(c: &mut Criterion) {
    c.bench_function("parse_sample_trip", |b| {
        b.iter(|| parse_trip_str(black_box(SAMPLE_TRIP)))
    });

    let trip = parse_trip_str(SAMPLE_TRIP).expect("sample trip is valid");
    c.bench_function("trip_path_sample_trip", |b| b.iter(|| trip_path(black_box(&trip))));
}

criterion_group!(benches, benchmark_interpolate_arc, benchmark_parse_and_path);
criterion_main!(benches);
