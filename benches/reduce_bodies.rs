use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ephemeris::{
    bodies::catalog::BodyCatalog,
    ephemeris::Ephemeris,
    motion::{directed_date::Direction, MotionParams, MotionSolver},
    observer::Observer,
    reduction::ReductionParams,
};
use hifitime::Epoch;

fn observer() -> Observer {
    Observer::from_gregorian_utc(2019, 10, 31, 0, 0, 0, 40.7128, -74.006, 10.0).unwrap()
}

/// Full catalog, Earth solved once per iteration.
fn bench_results(c: &mut Criterion) {
    let catalog = BodyCatalog::builtin();
    let observer = observer();

    c.bench_function("reduce_bodies/builtin_catalog", |b| {
        b.iter(|| {
            let eph = Ephemeris::new(catalog.clone(), observer.clone()).unwrap();
            black_box(eph.results().unwrap());
        })
    });
}

fn bench_single_bodies(c: &mut Criterion) {
    let eph = Ephemeris::new(BodyCatalog::builtin(), observer()).unwrap();
    eph.earth().unwrap();

    let mut group = c.benchmark_group("reduce_bodies/single");
    for key in ["sun", "moon", "mercury", "vega"] {
        group.bench_function(key, |b| b.iter(|| black_box(eph.body(black_box(key)).unwrap())));
    }
    group.finish();
}

fn bench_station_search(c: &mut Criterion) {
    let catalog = BodyCatalog::builtin();
    let solver = MotionSolver::from_catalog(
        &catalog,
        ReductionParams::default(),
        MotionParams::default(),
    )
    .unwrap();
    let mercury = catalog.get("mercury").unwrap();
    let from = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);

    let mut group = c.benchmark_group("reduce_bodies/motion");
    group.sample_size(10);
    group.bench_function("mercury_next_direct_station", |b| {
        b.iter(|| {
            black_box(
                solver
                    .next_direct_station(mercury, from, Direction::Next)
                    .unwrap(),
            )
        })
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_results, bench_single_bodies, bench_station_search
);
criterion_main!(benches);
