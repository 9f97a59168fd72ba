use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ephemeris::kepler::solve_kepler_equation;

const TOLERANCE: f64 = 1e-11;
const MAX_ITERATIONS: usize = 64;

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

fn bench_regime(c: &mut Criterion, name: &str, seed: u64, eccentricity: std::ops::Range<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = 10_000usize;

    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                // Inputs drawn outside the timed section
                (0..samples)
                    .map(|_| (rand_angle(&mut rng), rng.random_range(eccentricity.clone())))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    let anomaly =
                        solve_kepler_equation(black_box(m), black_box(e), TOLERANCE, MAX_ITERATIONS)
                            .unwrap();
                    black_box(anomaly);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Planetary regime: e ∈ [0, 0.25)
fn bench_planets(c: &mut Criterion) {
    bench_regime(c, "solve_kepler_equation/planets_e<0.25", 0xDEADBEEF, 0.0..0.25);
}

/// Asteroids and comets: e ∈ [0.25, 0.9)
fn bench_high_e(c: &mut Criterion) {
    bench_regime(c, "solve_kepler_equation/high_e_0.25..0.9", 0xBADF00D, 0.25..0.9);
}

/// Near-parabolic: e ∈ [0.9, 0.999), four times the iteration budget
fn bench_near_parabolic(c: &mut Criterion) {
    bench_regime(
        c,
        "solve_kepler_equation/near_parabolic_0.9..0.999",
        0xFEEDFACE,
        0.9..0.999,
    );
}

/// Fixed stress case: small mean anomaly on a very eccentric orbit.
fn bench_fixed_stress(c: &mut Criterion) {
    let e = 0.995_f64;
    let m = 1.0e-3_f64;

    c.bench_function("solve_kepler_equation/fixed_stress_case", |b| {
        b.iter(|| {
            let anomaly =
                solve_kepler_equation(black_box(m), black_box(e), TOLERANCE, MAX_ITERATIONS);
            black_box(anomaly.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_planets, bench_high_e, bench_near_parabolic, bench_fixed_stress
);
criterion_main!(benches);
