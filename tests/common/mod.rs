#![allow(dead_code)]

use ephemeris::{
    bodies::catalog::BodyCatalog,
    ephemeris::Ephemeris,
    motion::{MotionParams, MotionSolver},
    observer::Observer,
    reduction::ReductionParams,
};
use hifitime::Epoch;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Route `log` output to the test harness; `RUST_LOG=debug` shows the search steps.
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::Builder::from_default_env().is_test(true).try_init();
    });
}

pub const NEW_YORK: (f64, f64, f64) = (40.7128, -74.006, 10.0);

pub fn utc(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Epoch {
    Epoch::from_gregorian_utc(year, month, day, hour, minute, second, 0)
}

pub fn solver() -> MotionSolver {
    init_logger();
    MotionSolver::from_catalog(
        &BodyCatalog::builtin(),
        ReductionParams::default(),
        MotionParams::default(),
    )
    .unwrap()
}

pub fn ephemeris_at(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Ephemeris {
    init_logger();
    let (lat, lon, elevation) = NEW_YORK;
    let observer =
        Observer::from_gregorian_utc(year, month, day, hour, minute, second, lat, lon, elevation)
            .unwrap();
    Ephemeris::new(BodyCatalog::builtin(), observer).unwrap()
}

/// Assert two instants are no more than `minutes` apart.
pub fn assert_within_minutes(actual: Epoch, expected: Epoch, minutes: f64) {
    let gap = (actual - expected).abs().to_seconds() / 60.0;
    assert!(
        gap <= minutes,
        "{actual} is {gap:.2} min away from {expected} (allowed {minutes} min)"
    );
}
