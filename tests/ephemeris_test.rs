mod common;

use approx::assert_abs_diff_eq;
use common::ephemeris_at;
use ephemeris::{
    bodies::{catalog::BodyCatalog, BodyType},
    ephemeris::Ephemeris,
    motion::MotionParams,
    observer::Observer,
    reduction::ReductionParams,
};

#[test]
fn test_results_cover_catalog_but_earth() {
    let eph = ephemeris_at(2019, 10, 31, 0, 0, 0);
    let results = eph.results().unwrap();

    let keys: Vec<&str> = results.iter().map(|r| r.key.as_str()).collect();
    assert!(!keys.contains(&"earth"));
    for key in ["sun", "moon", "mercury", "venus", "mars", "jupiter", "pluto", "sirius"] {
        assert!(keys.contains(&key), "{key} missing from results");
    }

    let moon = results.iter().find(|r| r.key == "moon").unwrap();
    assert_eq!(moon.body_type, BodyType::Luna);
    assert!(moon.moon_phase.is_some());
    assert!(results
        .iter()
        .filter(|r| r.key != "moon")
        .all(|r| r.moon_phase.is_none()));
}

#[test]
fn test_body_matches_results_entry() {
    let eph = ephemeris_at(2019, 10, 31, 0, 0, 0);
    let mercury = eph.body("mercury").unwrap();
    let from_results = eph
        .results()
        .unwrap()
        .into_iter()
        .find(|r| r.key == "mercury")
        .unwrap();
    assert_eq!(mercury, from_results);
}

#[test]
fn test_sun_evening_in_new_york() {
    let eph = ephemeris_at(2019, 10, 31, 0, 0, 0);
    let sun = eph.body("sun").unwrap();

    assert_abs_diff_eq!(sun.apparent_longitude, 217.27, epsilon = 0.05);
    assert_eq!(sun.constellation.abbreviation, "Lib");
    // 20:00 local time, after sunset.
    assert!(sun.topocentric.altitude < -5.0);
    assert_eq!(sun.topocentric.refraction, 0.0);
}

#[test]
fn test_positions_serialize_to_json() {
    let eph = ephemeris_at(2019, 10, 31, 0, 0, 0);
    let moon = eph.body("moon").unwrap();

    let json = serde_json::to_value(&moon).unwrap();
    assert_eq!(json["key"], "moon");
    assert_eq!(json["body_type"], "luna");
    assert!(json["moon_phase"]["illuminated_fraction"].is_number());
    assert!(json["apparent_longitude_string"]
        .as_str()
        .unwrap()
        .contains('°'));
}

#[test]
fn test_custom_parameters_reach_reduction() {
    let observer =
        Observer::from_gregorian_utc(2019, 10, 31, 0, 0, 0, 40.7128, -74.006, 10.0).unwrap();
    let thin_air = ReductionParams::builder().pressure(0.0).build().unwrap();
    let eph = Ephemeris::with_params(
        BodyCatalog::builtin(),
        observer,
        thin_air,
        MotionParams::default(),
    )
    .unwrap();

    for position in eph.results().unwrap() {
        assert_eq!(position.topocentric.refraction, 0.0);
    }
}

#[test]
fn test_invalid_observer_is_rejected() {
    assert!(Observer::from_gregorian_utc(2019, 10, 31, 0, 0, 0, 91.0, 0.0, 0.0).is_err());
    assert!(Observer::from_gregorian_utc(2019, 13, 31, 0, 0, 0, 0.0, 0.0, 0.0).is_err());
}
