mod common;

use approx::assert_abs_diff_eq;
use common::utc;
use ephemeris::{
    bodies::{catalog::BodyCatalog, record::BodyRecord, BodyKind},
    ephemeris::Ephemeris,
    ephemeris_errors::EphemerisError,
    observer::Observer,
};

const RECORDS: &str = r#"[
    { "key": "sun", "type": "sun", "magnitude": -26.74, "semi_diameter": 959.63 },
    { "key": "earth", "type": "heliocentric",
      "elements": { "epoch": 2451545.0, "inclination": 0.00005, "ascending_node": -11.26064,
                    "argument_of_perihelion": 114.20783, "semi_axis": 1.00000011,
                    "eccentricity": 0.01671022, "mean_anomaly": 357.51716 } },
    { "key": "ceres", "name": "Ceres", "type": "heliocentric", "magnitude": 3.34,
      "elements": { "epoch": 2458600.5, "inclination": 10.594, "ascending_node": 80.305,
                    "argument_of_perihelion": 73.597, "semi_axis": 2.769,
                    "eccentricity": 0.0760, "mean_anomaly": 77.372 } },
    { "key": "vega", "type": "star", "magnitude": 0.03,
      "star": { "right_ascension": 279.234735, "declination": 38.783689,
                "pm_ra": 200.94, "pm_dec": 286.23, "parallax": 130.23 } }
]"#;

fn records() -> Vec<BodyRecord> {
    serde_json::from_str(RECORDS).unwrap()
}

#[test]
fn test_catalog_from_json_records() {
    let catalog = BodyCatalog::from_records(records()).unwrap();

    assert_eq!(catalog.len(), 4);
    assert_eq!(
        catalog.keys().collect::<Vec<_>>(),
        vec!["sun", "earth", "ceres", "vega"]
    );
    assert_eq!(catalog.get("ceres").unwrap().name, "Ceres");
    assert_eq!(catalog.get("vega").unwrap().name, "vega");
    assert!(matches!(
        catalog.get("ceres").unwrap().kind,
        BodyKind::Heliocentric(_)
    ));
    // Daily motion is derived from the semi-major axis when absent.
    let ceres = catalog.get("ceres").unwrap().orbital_elements().unwrap();
    assert_abs_diff_eq!(ceres.mean_daily_motion().unwrap(), 0.2142, epsilon = 1e-3);
}

#[test]
fn test_reduce_bodies_of_a_custom_catalog() {
    let catalog = BodyCatalog::from_records(records()).unwrap();
    let observer = Observer::new(utc(2019, 10, 31, 0, 0, 0), 48.85, 2.35, 35.0).unwrap();
    let eph = Ephemeris::new(catalog, observer).unwrap();

    let results = eph.results().unwrap();
    assert_eq!(results.len(), 3);

    let ceres = eph.body("ceres").unwrap();
    assert!(ceres.geocentric_distance.unwrap() > 1.5);
    assert!(ceres.light_time > 0.0);

    let vega = eph.body("vega").unwrap();
    assert_eq!(vega.constellation.abbreviation, "Lyr");
}

#[test]
fn test_record_errors() {
    let unknown: BodyRecord =
        serde_json::from_str(r#"{ "key": "halley", "type": "comet" }"#).unwrap();
    assert_eq!(
        BodyCatalog::from_records([unknown]).unwrap_err(),
        EphemerisError::UnknownBody {
            key: "halley".into(),
            kind: "comet".into()
        }
    );

    let mut twice = records();
    twice.push(twice[0].clone());
    assert!(matches!(
        BodyCatalog::from_records(twice),
        Err(EphemerisError::InvalidBodyRecord(_))
    ));

    let hyperbolic: BodyRecord = serde_json::from_str(
        r#"{ "key": "oumuamua", "type": "heliocentric",
             "elements": { "epoch": 2458080.5, "inclination": 122.7, "ascending_node": 24.6,
                           "argument_of_perihelion": 241.8, "perihelion_distance": 0.255,
                           "eccentricity": 1.2, "mean_anomaly": 0.0 } }"#,
    )
    .unwrap();
    assert!(matches!(
        BodyCatalog::from_records([hyperbolic]),
        Err(EphemerisError::InvalidBodyRecord(_))
    ));
}

#[test]
fn test_catalog_without_earth_cannot_reduce() {
    let catalog = BodyCatalog::from_records(
        records().into_iter().filter(|r| r.key != "earth"),
    )
    .unwrap();
    let observer = Observer::new(utc(2019, 10, 31, 0, 0, 0), 0.0, 0.0, 0.0).unwrap();
    assert!(matches!(
        Ephemeris::new(catalog, observer),
        Err(EphemerisError::UnknownBody { ref key, .. }) if key == "earth"
    ));
}
