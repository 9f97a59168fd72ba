//! # Constants and type definitions
//!
//! Physical constants, reference epochs, unit conversions and the type aliases shared by
//! every module of the crate.
//!
//! ## Overview
//!
//! - Reference epochs as Julian dates (J2000, B1950, B1875, J1900)
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, arcseconds, hours)
//! - Angle and time type aliases

// -------------------------------------------------------------------------------------------------
// Reference epochs
// -------------------------------------------------------------------------------------------------

/// Julian date of J2000.0 (2000-01-01 12:00:00 TT)
pub const J2000: f64 = 2_451_545.0;

/// Julian date of the Besselian epoch B1950.0
pub const B1950: f64 = 2_433_282.4235;

/// Julian date of the Besselian epoch B1875.0, frame of the constellation boundaries
pub const B1875: f64 = 2_405_889.258_550_475;

/// Julian date of J1900.0
pub const J1900: f64 = 2_415_020.0;

/// MJD epoch of J2000.0
pub const T2000: f64 = 51_544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Days in a tropical (Besselian) year
pub const DAYS_PER_BESSELIAN_YEAR: f64 = 365.242_198_781;

/// Mean length of the synodic month in days
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648_000.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Milliarcseconds → radians
pub const RADMAS: f64 = RADSEC / 1000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Gaussian gravitational constant k
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Ratio of the Earth mass to the Moon mass
pub const EARTH_MOON_MASS_RATIO: f64 = 81.300_569_07;

/// 2·GM☉/(c²·AU), scale of the gravitational light deflection
pub const SOLAR_DEFLECTION: f64 = 1.974e-8;

/// Diurnal aberration constant at the equator, in radians (0.3200")
pub const DIURNAL_ABERRATION: f64 = 1.5472e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Distance in meters
pub type Meter = f64;

/// Julian date (days)
pub type JulianDate = f64;

/// Modified Julian Date (days)
pub type MJD = f64;
