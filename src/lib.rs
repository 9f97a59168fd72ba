pub mod angles;
pub mod bodies;
pub mod constants;
pub mod earth;
mod earth_orientation;
pub mod ephemeris;
pub mod ephemeris_errors;
pub mod kepler;
pub mod lunar;
pub mod motion;
pub mod observer;
pub mod reduction;
mod ref_system;
pub mod time;
