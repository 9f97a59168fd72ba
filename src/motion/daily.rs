//! Day-to-day change of apparent longitude around an instant.

use hifitime::Epoch;

use crate::{
    angles::signed_difference,
    bodies::Body,
    constants::Degree,
    ephemeris_errors::EphemerisError,
    motion::{
        directed_date::{directed_date, Direction, TimeUnit},
        MotionSolver,
    },
};

/// Apparent longitudes one day either side of an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyMotion {
    pub longitude: Degree,
    pub yesterday_longitude: Degree,
    pub tomorrow_longitude: Degree,
    /// Signed change from yesterday to the instant
    pub yesterday_difference: Degree,
    /// Signed change from the instant to tomorrow
    pub tomorrow_difference: Degree,
    /// `tomorrow_difference / yesterday_difference`; not finite when the body did not move
    pub difference_percent: f64,
}

impl MotionSolver {
    /// Longitude change of `body` over the day before and the day after `instant`.
    pub fn daily_motion(&self, body: &Body, instant: Epoch) -> Result<DailyMotion, EphemerisError> {
        let yesterday = directed_date(Direction::Prev, TimeUnit::Date, instant);
        let tomorrow = directed_date(Direction::Next, TimeUnit::Date, instant);

        let longitude = self.longitude_at(body, instant)?;
        let yesterday_longitude = self.longitude_at(body, yesterday)?;
        let tomorrow_longitude = self.longitude_at(body, tomorrow)?;

        let yesterday_difference = signed_difference(yesterday_longitude, longitude);
        let tomorrow_difference = signed_difference(longitude, tomorrow_longitude);

        Ok(DailyMotion {
            longitude,
            yesterday_longitude,
            tomorrow_longitude,
            yesterday_difference,
            tomorrow_difference,
            difference_percent: tomorrow_difference / yesterday_difference,
        })
    }
}

#[cfg(test)]
mod daily_test {
    use super::*;
    use crate::bodies::catalog::BodyCatalog;
    use crate::motion::MotionParams;
    use crate::reduction::ReductionParams;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_moon_and_sun_daily_motion() {
        let catalog = BodyCatalog::builtin();
        let solver =
            MotionSolver::from_catalog(&catalog, ReductionParams::default(), MotionParams::default())
                .unwrap();
        let instant = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);

        let sun = solver.daily_motion(catalog.get("sun").unwrap(), instant).unwrap();
        // Just under a degree a day, slowly speeding up towards perihelion.
        assert_abs_diff_eq!(sun.tomorrow_difference, 1.0, epsilon = 0.02);
        assert_abs_diff_eq!(sun.difference_percent, 1.0, epsilon = 0.01);

        let moon = solver.daily_motion(catalog.get("moon").unwrap(), instant).unwrap();
        assert!((11.5..15.5).contains(&moon.tomorrow_difference));
        assert_abs_diff_eq!(
            moon.yesterday_longitude + moon.yesterday_difference,
            moon.longitude,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_star_barely_moves() {
        let catalog = BodyCatalog::builtin();
        let solver =
            MotionSolver::from_catalog(&catalog, ReductionParams::default(), MotionParams::default())
                .unwrap();
        let instant = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
        let star = solver.daily_motion(catalog.get("spica").unwrap(), instant).unwrap();
        // Aberration alone moves a star by well under an arcminute a day.
        assert!(star.tomorrow_difference.abs() < 1.0 / 60.0);
    }
}
