//! Stepping an instant by one calendar unit, forwards or backwards.

use std::fmt;
use std::str::FromStr;

use hifitime::{Duration, Epoch};

use crate::ephemeris_errors::EphemerisError;

/// Direction of a search or a step in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// `+1.0` for [`Direction::Next`], `-1.0` for [`Direction::Prev`].
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Next => 1.0,
            Direction::Prev => -1.0,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Next => Direction::Prev,
            Direction::Prev => Direction::Next,
        }
    }
}

impl FromStr for Direction {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            other => Err(EphemerisError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Next => "next",
            Direction::Prev => "prev",
        })
    }
}

/// Step size of a directed date, and the resolution of motion searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Date,
    Minute,
    Second,
}

impl TimeUnit {
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Date => 86_400.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Second => 1.0,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_seconds(self.seconds())
    }
}

impl FromStr for TimeUnit {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(TimeUnit::Date),
            "minute" => Ok(TimeUnit::Minute),
            "second" => Ok(TimeUnit::Second),
            other => Err(EphemerisError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Date => "date",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        })
    }
}

/// `instant` moved by one `unit` in `direction`.
///
/// `directed_date(d.reversed(), u, directed_date(d, u, t)) == t` for every instant.
pub fn directed_date(direction: Direction, unit: TimeUnit, instant: Epoch) -> Epoch {
    match direction {
        Direction::Next => instant + unit.duration(),
        Direction::Prev => instant - unit.duration(),
    }
}

/// Same as [`directed_date`] with the direction and unit given by name.
///
/// Errors
/// ------
/// * [`EphemerisError::InvalidDirection`] unless `direction` is `"next"` or `"prev"`.
/// * [`EphemerisError::InvalidUnit`] unless `unit` is `"date"`, `"minute"` or `"second"`.
pub fn directed_date_from_str(
    direction: &str,
    unit: &str,
    instant: Epoch,
) -> Result<Epoch, EphemerisError> {
    Ok(directed_date(direction.parse()?, unit.parse()?, instant))
}

#[cfg(test)]
mod directed_date_test {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("next".parse::<Direction>().unwrap(), Direction::Next);
        assert_eq!("prev".parse::<Direction>().unwrap(), Direction::Prev);
        assert_eq!("minute".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
        assert_eq!(
            "Next".parse::<Direction>().unwrap_err(),
            EphemerisError::InvalidDirection("Next".into())
        );
        assert_eq!(
            "hour".parse::<TimeUnit>().unwrap_err(),
            EphemerisError::InvalidUnit("hour".into())
        );
    }

    #[test]
    fn test_round_trip_names() {
        for d in [Direction::Next, Direction::Prev] {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
            assert_eq!(d.reversed().reversed(), d);
        }
        for u in [TimeUnit::Date, TimeUnit::Minute, TimeUnit::Second] {
            assert_eq!(u.to_string().parse::<TimeUnit>().unwrap(), u);
        }
    }

    #[test]
    fn test_inverse() {
        let t = Epoch::from_gregorian_utc(2019, 10, 31, 23, 59, 30, 0);
        for unit in [TimeUnit::Date, TimeUnit::Minute, TimeUnit::Second] {
            let there = directed_date(Direction::Next, unit, t);
            assert_eq!(directed_date(Direction::Prev, unit, there), t);
            assert_eq!((there - t).to_seconds(), unit.seconds());
        }
    }

    #[test]
    fn test_error_precedence() {
        let t = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
        assert!(matches!(
            directed_date_from_str("bad direction", "bad unit", t),
            Err(EphemerisError::InvalidDirection(_))
        ));
        assert!(matches!(
            directed_date_from_str("next", "bad unit", t),
            Err(EphemerisError::InvalidUnit(_))
        ));
    }
}
