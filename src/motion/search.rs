//! Bracket-and-refine search over point samples.
//!
//! A predicate on instants is probed in coarse steps away from a start instant until it
//! holds; the bracket between the last failing probe and the first holding one is then
//! bisected on whole multiples of the resolution. The predicate is assumed to change at
//! most once inside one coarse step.

use hifitime::{Duration, Epoch};
use log::trace;

use crate::{
    ephemeris_errors::EphemerisError,
    motion::directed_date::{Direction, TimeUnit},
};

/// Extent and resolution of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SearchWindow {
    pub step_days: f64,
    pub horizon_days: f64,
    pub max_refinements: usize,
    pub resolution: TimeUnit,
}

fn offset(from: Epoch, direction: Direction, seconds: f64) -> Epoch {
    from + Duration::from_seconds(direction.sign() * seconds)
}

/// Nearest instant after (or before) `from`, on the grid `from ± k·resolution`, where
/// `holds` is true. `holds(from)` is not evaluated.
///
/// Errors
/// ------
/// * [`EphemerisError::SearchHorizonExceeded`] when no coarse probe within the horizon holds.
/// * [`EphemerisError::RefinementNonConvergence`] when the bisection needs more than
///   `max_refinements` steps.
/// * [`EphemerisError::InvalidParameter`] for a non-finite or non-positive step, or a
///   non-finite horizon.
/// * Any error of `holds`.
pub(crate) fn find_nearest<F>(
    body: &str,
    from: Epoch,
    direction: Direction,
    window: &SearchWindow,
    mut holds: F,
) -> Result<Epoch, EphemerisError>
where
    F: FnMut(Epoch) -> Result<bool, EphemerisError>,
{
    if !(window.step_days.is_finite() && window.horizon_days.is_finite() && window.step_days > 0.0)
    {
        return Err(EphemerisError::InvalidParameter(format!(
            "search window must be finite (step = {} d, horizon = {} d)",
            window.step_days, window.horizon_days
        )));
    }

    let unit = window.resolution.seconds();
    let units_per_step = ((window.step_days * 86_400.0) / unit).round().max(1.0) as i64;
    let max_steps = (window.horizon_days / window.step_days).ceil() as i64;

    let mut outside: i64 = 0;
    for k in 1..=max_steps {
        let inside = k * units_per_step;
        if holds(offset(from, direction, inside as f64 * unit))? {
            trace!("{body}: bracket [{outside}, {inside}] x {unit}s {direction} of {from}");
            return refine(body, from, direction, window, outside, inside, &mut holds);
        }
        outside = inside;
    }

    Err(EphemerisError::SearchHorizonExceeded {
        body: body.to_string(),
        days: window.horizon_days,
    })
}

/// Bisect a bracket of resolution units: `holds` fails at `outside` and holds at `inside`.
fn refine<F>(
    body: &str,
    from: Epoch,
    direction: Direction,
    window: &SearchWindow,
    mut outside: i64,
    mut inside: i64,
    holds: &mut F,
) -> Result<Epoch, EphemerisError>
where
    F: FnMut(Epoch) -> Result<bool, EphemerisError>,
{
    let unit = window.resolution.seconds();
    let mut iterations = 0;

    while inside - outside > 1 {
        if iterations == window.max_refinements {
            return Err(EphemerisError::RefinementNonConvergence {
                body: body.to_string(),
                iterations,
            });
        }
        let mid = outside + (inside - outside) / 2;
        if holds(offset(from, direction, mid as f64 * unit))? {
            inside = mid;
        } else {
            outside = mid;
        }
        iterations += 1;
    }

    Ok(offset(from, direction, inside as f64 * unit))
}

#[cfg(test)]
mod search_test {
    use super::*;

    fn window(resolution: TimeUnit) -> SearchWindow {
        SearchWindow {
            step_days: 1.0,
            horizon_days: 30.0,
            max_refinements: 64,
            resolution,
        }
    }

    fn start() -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(2020, 1, 1)
    }

    #[test]
    fn test_forward_threshold() {
        let target = start() + Duration::from_seconds(3.5 * 86_400.0 + 125.0);
        let found = find_nearest("x", start(), Direction::Next, &window(TimeUnit::Minute), |t| {
            Ok(t >= target)
        })
        .unwrap();
        // First whole minute at or after the threshold.
        assert_eq!((found - start()).to_seconds(), 3.0 * 86_400.0 + 43_200.0 + 180.0);
    }

    #[test]
    fn test_backward_threshold() {
        let target = start() - Duration::from_seconds(2.0 * 86_400.0 + 30.0);
        let found = find_nearest("x", start(), Direction::Prev, &window(TimeUnit::Second), |t| {
            Ok(t <= target)
        })
        .unwrap();
        assert_eq!(found, target);
    }

    #[test]
    fn test_horizon() {
        let err = find_nearest("vega", start(), Direction::Next, &window(TimeUnit::Minute), |_| {
            Ok(false)
        })
        .unwrap_err();
        assert_eq!(
            err,
            EphemerisError::SearchHorizonExceeded {
                body: "vega".into(),
                days: 30.0
            }
        );
    }

    #[test]
    fn test_unbounded_window_is_rejected() {
        let mut open = window(TimeUnit::Minute);
        open.horizon_days = f64::INFINITY;
        let err = find_nearest("regulus", start(), Direction::Next, &open, |_| Ok(false));
        assert!(matches!(err, Err(EphemerisError::InvalidParameter(_))));

        let mut zero_step = window(TimeUnit::Minute);
        zero_step.step_days = 0.0;
        assert!(find_nearest("regulus", start(), Direction::Next, &zero_step, |_| Ok(false)).is_err());
    }

    #[test]
    fn test_refinement_cap() {
        let mut tight = window(TimeUnit::Second);
        tight.max_refinements = 3;
        let target = start() + Duration::from_seconds(40_000.0);
        let err = find_nearest("x", start(), Direction::Next, &tight, |t| Ok(t >= target));
        assert!(matches!(
            err,
            Err(EphemerisError::RefinementNonConvergence { iterations: 3, .. })
        ));
    }

    #[test]
    fn test_predicate_error_propagates() {
        let err = find_nearest("x", start(), Direction::Next, &window(TimeUnit::Minute), |_| {
            Err(EphemerisError::InvalidParameter("boom".into()))
        });
        assert_eq!(err, Err(EphemerisError::InvalidParameter("boom".into())));
    }
}
