//! # Apparent motion and retrograde search
//!
//! A body is *direct* while its apparent ecliptic longitude of date increases, *retrograde*
//! while it decreases and *stationary* when it does not move at all (fixed stars).
//!
//! [`MotionSolver`] samples the apparent longitude of a body at arbitrary instants (the
//! Earth is solved afresh at every sample) and locates:
//!
//! * **stations**: the instant a body enters a motion state, at minute resolution;
//! * **moments**: the first (or last) instant a body is in a motion state, at second
//!   resolution.
//!
//! Both are found by a coarse scan in whole days followed by a bisection on the
//! resolution grid. The scan is bounded by [`MotionParams::horizon_days`], wide enough to cover
//! the synodic period of every planet.
//!
//! ## Station semantics
//!
//! * `next_station`: first instant after `from` whose state differs from the state at `from`.
//!   Backwards: the instant the state at `from` began.
//! * `next_retrograde_station` / `next_direct_station`, forwards: the next entry into the
//!   state strictly after `from`. A body already in the state first leaves it.
//!   Backwards: the latest entry into the state at or before `from`.
//! * `next_retrograde_moment` / `next_direct_moment`: `from` itself when the body already
//!   is in the state, otherwise the first instant in the state (forwards) or the last one
//!   (backwards).
//!
//! ## Example
//!
//! ```rust,no_run
//! use ephemeris::bodies::catalog::BodyCatalog;
//! use ephemeris::motion::{directed_date::Direction, MotionParams, MotionSolver};
//! use ephemeris::reduction::ReductionParams;
//! use hifitime::Epoch;
//!
//! let catalog = BodyCatalog::builtin();
//! let solver = MotionSolver::from_catalog(&catalog, ReductionParams::default(), MotionParams::default())?;
//! let from = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
//!
//! let station = solver.next_retrograde_station(catalog.get("mercury")?, from, Direction::Next)?;
//! println!("Mercury turns retrograde at {} ({:.4} deg)", station.date, station.longitude);
//! # Ok::<(), ephemeris::ephemeris_errors::EphemerisError>(())
//! ```
use std::cmp::Ordering::Greater;
use std::fmt;

use hifitime::Epoch;
use log::debug;

use crate::{
    angles::signed_difference,
    bodies::{catalog::BodyCatalog, orbital_elements::OrbitalElements, Body},
    constants::Degree,
    earth::EarthState,
    ephemeris_errors::EphemerisError,
    motion::{
        directed_date::{directed_date, Direction, TimeUnit},
        search::{find_nearest, SearchWindow},
    },
    reduction::{apparent_longitude, ReductionParams},
};

pub mod daily;
pub mod directed_date;
pub(crate) mod search;

/// Sense of the apparent motion in ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Direct,
    Retrograde,
    Stationary,
}

impl Motion {
    pub fn from_movement(movement: Degree) -> Self {
        if movement > 0.0 {
            Motion::Direct
        } else if movement < 0.0 {
            Motion::Retrograde
        } else {
            Motion::Stationary
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Motion::Direct => "direct",
            Motion::Retrograde => "retrograde",
            Motion::Stationary => "stationary",
        })
    }
}

/// Apparent longitude at one instant and its change over one sampling unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub instant: Epoch,
    pub longitude: Degree,
    /// Signed shortest-path change of longitude over the sampling unit, in (−180, 180]
    pub movement: Degree,
    pub motion: Motion,
}

/// Instant a body enters a motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationResult {
    pub date: Epoch,
    pub longitude: Degree,
    /// Movement over the unit following `date`
    pub movement: Degree,
    /// State entered at `date`
    pub motion: Motion,
}

/// First or last instant a body is in a motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentResult {
    pub date: Epoch,
    pub longitude: Degree,
    pub movement: Degree,
}

impl From<MotionSample> for StationResult {
    fn from(sample: MotionSample) -> Self {
        StationResult {
            date: sample.instant,
            longitude: sample.longitude,
            movement: sample.movement,
            motion: sample.motion,
        }
    }
}

impl From<MotionSample> for MomentResult {
    fn from(sample: MotionSample) -> Self {
        MomentResult {
            date: sample.instant,
            longitude: sample.longitude,
            movement: sample.movement,
        }
    }
}

/// Extent and resolution of the motion searches.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionParams {
    /// Coarse scan step (days)
    pub step_days: f64,
    /// Furthest instant probed by the coarse scan (days from the start)
    pub horizon_days: f64,
    /// Cap on the bisection steps of one bracket
    pub max_refinements: usize,
    pub station_resolution: TimeUnit,
    pub moment_resolution: TimeUnit,
}

impl MotionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MotionParamsBuilder {
        MotionParamsBuilder::new()
    }

    fn window(&self, resolution: TimeUnit) -> SearchWindow {
        SearchWindow {
            step_days: self.step_days,
            horizon_days: self.horizon_days,
            max_refinements: self.max_refinements,
            resolution,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        MotionParams {
            step_days: 1.0,
            horizon_days: 800.0,
            max_refinements: 64,
            station_resolution: TimeUnit::Minute,
            moment_resolution: TimeUnit::Second,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MotionParamsBuilder {
    params: MotionParams,
}

impl Default for MotionParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: MotionParams::default(),
        }
    }

    pub fn step_days(mut self, v: f64) -> Self {
        self.params.step_days = v;
        self
    }
    pub fn horizon_days(mut self, v: f64) -> Self {
        self.params.horizon_days = v;
        self
    }
    pub fn max_refinements(mut self, v: usize) -> Self {
        self.params.max_refinements = v;
        self
    }
    pub fn station_resolution(mut self, v: TimeUnit) -> Self {
        self.params.station_resolution = v;
        self
    }
    pub fn moment_resolution(mut self, v: TimeUnit) -> Self {
        self.params.moment_resolution = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Validation rules
    /// -----------------
    /// * `step_days` and `horizon_days` finite, `step_days > 0` and `horizon_days ≥ step_days`.
    /// * `max_refinements ≥ 1`.
    /// * Both resolutions strictly finer than the coarse step.
    pub fn build(self) -> Result<MotionParams, EphemerisError> {
        let p = &self.params;

        if !p.step_days.is_finite() || p.step_days.partial_cmp(&0.0) != Some(Greater) {
            return Err(EphemerisError::InvalidParameter(
                "step_days must be finite and > 0".into(),
            ));
        }
        if !p.horizon_days.is_finite() || p.horizon_days < p.step_days {
            return Err(EphemerisError::InvalidParameter(
                "horizon_days must be finite and >= step_days".into(),
            ));
        }
        if p.max_refinements == 0 {
            return Err(EphemerisError::InvalidParameter(
                "max_refinements must be >= 1".into(),
            ));
        }
        let step_seconds = p.step_days * 86_400.0;
        for (name, resolution) in [
            ("station_resolution", p.station_resolution),
            ("moment_resolution", p.moment_resolution),
        ] {
            if resolution.seconds() >= step_seconds {
                return Err(EphemerisError::InvalidParameter(format!(
                    "{name} ({resolution}) must be finer than the coarse step"
                )));
            }
        }

        Ok(self.params)
    }
}

impl fmt::Display for MotionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Motion Search Parameters")?;
            writeln!(f, "------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Coarse scan]")?;
            line!(
                "step_days          = {:.3} d",
                self.step_days,
                "Spacing of the coarse probes"
            )?;
            line!(
                "horizon_days       = {:.1} d",
                self.horizon_days,
                "Search span before giving up"
            )?;

            writeln!(f, "\n[Refinement]")?;
            line!(
                "max_refinements    = {}",
                self.max_refinements,
                "Bisection steps per bracket"
            )?;
            line!(
                "station_resolution = {}",
                self.station_resolution,
                "Grid of station instants"
            )?;
            line!(
                "moment_resolution  = {}",
                self.moment_resolution,
                "Grid of moment instants"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "MotionParams(step={:.3}d, horizon={:.1}d, max_refinements={}, stations per {}, moments per {})",
                self.step_days,
                self.horizon_days,
                self.max_refinements,
                self.station_resolution,
                self.moment_resolution,
            )
        }
    }
}

/// Samples apparent longitudes and searches for changes of motion.
///
/// The solver keeps the Earth–Moon barycentre elements and solves the Earth at each sample,
/// so one solver serves any instant and any body.
#[derive(Debug, Clone)]
pub struct MotionSolver {
    earth_elements: OrbitalElements,
    reduction: ReductionParams,
    params: MotionParams,
}

impl MotionSolver {
    pub fn new(
        earth_elements: OrbitalElements,
        reduction: ReductionParams,
        params: MotionParams,
    ) -> Self {
        MotionSolver {
            earth_elements,
            reduction,
            params,
        }
    }

    /// Solver using the Earth elements of `catalog`.
    pub fn from_catalog(
        catalog: &BodyCatalog,
        reduction: ReductionParams,
        params: MotionParams,
    ) -> Result<Self, EphemerisError> {
        Ok(MotionSolver::new(
            catalog.earth_elements()?.clone(),
            reduction,
            params,
        ))
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Apparent ecliptic longitude of date of `body` at `instant` (degrees).
    pub fn longitude_at(&self, body: &Body, instant: Epoch) -> Result<Degree, EphemerisError> {
        let earth = EarthState::compute(
            &self.earth_elements,
            instant.to_jde_tt_days(),
            self.reduction.kepler_tolerance,
            self.reduction.kepler_max_iterations,
        )?;
        apparent_longitude(body, &earth, &self.reduction)
    }

    /// Longitude at `instant` and its change over the next `unit`.
    ///
    /// Fixed stars always report a movement of zero.
    pub fn velocity_at(
        &self,
        body: &Body,
        instant: Epoch,
        unit: TimeUnit,
    ) -> Result<MotionSample, EphemerisError> {
        let longitude = self.longitude_at(body, instant)?;
        let movement = if body.is_star() {
            0.0
        } else {
            let later = self.longitude_at(body, directed_date(Direction::Next, unit, instant))?;
            signed_difference(longitude, later)
        };

        Ok(MotionSample {
            instant,
            longitude,
            movement,
            motion: Motion::from_movement(movement),
        })
    }

    fn motion_at(
        &self,
        body: &Body,
        instant: Epoch,
        unit: TimeUnit,
    ) -> Result<Motion, EphemerisError> {
        Ok(self.velocity_at(body, instant, unit)?.motion)
    }

    /// Nearest instant from `from` in `direction` where the motion satisfies `wanted`.
    fn search<P>(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
        unit: TimeUnit,
        wanted: P,
    ) -> Result<Epoch, EphemerisError>
    where
        P: Fn(Motion) -> bool,
    {
        find_nearest(
            &body.key,
            from,
            direction,
            &self.params.window(unit),
            |t| Ok(wanted(self.motion_at(body, t, unit)?)),
        )
    }

    /// Instant the motion changes, at station resolution.
    ///
    /// Forwards, the first instant after `from` whose state differs from the state at
    /// `from`. Backwards, the instant the state at `from` began.
    pub fn next_station(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
    ) -> Result<StationResult, EphemerisError> {
        let unit = self.params.station_resolution;
        let current = self.motion_at(body, from, unit)?;
        let changed = self.search(body, from, direction, unit, |m| m != current)?;

        let date = match direction {
            Direction::Next => changed,
            Direction::Prev => directed_date(Direction::Next, unit, changed),
        };
        let station = StationResult::from(self.velocity_at(body, date, unit)?);
        debug!(
            "{} {direction} station from {from}: {} at {}",
            body.key, station.motion, station.date
        );
        Ok(station)
    }

    /// Instant the body enters `state`, at station resolution.
    fn station_into(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
        state: Motion,
    ) -> Result<StationResult, EphemerisError> {
        let unit = self.params.station_resolution;
        let current = self.motion_at(body, from, unit)?;

        let date = match direction {
            Direction::Next => {
                let start = if current == state {
                    self.search(body, from, direction, unit, |m| m != state)?
                } else {
                    from
                };
                self.search(body, start, direction, unit, |m| m == state)?
            }
            Direction::Prev => {
                let last_inside = if current == state {
                    from
                } else {
                    self.search(body, from, direction, unit, |m| m == state)?
                };
                let before = self.search(body, last_inside, direction, unit, |m| m != state)?;
                directed_date(Direction::Next, unit, before)
            }
        };

        let station = StationResult::from(self.velocity_at(body, date, unit)?);
        debug!(
            "{} {direction} {state} station from {from}: {}",
            body.key, station.date
        );
        Ok(station)
    }

    pub fn next_retrograde_station(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
    ) -> Result<StationResult, EphemerisError> {
        self.station_into(body, from, direction, Motion::Retrograde)
    }

    pub fn next_direct_station(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
    ) -> Result<StationResult, EphemerisError> {
        self.station_into(body, from, direction, Motion::Direct)
    }

    /// `from` when the body is in `state`, otherwise the nearest instant in `state`, at
    /// moment resolution.
    fn moment_in(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
        state: Motion,
    ) -> Result<MomentResult, EphemerisError> {
        let unit = self.params.moment_resolution;
        let sample = self.velocity_at(body, from, unit)?;
        if sample.motion == state {
            return Ok(sample.into());
        }

        let date = self.search(body, from, direction, unit, |m| m == state)?;
        let moment = MomentResult::from(self.velocity_at(body, date, unit)?);
        debug!(
            "{} {direction} {state} moment from {from}: {}",
            body.key, moment.date
        );
        Ok(moment)
    }

    pub fn next_retrograde_moment(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
    ) -> Result<MomentResult, EphemerisError> {
        self.moment_in(body, from, direction, Motion::Retrograde)
    }

    pub fn next_direct_moment(
        &self,
        body: &Body,
        from: Epoch,
        direction: Direction,
    ) -> Result<MomentResult, EphemerisError> {
        self.moment_in(body, from, direction, Motion::Direct)
    }
}

#[cfg(test)]
mod motion_test {
    use super::*;

    #[test]
    fn test_motion_from_movement() {
        assert_eq!(Motion::from_movement(1e-9), Motion::Direct);
        assert_eq!(Motion::from_movement(-1e-9), Motion::Retrograde);
        assert_eq!(Motion::from_movement(0.0), Motion::Stationary);
        assert_eq!(Motion::Retrograde.to_string(), "retrograde");
    }

    #[test]
    fn test_params_builder() {
        let params = MotionParams::builder()
            .horizon_days(400.0)
            .station_resolution(TimeUnit::Second)
            .build()
            .unwrap();
        assert_eq!(params.horizon_days, 400.0);

        assert!(MotionParams::builder().step_days(0.0).build().is_err());
        assert!(MotionParams::builder().horizon_days(0.5).build().is_err());
        assert!(MotionParams::builder().max_refinements(0).build().is_err());
        // An unbounded horizon would let a stationary body scan forever.
        assert_eq!(
            MotionParams::builder()
                .horizon_days(f64::INFINITY)
                .build()
                .unwrap_err(),
            EphemerisError::InvalidParameter(
                "horizon_days must be finite and >= step_days".into()
            )
        );
        assert!(MotionParams::builder().horizon_days(f64::NAN).build().is_err());
        assert!(MotionParams::builder()
            .step_days(f64::INFINITY)
            .horizon_days(f64::INFINITY)
            .build()
            .is_err());
        // A one-day resolution cannot refine a one-day step.
        assert!(MotionParams::builder()
            .moment_resolution(TimeUnit::Date)
            .build()
            .is_err());
    }

    #[test]
    fn test_params_display() {
        let params = MotionParams::default();
        assert_eq!(
            params.to_string(),
            "MotionParams(step=1.000d, horizon=800.0d, max_refinements=64, stations per minute, moments per second)"
        );
        let table = format!("{params:#}");
        assert!(table.contains("[Coarse scan]"));
        assert!(table.contains("station_resolution = minute"));
    }

    #[test]
    fn test_unbounded_params_fail_fast() {
        let catalog = BodyCatalog::builtin();
        let open = MotionParams {
            horizon_days: f64::INFINITY,
            ..MotionParams::default()
        };
        let solver =
            MotionSolver::from_catalog(&catalog, ReductionParams::default(), open).unwrap();
        let from = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
        assert!(matches!(
            solver.next_retrograde_station(catalog.get("regulus").unwrap(), from, Direction::Next),
            Err(EphemerisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_star_is_stationary() {
        let catalog = BodyCatalog::builtin();
        let solver =
            MotionSolver::from_catalog(&catalog, ReductionParams::default(), MotionParams::default())
                .unwrap();
        let from = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
        let sample = solver
            .velocity_at(catalog.get("regulus").unwrap(), from, TimeUnit::Minute)
            .unwrap();
        assert_eq!(sample.movement, 0.0);
        assert_eq!(sample.motion, Motion::Stationary);
        assert!((140.0..160.0).contains(&sample.longitude));
    }
}
