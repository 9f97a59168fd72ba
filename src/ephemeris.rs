//! # Ephemeris: one observer, one catalog
//!
//! [`Ephemeris`] ties a [`BodyCatalog`] to an [`Observer`] and reduces any catalog body for
//! that observer. The Earth is solved on first use and cached, then shared by every
//! reduction.
//!
//! Motion queries (stations, moments, daily motion) start from the observer's instant and
//! go through a [`MotionSolver`] built from the same catalog and parameters.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ephemeris::bodies::catalog::BodyCatalog;
//! use ephemeris::ephemeris::Ephemeris;
//! use ephemeris::observer::Observer;
//!
//! let observer = Observer::from_gregorian_utc(2019, 10, 31, 0, 0, 0, 40.7128, -74.006, 10.0)?;
//! let ephemeris = Ephemeris::new(BodyCatalog::builtin(), observer)?;
//!
//! for position in ephemeris.results()? {
//!     println!("{:>10} {}  {}", position.key, position.apparent, position.constellation);
//! }
//! let station = ephemeris.next_retrograde_station("mercury", "next")?;
//! # Ok::<(), ephemeris::ephemeris_errors::EphemerisError>(())
//! ```

use log::debug;
use once_cell::sync::OnceCell;

use crate::{
    bodies::catalog::{BodyCatalog, EARTH_KEY},
    earth::EarthState,
    ephemeris_errors::EphemerisError,
    motion::{
        daily::DailyMotion, directed_date::Direction, MomentResult, MotionParams, MotionSolver,
        StationResult,
    },
    observer::Observer,
    reduction::{reduce_body, ApparentPosition, ReductionParams},
};

#[derive(Debug, Clone)]
pub struct Ephemeris {
    catalog: BodyCatalog,
    observer: Observer,
    reduction: ReductionParams,
    motion: MotionParams,
    earth: OnceCell<EarthState>,
}

impl Ephemeris {
    /// Ephemeris with the default reduction and motion parameters.
    ///
    /// Errors
    /// ------
    /// * [`EphemerisError::UnknownBody`] when the catalog has no heliocentric `"earth"`.
    pub fn new(catalog: BodyCatalog, observer: Observer) -> Result<Self, EphemerisError> {
        Ephemeris::with_params(
            catalog,
            observer,
            ReductionParams::default(),
            MotionParams::default(),
        )
    }

    pub fn with_params(
        catalog: BodyCatalog,
        observer: Observer,
        reduction: ReductionParams,
        motion: MotionParams,
    ) -> Result<Self, EphemerisError> {
        catalog.earth_elements()?;
        Ok(Ephemeris {
            catalog,
            observer,
            reduction,
            motion,
            earth: OnceCell::new(),
        })
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    /// Earth state at the observer's instant, solved once.
    pub fn earth(&self) -> Result<&EarthState, EphemerisError> {
        self.earth.get_or_try_init(|| {
            EarthState::compute(
                self.catalog.earth_elements()?,
                self.observer.time.julian_tt,
                self.reduction.kepler_tolerance,
                self.reduction.kepler_max_iterations,
            )
        })
    }

    /// Apparent position of the body `key`.
    pub fn body(&self, key: &str) -> Result<ApparentPosition, EphemerisError> {
        let body = self.catalog.get(key)?;
        reduce_body(body, self.earth()?, &self.observer, &self.reduction)
    }

    /// Apparent positions of every catalog body but the Earth, in catalog order.
    pub fn results(&self) -> Result<Vec<ApparentPosition>, EphemerisError> {
        let earth = self.earth()?;
        let results = self
            .catalog
            .iter()
            .filter(|b| b.key != EARTH_KEY)
            .map(|b| reduce_body(b, earth, &self.observer, &self.reduction))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "reduced {} bodies at {}",
            results.len(),
            self.observer.epoch
        );
        Ok(results)
    }

    pub fn motion_solver(&self) -> Result<MotionSolver, EphemerisError> {
        MotionSolver::from_catalog(&self.catalog, self.reduction.clone(), self.motion.clone())
    }

    pub fn daily_motion(&self, key: &str) -> Result<DailyMotion, EphemerisError> {
        self.motion_solver()?
            .daily_motion(self.catalog.get(key)?, self.observer.epoch)
    }

    /// Change of motion of `key` from the observer's instant; `direction` is `"next"` or
    /// `"prev"`.
    pub fn next_station(&self, key: &str, direction: &str) -> Result<StationResult, EphemerisError> {
        let direction: Direction = direction.parse()?;
        self.motion_solver()?
            .next_station(self.catalog.get(key)?, self.observer.epoch, direction)
    }

    pub fn next_retrograde_station(
        &self,
        key: &str,
        direction: &str,
    ) -> Result<StationResult, EphemerisError> {
        let direction: Direction = direction.parse()?;
        self.motion_solver()?
            .next_retrograde_station(self.catalog.get(key)?, self.observer.epoch, direction)
    }

    pub fn next_direct_station(
        &self,
        key: &str,
        direction: &str,
    ) -> Result<StationResult, EphemerisError> {
        let direction: Direction = direction.parse()?;
        self.motion_solver()?
            .next_direct_station(self.catalog.get(key)?, self.observer.epoch, direction)
    }

    pub fn next_retrograde_moment(
        &self,
        key: &str,
        direction: &str,
    ) -> Result<MomentResult, EphemerisError> {
        let direction: Direction = direction.parse()?;
        self.motion_solver()?
            .next_retrograde_moment(self.catalog.get(key)?, self.observer.epoch, direction)
    }

    pub fn next_direct_moment(
        &self,
        key: &str,
        direction: &str,
    ) -> Result<MomentResult, EphemerisError> {
        let direction: Direction = direction.parse()?;
        self.motion_solver()?
            .next_direct_moment(self.catalog.get(key)?, self.observer.epoch, direction)
    }
}
