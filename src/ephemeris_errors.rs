use thiserror::Error;

use crate::constants::Radian;

#[derive(Error, Debug, Clone)]
pub enum EphemerisError {
    #[error("Celestial body with key: \"{key}\" or type \"{kind}\" not found.")]
    UnknownBody { key: String, kind: String },

    #[error("Unknown celestial body type: \"{0}\"")]
    UnknownBodyType(String),

    #[error("Please pass in direction from the following: 'next' or 'prev'. Not \"{0}\".")]
    InvalidDirection(String),

    #[error("Please pass in unit from the following: 'date', 'minute', or 'second'. Not \"{0}\".")]
    InvalidUnit(String),

    #[error("Invalid observer: {0}")]
    InvalidObserver(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid body record: {0}")]
    InvalidBodyRecord(String),

    #[error(
        "Kepler equation did not converge (e = {eccentricity}, M = {mean_anomaly} rad) after {iterations} iterations"
    )]
    KeplerNonConvergence {
        eccentricity: f64,
        mean_anomaly: Radian,
        iterations: usize,
    },

    #[error("No change of motion found for \"{body}\" within {days} days")]
    SearchHorizonExceeded { body: String, days: f64 },

    #[error("Bracket refinement for \"{body}\" did not converge after {iterations} steps")]
    RefinementNonConvergence { body: String, iterations: usize },
}

impl EphemerisError {
    /// True for the three failures of an iterative computation.
    pub fn is_non_convergence(&self) -> bool {
        matches!(
            self,
            EphemerisError::KeplerNonConvergence { .. }
                | EphemerisError::SearchHorizonExceeded { .. }
                | EphemerisError::RefinementNonConvergence { .. }
        )
    }
}

impl PartialEq for EphemerisError {
    fn eq(&self, other: &Self) -> bool {
        use EphemerisError::*;
        match (self, other) {
            (UnknownBody { key: a, kind: b }, UnknownBody { key: c, kind: d }) => {
                a == c && b == d
            }
            (UnknownBodyType(a), UnknownBodyType(b)) => a == b,
            (InvalidDirection(a), InvalidDirection(b)) => a == b,
            (InvalidUnit(a), InvalidUnit(b)) => a == b,
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (InvalidBodyRecord(a), InvalidBodyRecord(b)) => a == b,

            // Numerical failures compare on the variant and the body only
            (KeplerNonConvergence { .. }, KeplerNonConvergence { .. }) => true,
            (SearchHorizonExceeded { body: a, .. }, SearchHorizonExceeded { body: b, .. }) => {
                a == b
            }
            (
                RefinementNonConvergence { body: a, .. },
                RefinementNonConvergence { body: b, .. },
            ) => a == b,

            _ => false,
        }
    }
}
