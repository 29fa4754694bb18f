//! Error taxonomy for the simulation pipeline.
//!
//! Three layers of failure, matching how each is handled:
//!
//! - [`CalibrationError`]: malformed input parameters. Fatal: surfaced
//!   before any simulation work starts.
//! - [`TrajectoryError`]: a single trajectory left the valid numeric
//!   range. Recorded per trajectory and excluded from aggregation; only
//!   fatal in bulk (see [`EnsembleError::FailureThresholdExceeded`]).
//! - [`EnsembleError`]: run-level failures surfaced to the caller.
//!
//! Accounting anomalies (clamped negative revenue/expenditure) are not
//! errors: they are carried as [`crate::types::Anomaly`] diagnostics on the
//! trajectory and the period continues.

use crate::math::correlation::CorrelationError;

/// Invalid or out-of-range calibration input.
///
/// Always fatal to the whole run: a bad calibration indicates bad input,
/// not bad luck, so nothing is simulated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// A named field is outside its valid range.
    #[error("invalid calibration field '{field}': {reason}")]
    InvalidField {
        /// Calibration field implicated.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Simulation horizon must cover at least one period.
    #[error("horizon must be at least 1 period, got {0}")]
    InvalidHorizon(usize),

    /// Driver correlation matrix is malformed or not positive definite.
    #[error("driver correlation matrix: {0}")]
    Correlation(#[from] CorrelationError),
}

impl CalibrationError {
    /// Shorthand for a field rejection.
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// A single trajectory failed mid-simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrajectoryError {
    /// State left the valid numeric range (NaN, infinity, or an absurd
    /// debt ratio). The trajectory is abandoned at the period boundary.
    #[error("numeric divergence at period {period}: {quantity} = {value}")]
    NumericDivergence {
        /// Period index at which divergence was detected.
        period: usize,
        /// Name of the diverging quantity.
        quantity: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Run-level failure surfaced to the presentation boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnsembleError {
    /// Calibration rejected before any trajectory ran.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Too many trajectories diverged for the ensemble to be trusted.
    #[error("{failed} of {total} trajectories failed, exceeding the tolerated fraction {max_fraction}")]
    FailureThresholdExceeded {
        /// Number of failed trajectories.
        failed: usize,
        /// Total trajectories attempted.
        total: usize,
        /// Configured tolerance.
        max_fraction: f64,
    },

    /// Aggregation requested on zero successful trajectories.
    #[error("ensemble contains no successful trajectories to aggregate")]
    EmptyEnsemble,

    /// Aggregation requested for a period the ensemble does not cover.
    #[error("period {period} is out of range for horizon {horizon}")]
    PeriodOutOfRange {
        /// Requested period index.
        period: usize,
        /// Number of periods the ensemble covers.
        horizon: usize,
    },

    /// Sub-ensemble size outside the allowed range.
    #[error("invalid sub-ensemble size: {0}")]
    InvalidSubEnsembleSize(usize),
}
