//! Ensemble container for completed Monte Carlo runs.

use fiscal_core::{Trajectory, TrajectoryError};

/// Record of one trajectory that diverged mid-run.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryFailure {
    /// Slot index within the run.
    pub index: usize,
    /// Derived seed the trajectory ran under.
    pub seed: u64,
    /// What went wrong.
    pub error: TrajectoryError,
}

/// All trajectory slots of one Monte Carlo run, sharing one calibration.
///
/// Frozen once the orchestrator hands it over: successful trajectories
/// in slot order, plus a failure record per diverged slot. Aggregation
/// reads only the successes; the failure records exist for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationEnsemble {
    /// Master seed the per-trajectory seeds were derived from.
    pub master_seed: u64,
    /// Successful trajectories, ordered by slot index.
    pub trajectories: Vec<Trajectory>,
    /// Diverged slots, ordered by slot index.
    pub failures: Vec<TrajectoryFailure>,
}

impl SimulationEnsemble {
    /// Number of trajectories that completed.
    #[inline]
    pub fn success_count(&self) -> usize {
        self.trajectories.len()
    }

    /// Number of trajectories that diverged.
    #[inline]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total slots attempted.
    #[inline]
    pub fn attempted(&self) -> usize {
        self.trajectories.len() + self.failures.len()
    }

    /// Fraction of attempted slots that diverged.
    pub fn failure_fraction(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            0.0
        } else {
            self.failure_count() as f64 / attempted as f64
        }
    }

    /// Number of trajectories carrying at least one accounting anomaly.
    pub fn anomalous_count(&self) -> usize {
        self.trajectories
            .iter()
            .filter(|t| !t.anomalies.is_empty())
            .count()
    }

    /// Simulation horizon, zero for an ensemble with no successes.
    pub fn horizon(&self) -> usize {
        self.trajectories
            .first()
            .map_or(0, |t| t.periods.len())
    }
}
