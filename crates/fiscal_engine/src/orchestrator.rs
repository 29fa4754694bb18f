//! Monte Carlo and sweep orchestration.
//!
//! [`ScenarioRunner`] owns one validated calibration plus a run
//! configuration and evaluates it either as a full Monte Carlo ensemble
//! or as a sensitivity sweep. Trajectories are independent, so the
//! ensemble loop is a Rayon `into_par_iter` over slot indices; each slot
//! derives its own seed from the master seed, which keeps results
//! identical regardless of thread count or scheduling.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use fiscal_core::{CalibrationError, CalibrationParameters, EnsembleError};
use fiscal_models::rng::derive_trajectory_seed;

use crate::config::{RunConfig, MAX_TRAJECTORIES};
use crate::ensemble::{SimulationEnsemble, TrajectoryFailure};
use crate::sweep::{SensitivityGrid, SweepEntry, SweepMode, SweepOutcome, SweepScenario};
use crate::trajectory::simulate_trajectory;

/// Runs Monte Carlo ensembles and sensitivity sweeps over one calibration.
///
/// Construction validates the calibration; nothing is simulated under
/// parameters that did not pass.
#[derive(Clone, Debug)]
pub struct ScenarioRunner {
    params: CalibrationParameters,
    config: RunConfig,
}

impl ScenarioRunner {
    /// Creates a runner over a validated calibration.
    ///
    /// # Errors
    ///
    /// [`EnsembleError::Calibration`] if the calibration is rejected.
    pub fn new(params: CalibrationParameters, config: RunConfig) -> Result<Self, EnsembleError> {
        params.validate()?;
        Ok(Self { params, config })
    }

    /// The calibration this runner simulates.
    #[inline]
    pub fn params(&self) -> &CalibrationParameters {
        &self.params
    }

    /// The run configuration.
    #[inline]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs the full Monte Carlo ensemble.
    ///
    /// # Errors
    ///
    /// [`EnsembleError::FailureThresholdExceeded`] when the fraction of
    /// diverged trajectories exceeds the configured tolerance. Divergent
    /// trajectories below the tolerance are excluded from the ensemble's
    /// successes and carried as failure records.
    pub fn run_monte_carlo(&self) -> Result<SimulationEnsemble, EnsembleError> {
        info!(
            trajectories = self.config.trajectory_count(),
            master_seed = self.config.master_seed(),
            horizon = self.params.horizon,
            "starting Monte Carlo run"
        );
        run_ensemble(
            &self.params,
            self.config.master_seed(),
            self.config.trajectory_count(),
            self.config.max_failure_fraction(),
        )
    }

    /// Evaluates each scenario against the perturbed calibration.
    ///
    /// Scenario order is preserved in the returned grid. In
    /// [`SweepMode::SubEnsemble`] each scenario gets its own master seed
    /// derived from the run seed and the scenario position, so adding a
    /// scenario never reshuffles the draws of the others.
    ///
    /// # Errors
    ///
    /// [`EnsembleError::Calibration`] if a perturbed calibration fails
    /// validation; [`EnsembleError::InvalidSubEnsembleSize`] when the
    /// sub-ensemble size is zero or above the trajectory cap;
    /// [`EnsembleError::FailureThresholdExceeded`] from a sub-ensemble,
    /// as in [`Self::run_monte_carlo`].
    pub fn run_sweep(
        &self,
        scenarios: &[SweepScenario],
        mode: SweepMode,
    ) -> Result<SensitivityGrid, EnsembleError> {
        if let SweepMode::SubEnsemble(count) = mode {
            if count == 0 || count > MAX_TRAJECTORIES {
                return Err(EnsembleError::InvalidSubEnsembleSize(count));
            }
        }
        info!(scenarios = scenarios.len(), ?mode, "starting sensitivity sweep");

        let mut entries = Vec::with_capacity(scenarios.len());
        for (position, scenario) in scenarios.iter().enumerate() {
            let perturbed = scenario.perturbed(&self.params);
            perturbed.validate()?;
            debug!(label = %scenario.label, "evaluating sweep scenario");

            let outcome = match mode {
                SweepMode::Deterministic => {
                    let silent = perturbed.zeroed_shocks();
                    let cholesky = silent
                        .correlation
                        .cholesky()
                        .map_err(CalibrationError::from)?;
                    // Shock terms are all zero, so the seed is inert.
                    let trajectory =
                        simulate_trajectory(&silent, &cholesky, self.config.master_seed())
                            .map_err(|_| divergence_as_threshold(1))?;
                    SweepOutcome::Deterministic(trajectory)
                }
                SweepMode::SubEnsemble(count) => {
                    let scenario_seed =
                        derive_trajectory_seed(self.config.master_seed(), position as u64);
                    SweepOutcome::SubEnsemble(run_ensemble(
                        &perturbed,
                        scenario_seed,
                        count,
                        self.config.max_failure_fraction(),
                    )?)
                }
            };
            entries.push(SweepEntry {
                label: scenario.label.clone(),
                outcome,
            });
        }

        Ok(SensitivityGrid::new(entries))
    }
}

/// A diverged deterministic run has no tolerance to hide behind.
fn divergence_as_threshold(total: usize) -> EnsembleError {
    EnsembleError::FailureThresholdExceeded {
        failed: total,
        total,
        max_fraction: 0.0,
    }
}

/// Simulates `count` trajectories under one calibration.
///
/// Collecting an indexed `into_par_iter` preserves slot order, so the
/// ensemble layout is independent of scheduling.
fn run_ensemble(
    params: &CalibrationParameters,
    master_seed: u64,
    count: usize,
    max_failure_fraction: f64,
) -> Result<SimulationEnsemble, EnsembleError> {
    let cholesky = params
        .correlation
        .cholesky()
        .map_err(CalibrationError::from)?;

    let outcomes: Vec<_> = (0..count)
        .into_par_iter()
        .map(|index| {
            let seed = derive_trajectory_seed(master_seed, index as u64);
            (index, seed, simulate_trajectory(params, &cholesky, seed))
        })
        .collect();

    let mut trajectories = Vec::with_capacity(count);
    let mut failures = Vec::new();
    for (index, seed, outcome) in outcomes {
        match outcome {
            Ok(trajectory) => trajectories.push(trajectory),
            Err(error) => failures.push(TrajectoryFailure { index, seed, error }),
        }
    }

    if !failures.is_empty() {
        warn!(
            failed = failures.len(),
            total = count,
            "trajectories diverged and were excluded"
        );
    }
    if failures.len() as f64 / count as f64 > max_failure_fraction {
        return Err(EnsembleError::FailureThresholdExceeded {
            failed: failures.len(),
            total: count,
            max_fraction: max_failure_fraction,
        });
    }

    info!(
        succeeded = trajectories.len(),
        failed = failures.len(),
        "Monte Carlo run complete"
    );
    Ok(SimulationEnsemble {
        master_seed,
        trajectories,
        failures,
    })
}
