//! # Fiscal Engine (Orchestration Layer)
//!
//! Runs the fiscal model at scale and condenses the output:
//!
//! - [`config`]: run-level configuration (trajectory count, master
//!   seed, failure tolerance)
//! - [`trajectory`]: the single-trajectory pipeline
//! - [`orchestrator`]: Rayon-parallel Monte Carlo runs and sweeps over
//!   one validated calibration
//! - [`sweep`]: perturbations, preset scenarios, and the sensitivity
//!   grid
//! - [`ensemble`] / [`summary`]: the frozen run container and its
//!   percentile-band aggregation
//! - [`export`]: flat CSV records for downstream analysis
//!
//! Every run is deterministic in (calibration, run config): trajectory
//! seeds are derived from the master seed by slot index, so thread count
//! and scheduling never change the result.

pub mod config;
pub mod ensemble;
pub mod export;
pub mod orchestrator;
pub mod summary;
pub mod sweep;
pub mod trajectory;

pub use config::{ConfigError, RunConfig, RunConfigBuilder};
pub use ensemble::{SimulationEnsemble, TrajectoryFailure};
pub use export::{ensemble_records, grid_records, write_csv, ExportError, Record};
pub use orchestrator::ScenarioRunner;
pub use summary::{
    breach_probability_at, debt_ratio_percentiles, percentile, summarize, Band, PeriodSummary,
    SummaryStatistics, SustainabilityFlag,
};
pub use sweep::{
    Perturbation, PresetScenario, SensitivityGrid, SweepEntry, SweepMode, SweepOutcome,
    SweepScenario,
};
pub use trajectory::simulate_trajectory;
