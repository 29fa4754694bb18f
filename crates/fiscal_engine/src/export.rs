//! Flat record export for downstream analysis.
//!
//! Flattens ensembles and sweep grids into one row per
//! (trajectory, period) and writes them as CSV. Columns are stable:
//! renaming a field here breaks downstream notebooks.

use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fiscal_core::{PeriodState, Trajectory};

use crate::ensemble::SimulationEnsemble;
use crate::sweep::{SensitivityGrid, SweepOutcome};

/// Export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization or I/O failure.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// One flattened (scenario, trajectory, period) row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Sweep scenario label; empty for a plain Monte Carlo run.
    pub scenario: String,
    /// Trajectory slot index within its run.
    pub trajectory: usize,
    /// Seed the trajectory ran under.
    pub seed: u64,
    /// Period index.
    pub period: usize,
    /// Nominal GDP level.
    pub gdp: f64,
    /// Tax revenue.
    pub tax_revenue: f64,
    /// Gas export revenue.
    pub gas_revenue: f64,
    /// Mineral export revenue.
    pub mineral_revenue: f64,
    /// Total revenue.
    pub revenue: f64,
    /// Baseline spending.
    pub baseline_spending: f64,
    /// Subsidy outlay.
    pub subsidy_outlay: f64,
    /// Total expenditure.
    pub expenditure: f64,
    /// Primary balance.
    pub primary_balance: f64,
    /// Effective per-period interest rate.
    pub interest_rate: f64,
    /// Interest payment.
    pub interest_payment: f64,
    /// Overall balance.
    pub overall_balance: f64,
    /// Valuation adjustment.
    pub valuation_adjustment: f64,
    /// End-of-period debt stock.
    pub debt_stock: f64,
    /// Debt/GDP ratio.
    pub debt_to_gdp: f64,
}

impl Record {
    fn from_period(scenario: &str, trajectory: usize, seed: u64, state: &PeriodState) -> Self {
        Self {
            scenario: scenario.to_string(),
            trajectory,
            seed,
            period: state.period,
            gdp: state.gdp,
            tax_revenue: state.tax_revenue,
            gas_revenue: state.gas_revenue,
            mineral_revenue: state.mineral_revenue,
            revenue: state.revenue,
            baseline_spending: state.baseline_spending,
            subsidy_outlay: state.subsidy_outlay,
            expenditure: state.expenditure,
            primary_balance: state.primary_balance,
            interest_rate: state.interest_rate,
            interest_payment: state.interest_payment,
            overall_balance: state.overall_balance,
            valuation_adjustment: state.valuation_adjustment,
            debt_stock: state.debt_stock,
            debt_to_gdp: state.debt_to_gdp,
        }
    }
}

fn trajectory_records(out: &mut Vec<Record>, scenario: &str, index: usize, trajectory: &Trajectory) {
    for state in &trajectory.periods {
        out.push(Record::from_period(scenario, index, trajectory.seed, state));
    }
}

/// Flattens a Monte Carlo ensemble, one row per (trajectory, period).
///
/// Only successful trajectories appear; failed slots have no periods to
/// export.
pub fn ensemble_records(ensemble: &SimulationEnsemble) -> Vec<Record> {
    let mut out = Vec::with_capacity(ensemble.success_count() * ensemble.horizon());
    for (index, trajectory) in ensemble.trajectories.iter().enumerate() {
        trajectory_records(&mut out, "", index, trajectory);
    }
    out
}

/// Flattens a sweep grid, one row per (scenario, trajectory, period).
pub fn grid_records(grid: &SensitivityGrid) -> Vec<Record> {
    let mut out = Vec::new();
    for entry in grid.entries() {
        match &entry.outcome {
            SweepOutcome::Deterministic(trajectory) => {
                trajectory_records(&mut out, &entry.label, 0, trajectory);
            }
            SweepOutcome::SubEnsemble(ensemble) => {
                for (index, trajectory) in ensemble.trajectories.iter().enumerate() {
                    trajectory_records(&mut out, &entry.label, index, trajectory);
                }
            }
        }
    }
    out
}

/// Writes records as CSV with a header row.
///
/// # Errors
///
/// [`ExportError::Csv`] on serialization or I/O failure.
pub fn write_csv<W: Write>(writer: W, records: &[Record]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::orchestrator::ScenarioRunner;
    use fiscal_core::CalibrationParameters;

    fn small_ensemble() -> SimulationEnsemble {
        let config = RunConfig::builder()
            .trajectory_count(3)
            .master_seed(21)
            .build()
            .unwrap();
        ScenarioRunner::new(CalibrationParameters::bolivia_baseline(), config)
            .unwrap()
            .run_monte_carlo()
            .unwrap()
    }

    #[test]
    fn one_row_per_trajectory_period() {
        let ensemble = small_ensemble();
        let records = ensemble_records(&ensemble);
        assert_eq!(records.len(), 3 * ensemble.horizon());

        // Rows are grouped by trajectory, periods in order.
        assert_eq!(records[0].trajectory, 0);
        assert_eq!(records[0].period, 0);
        let horizon = ensemble.horizon();
        assert_eq!(records[horizon].trajectory, 1);
        assert_eq!(records[horizon].period, 0);
    }

    #[test]
    fn records_mirror_period_states() {
        let ensemble = small_ensemble();
        let records = ensemble_records(&ensemble);
        let state = &ensemble.trajectories[1].periods[2];
        let row = &records[ensemble.horizon() + 2];

        assert_eq!(row.seed, ensemble.trajectories[1].seed);
        assert_eq!(row.gdp, state.gdp);
        assert_eq!(row.debt_stock, state.debt_stock);
        assert_eq!(row.debt_to_gdp, state.debt_to_gdp);
        assert_eq!(row.scenario, "");
    }

    #[test]
    fn csv_has_header_and_all_rows() {
        let ensemble = small_ensemble();
        let records = ensemble_records(&ensemble);

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + records.len());
        assert!(lines[0].starts_with("scenario,trajectory,seed,period,gdp"));
        assert!(lines[0].ends_with("debt_stock,debt_to_gdp"));
    }

    #[test]
    fn grid_rows_carry_their_scenario_label() {
        use crate::sweep::{PresetScenario, SweepMode};

        let config = RunConfig::builder()
            .trajectory_count(1)
            .master_seed(8)
            .build()
            .unwrap();
        let runner =
            ScenarioRunner::new(CalibrationParameters::bolivia_baseline(), config).unwrap();
        let grid = runner
            .run_sweep(
                &[
                    PresetScenario::Baseline.scenario(),
                    PresetScenario::Pessimistic.scenario(),
                ],
                SweepMode::Deterministic,
            )
            .unwrap();

        let records = grid_records(&grid);
        let labels: Vec<&str> = records.iter().map(|r| r.scenario.as_str()).collect();
        assert!(labels.contains(&"baseline"));
        assert!(labels.contains(&"pessimistic"));
    }
}
