//! Single-trajectory simulation.
//!
//! One trajectory is a straight pipeline over the horizon: realized
//! drivers, fiscal flows, debt roll, divergence guard. All model
//! arithmetic lives in `fiscal_models`; this module only sequences it
//! and assembles the [`Trajectory`] record.

use fiscal_core::math::correlation::CholeskyFactor;
use fiscal_core::{CalibrationParameters, PeriodState, Trajectory, TrajectoryError};
use fiscal_models::{check_divergence, compute_fiscal_flows, roll_debt};
use fiscal_models::process::generate_driver_path_with;

/// Simulates one complete trajectory from a validated calibration.
///
/// The Cholesky factor is computed once per run by the orchestrator and
/// shared across trajectories. Deterministic in (seed, calibration).
///
/// # Errors
///
/// [`TrajectoryError::NumericDivergence`] if any period leaves the valid
/// numeric range; the trajectory is abandoned at that period boundary.
pub fn simulate_trajectory(
    params: &CalibrationParameters,
    cholesky: &CholeskyFactor,
    seed: u64,
) -> Result<Trajectory, TrajectoryError> {
    let drivers = generate_driver_path_with(params, cholesky, seed);

    let growth_factor = 1.0 + params.gdp_growth * params.dt;
    let mut gdp = params.base_gdp;
    let mut debt = params.base_debt;

    let mut periods = Vec::with_capacity(params.horizon);
    let mut anomalies = Vec::new();

    for t in 0..params.horizon {
        gdp *= growth_factor;

        let flows = compute_fiscal_flows(
            params,
            t,
            gdp,
            drivers.gas_price[t],
            drivers.mineral_price[t],
            drivers.revenue_shock[t],
        );
        let step = roll_debt(params, debt, gdp, flows.primary_balance, drivers.rate_shock[t]);
        check_divergence(t, &step)?;

        anomalies.extend_from_slice(&flows.anomalies);
        periods.push(PeriodState {
            period: t,
            gdp,
            tax_revenue: flows.tax_revenue,
            gas_revenue: flows.gas_revenue,
            mineral_revenue: flows.mineral_revenue,
            revenue: flows.revenue,
            baseline_spending: flows.baseline_spending,
            subsidy_outlay: flows.subsidy_outlay,
            expenditure: flows.expenditure,
            primary_balance: flows.primary_balance,
            interest_rate: step.interest_rate,
            interest_payment: step.interest_payment,
            overall_balance: step.overall_balance,
            valuation_adjustment: step.valuation_adjustment,
            debt_stock: step.debt_stock,
            debt_to_gdp: step.debt_to_gdp,
        });

        debt = step.debt_stock;
    }

    Ok(Trajectory {
        seed,
        drivers,
        periods,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fiscal_core::CalibrationParameters;

    fn run(params: &CalibrationParameters, seed: u64) -> Trajectory {
        let cholesky = params.correlation.cholesky().unwrap();
        simulate_trajectory(params, &cholesky, seed).unwrap()
    }

    #[test]
    fn covers_the_horizon_in_order() {
        let params = CalibrationParameters::bolivia_baseline();
        let traj = run(&params, 17);

        assert_eq!(traj.periods.len(), params.horizon);
        assert_eq!(traj.drivers.horizon(), params.horizon);
        for (t, state) in traj.periods.iter().enumerate() {
            assert_eq!(state.period, t);
        }
    }

    #[test]
    fn same_seed_reproduces_the_trajectory() {
        let params = CalibrationParameters::bolivia_baseline();
        assert_eq!(run(&params, 99), run(&params, 99));
    }

    #[test]
    fn debt_identity_holds_every_period() {
        let params = CalibrationParameters::bolivia_baseline();
        let traj = run(&params, 4);

        let mut prev_debt = params.base_debt;
        for state in &traj.periods {
            let expected = prev_debt * (1.0 + state.interest_rate) - state.primary_balance
                + state.valuation_adjustment;
            assert_relative_eq!(state.debt_stock, expected, max_relative = 1e-12);
            assert_relative_eq!(state.debt_to_gdp, state.debt_stock / state.gdp);
            prev_debt = state.debt_stock;
        }
    }

    #[test]
    fn gdp_compounds_at_the_calibrated_growth_rate() {
        let params = CalibrationParameters::bolivia_baseline();
        let traj = run(&params, 11);

        let factor = 1.0 + params.gdp_growth * params.dt;
        let mut expected = params.base_gdp;
        for state in &traj.periods {
            expected *= factor;
            assert_relative_eq!(state.gdp, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn zero_shock_trajectory_is_seed_independent() {
        let params = CalibrationParameters::bolivia_baseline().zeroed_shocks();
        let a = run(&params, 1);
        let b = run(&params, 2);
        assert_eq!(a.periods, b.periods);
    }

    #[test]
    fn divergent_dynamics_abort_with_the_offending_period() {
        let mut params = CalibrationParameters::bolivia_baseline().zeroed_shocks();
        params.nominal_interest_rate = 1e7;

        let cholesky = params.correlation.cholesky().unwrap();
        let err = simulate_trajectory(&params, &cholesky, 1).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::NumericDivergence { period: 0, .. }
        ));
    }

    #[test]
    fn overall_balance_subtracts_interest() {
        let params = CalibrationParameters::bolivia_baseline();
        let traj = run(&params, 5);
        for state in &traj.periods {
            assert_relative_eq!(
                state.overall_balance,
                state.primary_balance - state.interest_payment,
                max_relative = 1e-12
            );
        }
    }
}
