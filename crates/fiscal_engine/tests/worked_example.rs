//! Hand-checkable reference scenario.
//!
//! A deliberately simple calibration where the debt arithmetic can be
//! done on paper: 80% initial debt/GDP, 5% interest, a primary deficit
//! of 2% of GDP, zero growth, no FX channel, no resource revenue, no
//! shocks. Each period the ratio gains the full interest-snowball step:
//!
//! ```text
//! ratio[t] = ratio[t-1] * 1.05 + 0.02
//! ```
//!
//! so the first step lands at exactly 86% and the increments keep
//! growing from 6pp as interest compounds.

use approx::assert_relative_eq;
use fiscal_core::{CalibrationParameters, CommoditySpec, SubsidyRule};
use fiscal_engine::{summarize, RunConfig, ScenarioRunner, SustainabilityFlag};

fn reference_calibration() -> CalibrationParameters {
    let mut params = CalibrationParameters::bolivia_baseline().zeroed_shocks();

    params.base_gdp = 10_000.0;
    params.base_debt = 8_000.0; // 80% of GDP
    params.external_debt_share = 0.0;
    params.external_rate_spread = 0.0;
    params.fx_depreciation = 0.0;
    params.nominal_interest_rate = 0.05;
    params.gdp_growth = 0.0;
    // Revenue 18% of GDP, spending 20%: primary balance -2% of GDP.
    params.tax_rate = 0.18;
    params.tax_elasticity = 1.0;
    params.spending_share = 0.20;
    params.subsidy_rule = SubsidyRule::None;
    params.gas = CommoditySpec {
        export_volume: 0.0,
        ..params.gas
    };
    params.minerals = CommoditySpec {
        export_volume: 0.0,
        ..params.minerals
    };
    params.horizon = 5;
    params.dt = 1.0;
    params.debt_gdp_threshold = 0.70;
    params.monotone_tail_window = 3;
    params
}

#[test]
fn debt_ratio_follows_the_hand_computed_recursion() {
    let params = reference_calibration();
    let config = RunConfig::builder()
        .trajectory_count(1)
        .master_seed(1)
        .build()
        .unwrap();
    let ensemble = ScenarioRunner::new(params.clone(), config)
        .unwrap()
        .run_monte_carlo()
        .unwrap();

    let trajectory = &ensemble.trajectories[0];
    let mut expected_ratio = 0.80;
    for state in &trajectory.periods {
        expected_ratio = expected_ratio * 1.05 + 0.02;
        assert_relative_eq!(state.debt_to_gdp, expected_ratio, max_relative = 1e-12);
        // GDP never moves, the primary deficit is always 2% of it.
        assert_relative_eq!(state.gdp, 10_000.0);
        assert_relative_eq!(state.primary_balance, -200.0, max_relative = 1e-12);
    }

    // First step: 0.80 * 1.05 + 0.02 = 0.86, a 6pp jump.
    assert_relative_eq!(
        trajectory.periods[0].debt_to_gdp,
        0.86,
        max_relative = 1e-12
    );
}

#[test]
fn each_period_adds_at_least_six_points() {
    let params = reference_calibration();
    let config = RunConfig::builder()
        .trajectory_count(1)
        .master_seed(9)
        .build()
        .unwrap();
    let ensemble = ScenarioRunner::new(params, config)
        .unwrap()
        .run_monte_carlo()
        .unwrap();

    let mut prev = 0.80;
    for state in &ensemble.trajectories[0].periods {
        let increment = state.debt_to_gdp - prev;
        assert!(
            increment >= 0.06 - 1e-12,
            "period {} gained only {increment}",
            state.period
        );
        prev = state.debt_to_gdp;
    }
}

#[test]
fn snowballing_debt_is_flagged_breached() {
    let params = reference_calibration();
    let config = RunConfig::builder()
        .trajectory_count(4)
        .master_seed(2)
        .build()
        .unwrap();
    let ensemble = ScenarioRunner::new(params.clone(), config)
        .unwrap()
        .run_monte_carlo()
        .unwrap();
    let summary = summarize(&ensemble, &params).unwrap();

    // Final ratio is ~113% against a 70% threshold, rising every period.
    assert_eq!(summary.sustainability, SustainabilityFlag::Breached);
    assert_relative_eq!(summary.breach_probability, 1.0);
    assert!(summary.final_period().debt_to_gdp.p50 > 1.10);
}
