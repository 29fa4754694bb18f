//! Data model: driver paths, period snapshots, trajectories.
//!
//! These are plain serializable records. The model layer produces them,
//! the engine layer collects them, and the aggregation layer reads them;
//! none of them is mutated after its trajectory completes.

use serde::{Deserialize, Serialize};

/// Realized values of every stochastic driver over one trajectory.
///
/// Produced once per trajectory by the process engine, immutable
/// thereafter. All vectors have length equal to the horizon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverPath {
    /// Gas price level per period.
    pub gas_price: Vec<f64>,
    /// Mineral price level per period.
    pub mineral_price: Vec<f64>,
    /// Multiplicative tax-revenue shock per period (0 = no shock).
    pub revenue_shock: Vec<f64>,
    /// Additive interest-rate shock per period.
    pub rate_shock: Vec<f64>,
}

impl DriverPath {
    /// Pre-allocates all four series for `horizon` periods.
    pub fn with_capacity(horizon: usize) -> Self {
        Self {
            gas_price: Vec::with_capacity(horizon),
            mineral_price: Vec::with_capacity(horizon),
            revenue_shock: Vec::with_capacity(horizon),
            rate_shock: Vec::with_capacity(horizon),
        }
    }

    /// Number of periods covered.
    pub fn horizon(&self) -> usize {
        self.gas_price.len()
    }
}

/// What was clamped when an accounting anomaly fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyKind {
    /// Computed revenue was negative and got clamped to zero.
    NegativeRevenue,
    /// Computed expenditure was negative and got clamped to zero.
    NegativeExpenditure,
}

/// Non-fatal accounting diagnostic attached to a trajectory.
///
/// The period continues with the clamped value; the anomaly is recorded
/// so the presentation layer can report it instead of silently
/// propagating a negative flow.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Period index at which the clamp fired.
    pub period: usize,
    /// Which flow was clamped.
    pub kind: AnomalyKind,
    /// The negative value that was replaced by zero.
    pub clamped_value: f64,
}

/// Full fiscal snapshot of one period.
///
/// Invariant for `t > 0`:
/// `debt_stock[t] = debt_stock[t-1] * (1 + interest_rate[t])
///   - primary_balance[t] + valuation_adjustment[t]`,
/// with `debt_stock[0]` rolled forward from the calibration base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodState {
    /// Period index, starting at 0.
    pub period: usize,
    /// Nominal GDP level.
    pub gdp: f64,
    /// Tax revenue after elasticity and shock.
    pub tax_revenue: f64,
    /// Government take on gas exports.
    pub gas_revenue: f64,
    /// Government take on mineral exports.
    pub mineral_revenue: f64,
    /// Total revenue.
    pub revenue: f64,
    /// Baseline (non-subsidy) public spending.
    pub baseline_spending: f64,
    /// Subsidy outlay from the policy rule.
    pub subsidy_outlay: f64,
    /// Total expenditure, subsidies included, interest excluded.
    pub expenditure: f64,
    /// Revenue minus expenditure (no interest cost).
    pub primary_balance: f64,
    /// Effective per-period interest rate applied to the debt stock.
    pub interest_rate: f64,
    /// Interest paid on the prior debt stock.
    pub interest_payment: f64,
    /// Primary balance minus interest payment.
    pub overall_balance: f64,
    /// Stock-flow adjustment from exchange-rate movement on external debt.
    pub valuation_adjustment: f64,
    /// End-of-period debt stock.
    pub debt_stock: f64,
    /// Debt stock over this period's GDP.
    pub debt_to_gdp: f64,
}

/// One completed stochastic trajectory.
///
/// Owned exclusively by the Monte Carlo run that produced it; frozen once
/// the final period is pushed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Trajectory-local seed the driver path was generated from.
    pub seed: u64,
    /// Realized driver values.
    pub drivers: DriverPath,
    /// Per-period fiscal states, length equal to the horizon.
    pub periods: Vec<PeriodState>,
    /// Accounting anomalies encountered along the way.
    pub anomalies: Vec<Anomaly>,
}

impl Trajectory {
    /// Final period snapshot.
    ///
    /// Completed trajectories always cover at least one period (the
    /// calibration enforces `horizon >= 1`).
    pub fn final_period(&self) -> &PeriodState {
        self.periods
            .last()
            .expect("completed trajectory has at least one period")
    }

    /// Debt/GDP series over the horizon.
    pub fn debt_to_gdp_series(&self) -> impl Iterator<Item = f64> + '_ {
        self.periods.iter().map(|p| p.debt_to_gdp)
    }
}
