//! Per-period revenue and expenditure accounting.
//!
//! Revenue has three components:
//!
//! - tax revenue: `tax_rate * gdp * (gdp / base_gdp)^(elasticity - 1)
//!   * (1 + revenue_shock)`; the elasticity bends collection away from
//!   strict GDP proportionality, the shock captures collection noise
//! - resource revenue: `price * export_volume * government_take` for gas
//!   and minerals
//!
//! Expenditure is baseline spending (`spending_share * gdp`) plus the
//! subsidy outlay from the policy rule. The primary balance is revenue
//! minus expenditure; interest enters only in the debt module.
//!
//! Negative computed totals are clamped to zero and flagged as
//! accounting anomalies rather than silently propagated.

use fiscal_core::{Anomaly, AnomalyKind, CalibrationParameters};

use super::subsidy::subsidy_outlay;

/// Revenue/expenditure breakdown for one period.
#[derive(Clone, Debug, PartialEq)]
pub struct FiscalFlows {
    /// Tax revenue after elasticity and shock.
    pub tax_revenue: f64,
    /// Government take on gas exports.
    pub gas_revenue: f64,
    /// Government take on mineral exports.
    pub mineral_revenue: f64,
    /// Total revenue after any clamp.
    pub revenue: f64,
    /// Baseline (non-subsidy) spending.
    pub baseline_spending: f64,
    /// Subsidy outlay from the policy rule.
    pub subsidy_outlay: f64,
    /// Total expenditure after any clamp, interest excluded.
    pub expenditure: f64,
    /// Revenue minus expenditure.
    pub primary_balance: f64,
    /// Clamp diagnostics, empty in the normal case.
    pub anomalies: Vec<Anomaly>,
}

/// Computes one period's fiscal flows from the realized drivers.
pub fn compute_fiscal_flows(
    params: &CalibrationParameters,
    period: usize,
    gdp: f64,
    gas_price: f64,
    mineral_price: f64,
    revenue_shock: f64,
) -> FiscalFlows {
    let mut anomalies = Vec::new();

    let elasticity_factor = (gdp / params.base_gdp).powf(params.tax_elasticity - 1.0);
    let tax_revenue = params.tax_rate * gdp * elasticity_factor * (1.0 + revenue_shock);
    let gas_revenue = gas_price * params.gas.export_volume * params.gas.government_take;
    let mineral_revenue =
        mineral_price * params.minerals.export_volume * params.minerals.government_take;

    let mut revenue = tax_revenue + gas_revenue + mineral_revenue;
    if revenue < 0.0 {
        anomalies.push(Anomaly {
            period,
            kind: AnomalyKind::NegativeRevenue,
            clamped_value: revenue,
        });
        revenue = 0.0;
    }

    let baseline_spending = params.spending_share * gdp;
    let subsidy = subsidy_outlay(&params.subsidy_rule, gdp, gas_price);

    let mut expenditure = baseline_spending + subsidy;
    if expenditure < 0.0 {
        anomalies.push(Anomaly {
            period,
            kind: AnomalyKind::NegativeExpenditure,
            clamped_value: expenditure,
        });
        expenditure = 0.0;
    }

    FiscalFlows {
        tax_revenue,
        gas_revenue,
        mineral_revenue,
        revenue,
        baseline_spending,
        subsidy_outlay: subsidy,
        expenditure,
        primary_balance: revenue - expenditure,
        anomalies,
    }
}
