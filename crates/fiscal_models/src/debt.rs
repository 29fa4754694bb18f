//! Debt dynamics: accumulation identity, valuation, sustainability.
//!
//! The standard debt-accumulation identity, per period:
//!
//! ```text
//! debt[t] = debt[t-1] * (1 + r[t]) - primary_balance[t] + valuation[t]
//! ```
//!
//! where `r[t]` is the effective per-period rate (nominal rate plus the
//! external spread weighted by the external share, scaled by `dt`, plus
//! the period's rate shock) and `valuation[t]` is the stock-flow
//! adjustment from exchange-rate depreciation on the external share of
//! the stock. All arithmetic is `f64`; ratios are never truncated.
//!
//! Sustainability checks are reported, never enforced: a trajectory that
//! breaches the threshold keeps simulating.

use fiscal_core::{CalibrationParameters, TrajectoryError};

/// Debt ratios beyond this bound are treated as numeric divergence.
/// 1000 means debt at 100,000% of GDP; no economic reading survives
/// that, and catching it here stops overflow a few periods later.
pub const MAX_DEBT_TO_GDP: f64 = 1_000.0;

/// Result of rolling the debt stock through one period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebtStep {
    /// Effective per-period interest rate applied.
    pub interest_rate: f64,
    /// Interest paid on the prior stock.
    pub interest_payment: f64,
    /// Valuation adjustment from exchange-rate movement.
    pub valuation_adjustment: f64,
    /// Primary balance minus interest payment.
    pub overall_balance: f64,
    /// End-of-period debt stock.
    pub debt_stock: f64,
    /// Debt stock over the period's GDP.
    pub debt_to_gdp: f64,
}

/// Applies the debt-accumulation identity for one period.
///
/// `rate_shock` is the period's realized interest-rate shock from the
/// driver path (already scaled to the period length by the generator).
pub fn roll_debt(
    params: &CalibrationParameters,
    prev_debt: f64,
    gdp: f64,
    primary_balance: f64,
    rate_shock: f64,
) -> DebtStep {
    let annual_rate =
        params.nominal_interest_rate + params.external_debt_share * params.external_rate_spread;
    let interest_rate = annual_rate * params.dt + rate_shock;

    let interest_payment = prev_debt * interest_rate;
    let valuation_adjustment =
        prev_debt * params.external_debt_share * params.fx_depreciation * params.dt;

    let debt_stock = prev_debt * (1.0 + interest_rate) - primary_balance + valuation_adjustment;

    DebtStep {
        interest_rate,
        interest_payment,
        valuation_adjustment,
        overall_balance: primary_balance - interest_payment,
        debt_stock,
        debt_to_gdp: debt_stock / gdp,
    }
}

/// Divergence guard, checked once per period boundary.
///
/// # Errors
///
/// [`TrajectoryError::NumericDivergence`] when the debt stock is not
/// finite or the debt ratio leaves `[-MAX_DEBT_TO_GDP, MAX_DEBT_TO_GDP]`.
pub fn check_divergence(period: usize, step: &DebtStep) -> Result<(), TrajectoryError> {
    if !step.debt_stock.is_finite() {
        return Err(TrajectoryError::NumericDivergence {
            period,
            quantity: "debt_stock",
            value: step.debt_stock,
        });
    }
    if !step.debt_to_gdp.is_finite() || step.debt_to_gdp.abs() > MAX_DEBT_TO_GDP {
        return Err(TrajectoryError::NumericDivergence {
            period,
            quantity: "debt_to_gdp",
            value: step.debt_to_gdp,
        });
    }
    Ok(())
}

/// Reported sustainability indicators for one debt/GDP series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SustainabilityCheck {
    /// Debt/GDP exceeds the calibrated threshold at horizon end.
    pub threshold_breached: bool,
    /// Debt/GDP rises monotonically over the final window.
    pub monotone_tail: bool,
}

/// Evaluates both sustainability indicators over a debt/GDP series.
///
/// The monotone check looks at the final `window` periods; a window of
/// zero or one, or a series shorter than the window, reports `false`
/// for that indicator.
pub fn evaluate_sustainability(
    debt_to_gdp: &[f64],
    threshold: f64,
    window: usize,
) -> SustainabilityCheck {
    let threshold_breached = debt_to_gdp.last().is_some_and(|&last| last > threshold);

    let monotone_tail = if window >= 2 && debt_to_gdp.len() >= window {
        debt_to_gdp[debt_to_gdp.len() - window..]
            .windows(2)
            .all(|pair| pair[1] > pair[0])
    } else {
        false
    };

    SustainabilityCheck {
        threshold_breached,
        monotone_tail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fiscal_core::CalibrationParameters;

    fn flat_params() -> CalibrationParameters {
        // All-domestic debt, no FX channel: the identity reduces to
        // debt[t] = debt[t-1] * (1 + r*dt) - primary.
        let mut params = CalibrationParameters::bolivia_baseline();
        params.external_debt_share = 0.0;
        params.external_rate_spread = 0.0;
        params.fx_depreciation = 0.0;
        params.nominal_interest_rate = 0.05;
        params.dt = 1.0;
        params
    }

    #[test]
    fn identity_holds_without_fx() {
        let params = flat_params();
        let step = roll_debt(&params, 1_000.0, 10_000.0, -20.0, 0.0);

        assert_relative_eq!(step.interest_rate, 0.05);
        assert_relative_eq!(step.interest_payment, 50.0);
        assert_relative_eq!(step.valuation_adjustment, 0.0);
        // 1000 * 1.05 - (-20) = 1070
        assert_relative_eq!(step.debt_stock, 1_070.0);
        assert_relative_eq!(step.debt_to_gdp, 0.107);
        assert_relative_eq!(step.overall_balance, -70.0);
    }

    #[test]
    fn valuation_adjustment_hits_external_share() {
        let mut params = flat_params();
        params.external_debt_share = 0.5;
        params.fx_depreciation = 0.10;

        let step = roll_debt(&params, 1_000.0, 10_000.0, 0.0, 0.0);
        // Half the stock revalued by 10%.
        assert_relative_eq!(step.valuation_adjustment, 50.0);
        assert_relative_eq!(
            step.debt_stock,
            1_000.0 * (1.0 + step.interest_rate) + 50.0
        );
    }

    #[test]
    fn external_spread_raises_the_effective_rate() {
        let mut params = flat_params();
        params.external_debt_share = 0.5;
        params.external_rate_spread = 0.02;
        let step = roll_debt(&params, 1_000.0, 10_000.0, 0.0, 0.0);
        assert_relative_eq!(step.interest_rate, 0.05 + 0.5 * 0.02);
    }

    #[test]
    fn rate_shock_is_additive() {
        let params = flat_params();
        let base = roll_debt(&params, 1_000.0, 10_000.0, 0.0, 0.0);
        let shocked = roll_debt(&params, 1_000.0, 10_000.0, 0.0, 0.01);
        assert_relative_eq!(shocked.interest_rate, base.interest_rate + 0.01);
    }

    #[test]
    fn surplus_reduces_the_stock() {
        let params = flat_params();
        let step = roll_debt(&params, 1_000.0, 10_000.0, 100.0, 0.0);
        assert_relative_eq!(step.debt_stock, 1_050.0 - 100.0);
    }

    #[test]
    fn divergence_rejects_non_finite_stock() {
        let step = DebtStep {
            interest_rate: 0.05,
            interest_payment: 0.0,
            valuation_adjustment: 0.0,
            overall_balance: 0.0,
            debt_stock: f64::INFINITY,
            debt_to_gdp: f64::INFINITY,
        };
        let err = check_divergence(4, &step).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::NumericDivergence { period: 4, .. }
        ));
    }

    #[test]
    fn divergence_rejects_absurd_ratio() {
        let step = DebtStep {
            interest_rate: 0.05,
            interest_payment: 0.0,
            valuation_adjustment: 0.0,
            overall_balance: 0.0,
            debt_stock: 1e12,
            debt_to_gdp: 2_000.0,
        };
        assert!(check_divergence(0, &step).is_err());
    }

    #[test]
    fn sane_step_passes_the_guard() {
        let params = flat_params();
        let step = roll_debt(&params, 1_000.0, 10_000.0, -20.0, 0.0);
        check_divergence(1, &step).unwrap();
    }

    #[test]
    fn sustainability_threshold_uses_final_period() {
        let check = evaluate_sustainability(&[0.4, 0.5, 0.7], 0.6, 0);
        assert!(check.threshold_breached);

        let check = evaluate_sustainability(&[0.7, 0.5, 0.4], 0.6, 0);
        assert!(!check.threshold_breached);
    }

    #[test]
    fn monotone_tail_detects_rising_window() {
        let series = [0.5, 0.48, 0.52, 0.55, 0.60];
        assert!(evaluate_sustainability(&series, 1.0, 3).monotone_tail);
        // The full series is not monotone; a window of 5 catches the dip.
        assert!(!evaluate_sustainability(&series, 1.0, 5).monotone_tail);
    }

    #[test]
    fn monotone_tail_requires_a_usable_window() {
        let series = [0.5, 0.6];
        assert!(!evaluate_sustainability(&series, 1.0, 0).monotone_tail);
        assert!(!evaluate_sustainability(&series, 1.0, 1).monotone_tail);
        assert!(!evaluate_sustainability(&series, 1.0, 3).monotone_tail);
        assert!(evaluate_sustainability(&series, 1.0, 2).monotone_tail);
    }

    #[test]
    fn empty_series_reports_nothing() {
        let check = evaluate_sustainability(&[], 0.6, 3);
        assert_eq!(check, SustainabilityCheck::default());
    }
}
