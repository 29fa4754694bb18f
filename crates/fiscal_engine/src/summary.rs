//! Ensemble aggregation: percentile bands, breach probabilities, and
//! the sustainability verdict.
//!
//! Percentiles interpolate linearly between order statistics on a
//! sorted copy, so the result is independent of trajectory iteration
//! order, and a one-trajectory ensemble reports that trajectory exactly.

use serde::{Deserialize, Serialize};

use fiscal_core::{CalibrationParameters, EnsembleError};
use fiscal_models::evaluate_sustainability;

use crate::ensemble::SimulationEnsemble;

/// Percentile of sorted data by linear interpolation between order
/// statistics, with rank `q * (n - 1)`.
///
/// `sorted` must be non-empty and ascending; `q` in `[0, 1]`.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Cross-sectional distribution band for one quantity in one period.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// 10th percentile.
    pub p10: f64,
    /// Median.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
    /// Cross-sectional mean.
    pub mean: f64,
}

impl Band {
    fn from_samples(samples: &mut [f64]) -> Self {
        samples.sort_by(f64::total_cmp);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        Self {
            p10: percentile(samples, 0.10),
            p50: percentile(samples, 0.50),
            p90: percentile(samples, 0.90),
            mean,
        }
    }
}

/// Per-period cross-sectional summary over the successful trajectories.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Period index.
    pub period: usize,
    /// Debt/GDP band.
    pub debt_to_gdp: Band,
    /// Overall balance band.
    pub overall_balance: Band,
}

/// Ordinal sustainability verdict for the ensemble.
///
/// Ordered from best to worst, so verdicts compare with `<`/`>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SustainabilityFlag {
    /// Median path ends below the threshold with no warning signs.
    Sustainable,
    /// Median path holds, but the breach probability or the share of
    /// monotonically rising tails is elevated.
    AtRisk,
    /// Median path ends above the calibrated threshold.
    Breached,
}

/// Breach probability above which a non-breached ensemble is flagged
/// [`SustainabilityFlag::AtRisk`].
pub const AT_RISK_BREACH_PROBABILITY: f64 = 0.25;

/// Complete aggregation of one ensemble.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Per-period bands, indexed by period.
    pub periods: Vec<PeriodSummary>,
    /// Probability that debt/GDP ends above the calibrated threshold.
    pub breach_probability: f64,
    /// Ordinal verdict.
    pub sustainability: SustainabilityFlag,
    /// Trajectories that completed.
    pub succeeded: usize,
    /// Trajectories that diverged.
    pub failed: usize,
    /// Completed trajectories carrying at least one accounting anomaly.
    pub anomalous: usize,
}

impl SummaryStatistics {
    /// Summary of the final period.
    pub fn final_period(&self) -> &PeriodSummary {
        self.periods
            .last()
            .expect("summary covers at least one period")
    }
}

/// Custom percentile set for one period's debt/GDP cross-section.
///
/// `quantiles` in `[0, 1]`, any order; results come back in the same
/// order.
///
/// # Errors
///
/// [`EnsembleError::EmptyEnsemble`] when no trajectory completed, and
/// [`EnsembleError::PeriodOutOfRange`] when `period` is at or beyond
/// the ensemble horizon.
pub fn debt_ratio_percentiles(
    ensemble: &SimulationEnsemble,
    period: usize,
    quantiles: &[f64],
) -> Result<Vec<f64>, EnsembleError> {
    if ensemble.trajectories.is_empty() {
        return Err(EnsembleError::EmptyEnsemble);
    }
    let horizon = ensemble.horizon();
    if period >= horizon {
        return Err(EnsembleError::PeriodOutOfRange { period, horizon });
    }
    let mut samples: Vec<f64> = ensemble
        .trajectories
        .iter()
        .map(|tr| tr.periods[period].debt_to_gdp)
        .collect();
    samples.sort_by(f64::total_cmp);
    Ok(quantiles.iter().map(|&q| percentile(&samples, q)).collect())
}

/// Probability that the final debt/GDP ratio exceeds `level`.
///
/// Zero for an ensemble with no successes.
pub fn breach_probability_at(ensemble: &SimulationEnsemble, level: f64) -> f64 {
    if ensemble.trajectories.is_empty() {
        return 0.0;
    }
    let above = ensemble
        .trajectories
        .iter()
        .filter(|t| t.final_period().debt_to_gdp > level)
        .count();
    above as f64 / ensemble.trajectories.len() as f64
}

/// Aggregates an ensemble into per-period bands and run-level verdicts.
///
/// # Errors
///
/// [`EnsembleError::EmptyEnsemble`] when no trajectory completed;
/// degenerate statistics are never fabricated.
pub fn summarize(
    ensemble: &SimulationEnsemble,
    params: &CalibrationParameters,
) -> Result<SummaryStatistics, EnsembleError> {
    if ensemble.trajectories.is_empty() {
        return Err(EnsembleError::EmptyEnsemble);
    }

    let horizon = ensemble.horizon();
    let mut periods = Vec::with_capacity(horizon);
    let mut samples = Vec::with_capacity(ensemble.success_count());
    for t in 0..horizon {
        samples.clear();
        samples.extend(ensemble.trajectories.iter().map(|tr| tr.periods[t].debt_to_gdp));
        let debt_to_gdp = Band::from_samples(&mut samples);

        samples.clear();
        samples.extend(
            ensemble
                .trajectories
                .iter()
                .map(|tr| tr.periods[t].overall_balance),
        );
        let overall_balance = Band::from_samples(&mut samples);

        periods.push(PeriodSummary {
            period: t,
            debt_to_gdp,
            overall_balance,
        });
    }

    let breach_probability = breach_probability_at(ensemble, params.debt_gdp_threshold);

    let rising_tails = ensemble
        .trajectories
        .iter()
        .filter(|tr| {
            let series: Vec<f64> = tr.debt_to_gdp_series().collect();
            evaluate_sustainability(
                &series,
                params.debt_gdp_threshold,
                params.monotone_tail_window,
            )
            .monotone_tail
        })
        .count();
    let rising_share = rising_tails as f64 / ensemble.success_count() as f64;

    let median_final = periods
        .last()
        .expect("horizon is at least one period")
        .debt_to_gdp
        .p50;
    let sustainability = if median_final > params.debt_gdp_threshold {
        SustainabilityFlag::Breached
    } else if breach_probability > AT_RISK_BREACH_PROBABILITY || rising_share > 0.5 {
        SustainabilityFlag::AtRisk
    } else {
        SustainabilityFlag::Sustainable
    };

    Ok(SummaryStatistics {
        periods,
        breach_probability,
        sustainability,
        succeeded: ensemble.success_count(),
        failed: ensemble.failure_count(),
        anomalous: ensemble.anomalous_count(),
    })
}
