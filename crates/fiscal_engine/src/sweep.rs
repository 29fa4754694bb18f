//! Sensitivity sweeps and preset scenarios.
//!
//! A sweep perturbs the baseline calibration one labelled scenario at a
//! time and re-runs the model under each. Two modes: a deterministic
//! run with every stochastic term silenced (isolates the parameter
//! effect), or a small sub-ensemble per scenario (keeps the stochastic
//! spread visible).

use fiscal_core::{CalibrationParameters, SubsidyRule, Trajectory};

use crate::ensemble::SimulationEnsemble;

/// One parameter adjustment applied to a calibration.
#[derive(Clone, Debug, PartialEq)]
pub enum Perturbation {
    /// Reset the gas price level (initial and long-run target).
    GasPrices {
        /// Price at period 0.
        initial: f64,
        /// Mean-reversion target.
        long_run_target: f64,
    },
    /// Reset the mineral price level (initial and long-run target).
    MineralPrices {
        /// Price at period 0.
        initial: f64,
        /// Mean-reversion target.
        long_run_target: f64,
    },
    /// Replace the gas price volatility.
    GasVolatility(f64),
    /// Replace the GDP growth rate.
    GdpGrowth(f64),
    /// Replace the tax elasticity with respect to GDP.
    TaxElasticity(f64),
    /// Replace the baseline spending share of GDP.
    SpendingShare(f64),
    /// Replace the subsidy policy rule.
    Subsidy(SubsidyRule),
    /// Replace the nominal interest rate on debt.
    NominalInterestRate(f64),
    /// Replace the external borrowing spread.
    ExternalRateSpread(f64),
}

impl Perturbation {
    /// Applies this adjustment in place.
    pub fn apply(&self, params: &mut CalibrationParameters) {
        match self {
            Self::GasPrices {
                initial,
                long_run_target,
            } => {
                params.gas.initial_price = *initial;
                params.gas.long_run_target = *long_run_target;
            }
            Self::MineralPrices {
                initial,
                long_run_target,
            } => {
                params.minerals.initial_price = *initial;
                params.minerals.long_run_target = *long_run_target;
            }
            Self::GasVolatility(vol) => params.gas.volatility = *vol,
            Self::GdpGrowth(rate) => params.gdp_growth = *rate,
            Self::TaxElasticity(elasticity) => params.tax_elasticity = *elasticity,
            Self::SpendingShare(share) => params.spending_share = *share,
            Self::Subsidy(rule) => params.subsidy_rule = rule.clone(),
            Self::NominalInterestRate(rate) => params.nominal_interest_rate = *rate,
            Self::ExternalRateSpread(spread) => params.external_rate_spread = *spread,
        }
    }
}

/// A labelled bundle of perturbations, one sweep entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepScenario {
    /// Human-readable label, unique within a sweep.
    pub label: String,
    /// Adjustments applied on top of the baseline, in order.
    pub perturbations: Vec<Perturbation>,
}

impl SweepScenario {
    /// Creates a scenario from a label and its adjustments.
    pub fn new(label: impl Into<String>, perturbations: Vec<Perturbation>) -> Self {
        Self {
            label: label.into(),
            perturbations,
        }
    }

    /// Baseline calibration with this scenario's adjustments applied.
    pub fn perturbed(&self, baseline: &CalibrationParameters) -> CalibrationParameters {
        let mut params = baseline.clone();
        for perturbation in &self.perturbations {
            perturbation.apply(&mut params);
        }
        params
    }
}

/// Ready-made stress scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetScenario {
    /// Unperturbed calibration.
    Baseline,
    /// High commodity prices, strong growth, elastic revenue.
    Optimistic,
    /// Commodity price slump, near-zero growth, volatile gas.
    Pessimistic,
    /// Spending restraint and trimmed subsidies.
    FiscalAdjustment,
    /// Elevated rates and a wide external spread.
    DebtCrisis,
}

impl PresetScenario {
    /// All presets in presentation order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Baseline,
            Self::Optimistic,
            Self::Pessimistic,
            Self::FiscalAdjustment,
            Self::DebtCrisis,
        ]
    }

    /// Human-readable label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Optimistic => "optimistic",
            Self::Pessimistic => "pessimistic",
            Self::FiscalAdjustment => "fiscal adjustment",
            Self::DebtCrisis => "debt crisis",
        }
    }

    /// The adjustments this preset applies to the baseline.
    pub fn perturbations(&self) -> Vec<Perturbation> {
        match self {
            Self::Baseline => Vec::new(),
            Self::Optimistic => vec![
                Perturbation::GasPrices {
                    initial: 70.0,
                    long_run_target: 70.0,
                },
                Perturbation::MineralPrices {
                    initial: 3_000.0,
                    long_run_target: 3_000.0,
                },
                Perturbation::GdpGrowth(0.045),
                Perturbation::TaxElasticity(1.2),
            ],
            Self::Pessimistic => vec![
                Perturbation::GasPrices {
                    initial: 35.0,
                    long_run_target: 35.0,
                },
                Perturbation::MineralPrices {
                    initial: 1_800.0,
                    long_run_target: 1_800.0,
                },
                Perturbation::GasVolatility(17.5),
                Perturbation::GdpGrowth(0.01),
                Perturbation::TaxElasticity(0.9),
            ],
            Self::FiscalAdjustment => vec![
                Perturbation::SpendingShare(0.25),
                Perturbation::Subsidy(SubsidyRule::InverseToPrice {
                    base_share: 0.03,
                    reference_price: 50.0,
                    cap_multiple: 2.0,
                }),
            ],
            Self::DebtCrisis => vec![
                Perturbation::NominalInterestRate(0.10),
                Perturbation::ExternalRateSpread(0.08),
            ],
        }
    }

    /// This preset as a [`SweepScenario`].
    pub fn scenario(&self) -> SweepScenario {
        SweepScenario::new(self.name(), self.perturbations())
    }
}

/// How each sweep entry is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepMode {
    /// One trajectory per scenario with every stochastic term silenced.
    Deterministic,
    /// A seeded sub-ensemble of the given size per scenario.
    SubEnsemble(usize),
}

/// Result of evaluating one sweep entry.
#[derive(Clone, Debug, PartialEq)]
pub enum SweepOutcome {
    /// Zero-shock trajectory under the perturbed calibration.
    Deterministic(Trajectory),
    /// Stochastic sub-ensemble under the perturbed calibration.
    SubEnsemble(SimulationEnsemble),
}

/// One evaluated sweep entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepEntry {
    /// Scenario label.
    pub label: String,
    /// Evaluated outcome.
    pub outcome: SweepOutcome,
}

/// Evaluated sweep results in scenario order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensitivityGrid {
    entries: Vec<SweepEntry>,
}

impl SensitivityGrid {
    /// Creates a grid from already-ordered entries.
    pub fn new(entries: Vec<SweepEntry>) -> Self {
        Self { entries }
    }

    /// Entries in the order the scenarios were supplied.
    #[inline]
    pub fn entries(&self) -> &[SweepEntry] {
        &self.entries
    }

    /// Looks up one entry by label.
    pub fn get(&self, label: &str) -> Option<&SweepOutcome> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.outcome)
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the grid holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
