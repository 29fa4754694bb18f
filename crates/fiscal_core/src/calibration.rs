//! Calibration parameters for a simulation run.
//!
//! One [`CalibrationParameters`] value is shared read-only by every
//! trajectory of a run. The core never parses spreadsheets or other raw
//! formats; the excluded data-loading layer delivers these fields already
//! populated. Validation happens once, up front, and any rejection aborts
//! the run before simulation work starts.
//!
//! All monetary fields are in one consistent unit basis (millions of the
//! base currency in the Bolivia baseline); all rates are per period after
//! scaling by `dt`.

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;
use crate::math::correlation::CorrelationMatrix;

/// Number of stochastic drivers: gas price, mineral price, revenue shock,
/// interest-rate shock. The calibration correlation matrix must match.
pub const NUM_DRIVERS: usize = 4;

/// Driver ordering inside shock vectors and the correlation matrix.
pub mod driver {
    /// Gas price shock index.
    pub const GAS: usize = 0;
    /// Mineral price shock index.
    pub const MINERALS: usize = 1;
    /// Tax-revenue shock index.
    pub const REVENUE: usize = 2;
    /// Interest-rate shock index.
    pub const RATE: usize = 3;
}

/// Mean-reverting price process for one exported commodity.
///
/// Discretized Ornstein-Uhlenbeck:
/// `p[t] = p[t-1] + speed * (target - p[t-1]) * dt + vol * sqrt(dt) * w[t]`,
/// floored at `price_floor`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommoditySpec {
    /// Price at period 0.
    pub initial_price: f64,
    /// Long-run level the price reverts toward.
    pub long_run_target: f64,
    /// Mean-reversion speed (per year).
    pub reversion_speed: f64,
    /// Annualized price volatility (absolute units).
    pub volatility: f64,
    /// Hard floor; realized prices never fall below this.
    pub price_floor: f64,
    /// Export volume per period (physical units).
    pub export_volume: f64,
    /// Government take on export proceeds, in [0, 1].
    pub government_take: f64,
}

impl CommoditySpec {
    fn validate(&self, name: &'static str) -> Result<(), CalibrationError> {
        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(CalibrationError::field(name, "initial price must be positive"));
        }
        if !self.long_run_target.is_finite() || self.long_run_target <= 0.0 {
            return Err(CalibrationError::field(name, "long-run target must be positive"));
        }
        if self.reversion_speed < 0.0 || !self.reversion_speed.is_finite() {
            return Err(CalibrationError::field(name, "reversion speed must be non-negative"));
        }
        if self.volatility < 0.0 || !self.volatility.is_finite() {
            return Err(CalibrationError::field(name, "volatility must be non-negative"));
        }
        if self.price_floor < 0.0 || self.price_floor > self.initial_price {
            return Err(CalibrationError::field(
                name,
                "price floor must be non-negative and below the initial price",
            ));
        }
        if self.export_volume < 0.0 {
            return Err(CalibrationError::field(name, "export volume must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.government_take) {
            return Err(CalibrationError::field(name, "government take must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Subsidy policy rule driving the non-tax expenditure channel.
///
/// The exact functional form is a policy choice, so it is configurable
/// rather than hard-coded. `InverseToPrice` is the fuel-subsidy shape:
/// the outlay grows when the gas price drops below its reference level,
/// coupling expenditure to the stochastic driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SubsidyRule {
    /// No subsidy outlay.
    None,
    /// Outlay is a fixed share of GDP every period.
    FixedShare {
        /// Share of GDP, in [0, 1].
        share: f64,
    },
    /// Outlay scales inversely with the gas price:
    /// `base_share * gdp * min(reference_price / price, cap_multiple)`.
    InverseToPrice {
        /// GDP share spent when the price sits at its reference level.
        base_share: f64,
        /// Price at which the multiplier is exactly 1.
        reference_price: f64,
        /// Upper bound on the price multiplier.
        cap_multiple: f64,
    },
}

impl SubsidyRule {
    fn validate(&self) -> Result<(), CalibrationError> {
        match *self {
            SubsidyRule::None => Ok(()),
            SubsidyRule::FixedShare { share } => {
                if !(0.0..=1.0).contains(&share) {
                    return Err(CalibrationError::field(
                        "subsidy_rule",
                        "fixed share must be in [0, 1]",
                    ));
                }
                Ok(())
            }
            SubsidyRule::InverseToPrice {
                base_share,
                reference_price,
                cap_multiple,
            } => {
                if !(0.0..=1.0).contains(&base_share) {
                    return Err(CalibrationError::field(
                        "subsidy_rule",
                        "base share must be in [0, 1]",
                    ));
                }
                if reference_price <= 0.0 || !reference_price.is_finite() {
                    return Err(CalibrationError::field(
                        "subsidy_rule",
                        "reference price must be positive",
                    ));
                }
                if cap_multiple < 1.0 || !cap_multiple.is_finite() {
                    return Err(CalibrationError::field(
                        "subsidy_rule",
                        "cap multiple must be at least 1",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Immutable inputs for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// Base-year nominal GDP.
    pub base_gdp: f64,
    /// Debt stock at period 0 (domestic plus external).
    pub base_debt: f64,
    /// Share of the debt stock denominated in foreign currency, in [0, 1].
    pub external_debt_share: f64,
    /// Nominal interest rate on the debt stock (annualized).
    pub nominal_interest_rate: f64,
    /// Additional spread paid on the external share (annualized).
    pub external_rate_spread: f64,
    /// Nominal GDP growth per year.
    pub gdp_growth: f64,
    /// Exchange-rate depreciation per year, applied to external debt as a
    /// valuation adjustment.
    pub fx_depreciation: f64,
    /// Effective tax rate on the GDP tax base, in [0, 1].
    pub tax_rate: f64,
    /// Elasticity of tax collection with respect to GDP (1 = proportional).
    pub tax_elasticity: f64,
    /// Baseline public spending as a share of GDP, in [0, 1].
    pub spending_share: f64,
    /// Subsidy policy rule.
    pub subsidy_rule: SubsidyRule,
    /// Natural gas price process and export profile.
    pub gas: CommoditySpec,
    /// Mineral price process and export profile.
    pub minerals: CommoditySpec,
    /// Annualized standard deviation of the multiplicative tax-revenue shock.
    pub revenue_shock_vol: f64,
    /// Annualized standard deviation of the additive interest-rate shock.
    pub rate_shock_vol: f64,
    /// 4x4 correlation matrix over the drivers, ordered per [`driver`].
    pub correlation: CorrelationMatrix,
    /// Number of simulated periods; must be at least 1.
    pub horizon: usize,
    /// Period length in years (1.0 = annual, 0.25 = quarterly).
    pub dt: f64,
    /// Debt/GDP level above which sustainability is flagged.
    pub debt_gdp_threshold: f64,
    /// Window (periods) for the monotone-increase sustainability check.
    pub monotone_tail_window: usize,
}

impl CalibrationParameters {
    /// Validates every field, including positive definiteness of the
    /// correlation matrix via a trial Cholesky decomposition.
    ///
    /// # Errors
    ///
    /// The first offending field, as [`CalibrationError`].
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.horizon < 1 {
            return Err(CalibrationError::InvalidHorizon(self.horizon));
        }
        if !self.base_gdp.is_finite() || self.base_gdp <= 0.0 {
            return Err(CalibrationError::field("base_gdp", "must be positive"));
        }
        if !self.base_debt.is_finite() || self.base_debt < 0.0 {
            return Err(CalibrationError::field("base_debt", "must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.external_debt_share) {
            return Err(CalibrationError::field(
                "external_debt_share",
                "must be in [0, 1]",
            ));
        }
        if self.nominal_interest_rate < 0.0 || !self.nominal_interest_rate.is_finite() {
            return Err(CalibrationError::field(
                "nominal_interest_rate",
                "must be non-negative",
            ));
        }
        if self.external_rate_spread < 0.0 || !self.external_rate_spread.is_finite() {
            return Err(CalibrationError::field(
                "external_rate_spread",
                "must be non-negative",
            ));
        }
        if !self.gdp_growth.is_finite() {
            return Err(CalibrationError::field("gdp_growth", "must be finite"));
        }
        if !self.fx_depreciation.is_finite() {
            return Err(CalibrationError::field("fx_depreciation", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(CalibrationError::field("tax_rate", "must be in [0, 1]"));
        }
        if self.tax_elasticity < 0.0 || !self.tax_elasticity.is_finite() {
            return Err(CalibrationError::field(
                "tax_elasticity",
                "must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.spending_share) {
            return Err(CalibrationError::field("spending_share", "must be in [0, 1]"));
        }
        self.subsidy_rule.validate()?;
        self.gas.validate("gas")?;
        self.minerals.validate("minerals")?;
        if self.revenue_shock_vol < 0.0 || !self.revenue_shock_vol.is_finite() {
            return Err(CalibrationError::field(
                "revenue_shock_vol",
                "must be non-negative",
            ));
        }
        if self.rate_shock_vol < 0.0 || !self.rate_shock_vol.is_finite() {
            return Err(CalibrationError::field(
                "rate_shock_vol",
                "must be non-negative",
            ));
        }
        if self.correlation.dim() != NUM_DRIVERS {
            return Err(CalibrationError::field(
                "correlation",
                format!("must be {NUM_DRIVERS}x{NUM_DRIVERS}"),
            ));
        }
        // Positive definiteness check; the factor itself is recomputed by
        // the path generator.
        self.correlation.cholesky()?;
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(CalibrationError::field("dt", "must be positive"));
        }
        if self.debt_gdp_threshold <= 0.0 || !self.debt_gdp_threshold.is_finite() {
            return Err(CalibrationError::field(
                "debt_gdp_threshold",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Baseline calibration for Bolivia, 2020 base year, annual periods.
    ///
    /// Levels are in millions of bolivianos except commodity prices
    /// (USD per physical unit). Figures follow the offline calibration
    /// used for the 2020-2025 deficit projections.
    pub fn bolivia_baseline() -> Self {
        Self {
            base_gdp: 40_000.0,
            base_debt: 13_000.0,
            external_debt_share: 8_000.0 / 13_000.0,
            nominal_interest_rate: 0.06,
            external_rate_spread: 0.03,
            gdp_growth: 0.03,
            fx_depreciation: 0.02,
            tax_rate: 0.25,
            tax_elasticity: 1.1,
            spending_share: 0.30,
            subsidy_rule: SubsidyRule::InverseToPrice {
                base_share: 0.05,
                reference_price: 50.0,
                cap_multiple: 2.0,
            },
            gas: CommoditySpec {
                initial_price: 50.0,
                long_run_target: 52.0,
                reversion_speed: 0.5,
                volatility: 12.5,
                price_floor: 20.0,
                export_volume: 100.0,
                government_take: 0.18,
            },
            minerals: CommoditySpec {
                initial_price: 2_500.0,
                long_run_target: 2_550.0,
                reversion_speed: 0.4,
                volatility: 500.0,
                price_floor: 1_000.0,
                export_volume: 1.0,
                government_take: 0.05,
            },
            revenue_shock_vol: 0.03,
            rate_shock_vol: 0.01,
            correlation: CorrelationMatrix::new(
                &[
                    1.0, 0.4, 0.3, -0.2, //
                    0.4, 1.0, 0.2, -0.1, //
                    0.3, 0.2, 1.0, 0.0, //
                    -0.2, -0.1, 0.0, 1.0,
                ],
                NUM_DRIVERS,
            )
            .expect("baseline correlation matrix is well-formed"),
            horizon: 6,
            dt: 1.0,
            debt_gdp_threshold: 0.60,
            monotone_tail_window: 3,
        }
    }

    /// Copy of this calibration with every stochastic term silenced.
    ///
    /// Used for deterministic sweep runs: commodity volatilities and shock
    /// standard deviations become zero, so every shock realizes at its
    /// expected value and the trajectory is the expected path.
    pub fn zeroed_shocks(&self) -> Self {
        let mut out = self.clone();
        out.gas.volatility = 0.0;
        out.minerals.volatility = 0.0;
        out.revenue_shock_vol = 0.0;
        out.rate_shock_vol = 0.0;
        out
    }
}
