//! Subsidy policy rules.
//!
//! The subsidy channel is the intended non-linearity of the model: under
//! `InverseToPrice` the outlay moves against the gas price, so a price
//! slump raises spending exactly when resource revenue is falling.

use fiscal_core::SubsidyRule;

/// Subsidy outlay for one period under the given rule.
///
/// `gdp` is the period's GDP level, `gas_price` the realized gas price.
pub fn subsidy_outlay(rule: &SubsidyRule, gdp: f64, gas_price: f64) -> f64 {
    match *rule {
        SubsidyRule::None => 0.0,
        SubsidyRule::FixedShare { share } => share * gdp,
        SubsidyRule::InverseToPrice {
            base_share,
            reference_price,
            cap_multiple,
        } => {
            // The calibration price floor keeps gas_price positive, so
            // the ratio is well-defined; the cap bounds the outlay when
            // the price sits near that floor.
            let multiplier = (reference_price / gas_price).min(cap_multiple);
            base_share * gdp * multiplier
        }
    }
}
