//! Mean-reverting commodity price process.
//!
//! Discretized Ornstein-Uhlenbeck with a hard floor:
//!
//! ```text
//! p[t] = p[t-1] + speed * (target - p[t-1]) * dt + vol * sqrt(dt) * w[t]
//! p[t] = max(p[t], floor)
//! ```
//!
//! where `w[t]` is a (possibly correlated) standard normal shock. With
//! zero volatility the path converges geometrically toward the long-run
//! target, which is what the deterministic sweep mode relies on.

use fiscal_core::CommoditySpec;

/// One commodity's price process, parameterized by its calibration spec.
#[derive(Clone, Copy, Debug)]
pub struct OrnsteinUhlenbeck<'a> {
    spec: &'a CommoditySpec,
    dt: f64,
}

impl<'a> OrnsteinUhlenbeck<'a> {
    /// Binds the process to a commodity spec and period length.
    pub fn new(spec: &'a CommoditySpec, dt: f64) -> Self {
        Self { spec, dt }
    }

    /// Price at period 0.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.spec.initial_price
    }

    /// Advances the price by one period given the period's shock `w`.
    ///
    /// The floor binds after the diffusion term, so an extreme negative
    /// shock lands on the floor instead of producing a negative price.
    #[inline]
    pub fn step(&self, prev: f64, w: f64) -> f64 {
        let drift = self.spec.reversion_speed * (self.spec.long_run_target - prev) * self.dt;
        let diffusion = self.spec.volatility * self.dt.sqrt() * w;
        (prev + drift + diffusion).max(self.spec.price_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn spec() -> CommoditySpec {
        CommoditySpec {
            initial_price: 50.0,
            long_run_target: 60.0,
            reversion_speed: 0.5,
            volatility: 10.0,
            price_floor: 20.0,
            export_volume: 100.0,
            government_take: 0.18,
        }
    }

    #[test]
    fn zero_shock_moves_toward_target() {
        let spec = spec();
        let process = OrnsteinUhlenbeck::new(&spec, 1.0);
        let next = process.step(50.0, 0.0);
        // 50 + 0.5 * (60 - 50) = 55
        assert_relative_eq!(next, 55.0, epsilon = 1e-12);
        assert!(next > 50.0 && next < 60.0);
    }

    #[test]
    fn at_target_zero_shock_is_stationary() {
        let spec = spec();
        let process = OrnsteinUhlenbeck::new(&spec, 1.0);
        assert_relative_eq!(process.step(60.0, 0.0), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn positive_shock_raises_price() {
        let spec = spec();
        let process = OrnsteinUhlenbeck::new(&spec, 1.0);
        assert!(process.step(50.0, 1.0) > process.step(50.0, 0.0));
    }

    #[test]
    fn floor_binds_on_extreme_negative_shock() {
        let spec = spec();
        let process = OrnsteinUhlenbeck::new(&spec, 1.0);
        assert_eq!(process.step(50.0, -100.0), 20.0);
    }

    #[test]
    fn dt_scales_both_terms() {
        let spec = spec();
        let quarterly = OrnsteinUhlenbeck::new(&spec, 0.25);
        let next = quarterly.step(50.0, 0.0);
        // 50 + 0.5 * 10 * 0.25 = 51.25
        assert_relative_eq!(next, 51.25, epsilon = 1e-12);
    }

    proptest! {
        // The floor is a hard invariant of the process, whatever the
        // starting price or shock.
        #[test]
        fn step_never_breaks_the_floor(prev in 20f64..500.0, w in -50f64..50.0) {
            let spec = spec();
            let process = OrnsteinUhlenbeck::new(&spec, 1.0);
            prop_assert!(process.step(prev, w) >= spec.price_floor);
        }
    }

    #[test]
    fn zero_volatility_converges_to_target() {
        let mut spec = spec();
        spec.volatility = 0.0;
        let process = OrnsteinUhlenbeck::new(&spec, 1.0);
        let mut price = spec.initial_price;
        for _ in 0..100 {
            price = process.step(price, 0.0);
        }
        assert_relative_eq!(price, spec.long_run_target, epsilon = 1e-6);
    }
}
