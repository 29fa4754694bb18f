//! Correlated driver path generation.
//!
//! Per period, four independent standard normals are drawn, correlated
//! through the Cholesky factor of the calibration correlation matrix,
//! and then consumed in the fixed driver order: the first two feed the
//! commodity processes, the last two become the revenue and rate shocks
//! scaled by their volatilities and `sqrt(dt)`.

use fiscal_core::calibration::{driver, NUM_DRIVERS};
use fiscal_core::math::correlation::CholeskyFactor;
use fiscal_core::{CalibrationError, CalibrationParameters, DriverPath};

use super::mean_reverting::OrnsteinUhlenbeck;
use crate::rng::SimRng;

/// Generates one trajectory's driver path.
///
/// Deterministic in (seed, calibration): the draw order is fixed, so the
/// same inputs reproduce the same path bit-for-bit.
///
/// # Errors
///
/// [`CalibrationError`] if the correlation matrix is not positive
/// definite. Callers normally validate the calibration before any
/// trajectory runs, making this unreachable in practice.
pub fn generate_driver_path(
    params: &CalibrationParameters,
    seed: u64,
) -> Result<DriverPath, CalibrationError> {
    let cholesky = params.correlation.cholesky()?;
    Ok(generate_driver_path_with(params, &cholesky, seed))
}

/// As [`generate_driver_path`], reusing a precomputed Cholesky factor.
///
/// The engine factors the calibration's correlation matrix once per run
/// and shares the factor across trajectories.
pub fn generate_driver_path_with(
    params: &CalibrationParameters,
    cholesky: &CholeskyFactor,
    seed: u64,
) -> DriverPath {
    let gas = OrnsteinUhlenbeck::new(&params.gas, params.dt);
    let minerals = OrnsteinUhlenbeck::new(&params.minerals, params.dt);
    let sqrt_dt = params.dt.sqrt();

    let mut rng = SimRng::from_seed(seed);
    let mut path = DriverPath::with_capacity(params.horizon);
    let mut shocks = [0.0; NUM_DRIVERS];

    let mut gas_price = gas.initial_price();
    let mut mineral_price = minerals.initial_price();

    for _ in 0..params.horizon {
        rng.fill_normal(&mut shocks);
        cholesky.transform_inplace(&mut shocks);

        gas_price = gas.step(gas_price, shocks[driver::GAS]);
        mineral_price = minerals.step(mineral_price, shocks[driver::MINERALS]);

        path.gas_price.push(gas_price);
        path.mineral_price.push(mineral_price);
        path.revenue_shock
            .push(params.revenue_shock_vol * sqrt_dt * shocks[driver::REVENUE]);
        path.rate_shock
            .push(params.rate_shock_vol * sqrt_dt * shocks[driver::RATE]);
    }

    path
}
