//! Stochastic process engine for the exogenous drivers.
//!
//! Produces one [`DriverPath`](fiscal_core::DriverPath) per trajectory:
//! two mean-reverting commodity price series plus correlated tax-revenue
//! and interest-rate shocks.

mod generator;
mod mean_reverting;

pub use generator::{generate_driver_path, generate_driver_path_with};
pub use mean_reverting::OrnsteinUhlenbeck;
