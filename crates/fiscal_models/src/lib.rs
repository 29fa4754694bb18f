//! # Fiscal Models (Model Layer)
//!
//! The three per-trajectory building blocks of the simulator:
//!
//! - [`process`]: mean-reverting commodity processes and correlated
//!   driver path generation
//! - [`fiscal`]: per-period revenue, expenditure, subsidy, and primary
//!   balance accounting
//! - [`debt`]: the debt-accumulation identity, valuation adjustments,
//!   divergence guards, and sustainability checks
//!
//! Everything here is a pure function of the calibration plus prior
//! state: no global randomness, no shared mutable state. The seeded RNG
//! lives in [`rng`] and is owned by one trajectory at a time, which is
//! what makes the engine layer embarrassingly parallel.

pub mod debt;
pub mod fiscal;
pub mod process;
pub mod rng;

pub use debt::{check_divergence, evaluate_sustainability, roll_debt, DebtStep, SustainabilityCheck};
pub use fiscal::{compute_fiscal_flows, FiscalFlows};
pub use process::{generate_driver_path, generate_driver_path_with, OrnsteinUhlenbeck};
pub use rng::{derive_trajectory_seed, SimRng};
