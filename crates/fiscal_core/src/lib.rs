//! # Fiscal Core (Foundation Layer)
//!
//! Calibration parameters, the period/trajectory data model, the error
//! taxonomy, and the correlation math shared by the model and engine layers.
//!
//! This crate holds everything that is pure data or pure numerics:
//!
//! - [`calibration::CalibrationParameters`]: immutable per-run inputs with
//!   validation
//! - [`types`]: `DriverPath`, `PeriodState`, `Trajectory`, anomaly records
//! - [`math::correlation`]: correlation matrix validation and Cholesky
//!   decomposition for correlated shock generation
//! - [`error`]: `CalibrationError`, `TrajectoryError`, `EnsembleError`
//!
//! The stochastic processes, fiscal accounting, and debt dynamics that
//! consume these types live in `fiscal_models`; orchestration lives in
//! `fiscal_engine`.

pub mod calibration;
pub mod error;
pub mod math;
pub mod types;

pub use calibration::{CalibrationParameters, CommoditySpec, SubsidyRule};
pub use error::{CalibrationError, EnsembleError, TrajectoryError};
pub use types::{Anomaly, AnomalyKind, DriverPath, PeriodState, Trajectory};
