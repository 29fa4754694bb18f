//! Numeric helpers shared by the model and engine layers.

pub mod correlation;

pub use correlation::{CholeskyFactor, CorrelationError, CorrelationMatrix};
