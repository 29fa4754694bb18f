//! Monte Carlo run configuration.
//!
//! This module provides the run-level configuration and builder: how
//! many trajectories, which master seed, and how many per-trajectory
//! failures the run tolerates before the whole ensemble is rejected.
//! The economic calibration lives in
//! [`fiscal_core::CalibrationParameters`] and is validated separately.

use thiserror::Error;

/// Maximum number of trajectories allowed per run.
pub const MAX_TRAJECTORIES: usize = 10_000_000;

/// Invalid run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Trajectory count is zero or above [`MAX_TRAJECTORIES`].
    #[error("invalid trajectory count: {0} (must be in [1, {MAX_TRAJECTORIES}])")]
    InvalidTrajectoryCount(usize),

    /// Failure tolerance must be a fraction in [0, 1].
    #[error("invalid max failure fraction: {0} (must be in [0, 1])")]
    InvalidFailureFraction(f64),

    /// A required builder field was never set.
    #[error("missing run parameter '{0}'")]
    MissingParameter(&'static str),
}

/// Immutable run configuration.
///
/// Use [`RunConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use fiscal_engine::RunConfig;
///
/// let config = RunConfig::builder()
///     .trajectory_count(10_000)
///     .master_seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.trajectory_count(), 10_000);
/// assert_eq!(config.master_seed(), 42);
/// ```
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of trajectories to simulate.
    trajectory_count: usize,
    /// Master seed from which per-trajectory seeds are derived.
    master_seed: u64,
    /// Fraction of failed trajectories tolerated before the run aborts.
    max_failure_fraction: f64,
}

impl RunConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Returns the number of trajectories to simulate.
    #[inline]
    pub fn trajectory_count(&self) -> usize {
        self.trajectory_count
    }

    /// Returns the master seed.
    #[inline]
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Returns the tolerated fraction of failed trajectories.
    #[inline]
    pub fn max_failure_fraction(&self) -> f64 {
        self.max_failure_fraction
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `trajectory_count` is 0 or greater than [`MAX_TRAJECTORIES`]
    /// - `max_failure_fraction` is not in `[0, 1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trajectory_count == 0 || self.trajectory_count > MAX_TRAJECTORIES {
            return Err(ConfigError::InvalidTrajectoryCount(self.trajectory_count));
        }
        if !(0.0..=1.0).contains(&self.max_failure_fraction) {
            return Err(ConfigError::InvalidFailureFraction(
                self.max_failure_fraction,
            ));
        }
        Ok(())
    }
}

/// Builder for [`RunConfig`].
///
/// `max_failure_fraction` defaults to zero: any diverging trajectory
/// aborts the run unless the caller opts into a tolerance.
#[derive(Clone, Debug, Default)]
pub struct RunConfigBuilder {
    trajectory_count: Option<usize>,
    master_seed: Option<u64>,
    max_failure_fraction: f64,
}

impl RunConfigBuilder {
    /// Sets the number of trajectories, in `[1, MAX_TRAJECTORIES]`.
    #[inline]
    pub fn trajectory_count(mut self, count: usize) -> Self {
        self.trajectory_count = Some(count);
        self
    }

    /// Sets the master seed for reproducibility.
    #[inline]
    pub fn master_seed(mut self, seed: u64) -> Self {
        self.master_seed = Some(seed);
        self
    }

    /// Sets the tolerated fraction of failed trajectories, in `[0, 1]`.
    #[inline]
    pub fn max_failure_fraction(mut self, fraction: f64) -> Self {
        self.max_failure_fraction = fraction;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required field was not set or a
    /// field is out of range.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let trajectory_count = self
            .trajectory_count
            .ok_or(ConfigError::MissingParameter("trajectory_count"))?;
        let master_seed = self
            .master_seed
            .ok_or(ConfigError::MissingParameter("master_seed"))?;

        let config = RunConfig {
            trajectory_count,
            master_seed,
            max_failure_fraction: self.max_failure_fraction,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_valid() {
        let config = RunConfig::builder()
            .trajectory_count(5_000)
            .master_seed(7)
            .build()
            .unwrap();

        assert_eq!(config.trajectory_count(), 5_000);
        assert_eq!(config.master_seed(), 7);
        assert_eq!(config.max_failure_fraction(), 0.0);
    }

    #[test]
    fn builder_with_failure_fraction() {
        let config = RunConfig::builder()
            .trajectory_count(100)
            .master_seed(1)
            .max_failure_fraction(0.05)
            .build()
            .unwrap();

        assert_eq!(config.max_failure_fraction(), 0.05);
    }

    #[test]
    fn rejects_zero_trajectories() {
        let result = RunConfig::builder()
            .trajectory_count(0)
            .master_seed(1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTrajectoryCount(0))));
    }

    #[test]
    fn rejects_too_many_trajectories() {
        let result = RunConfig::builder()
            .trajectory_count(MAX_TRAJECTORIES + 1)
            .master_seed(1)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidTrajectoryCount(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_failure_fraction() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let result = RunConfig::builder()
                .trajectory_count(10)
                .master_seed(1)
                .max_failure_fraction(bad)
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidFailureFraction(_))
            ));
        }
    }

    #[test]
    fn missing_seed_is_rejected() {
        let result = RunConfig::builder().trajectory_count(10).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameter("master_seed"))
        ));
    }

    #[test]
    fn missing_count_is_rejected() {
        let result = RunConfig::builder().master_seed(42).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameter("trajectory_count"))
        ));
    }
}
