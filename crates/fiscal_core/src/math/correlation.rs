//! Correlation matrix and Cholesky decomposition for driver shocks.
//!
//! The stochastic drivers (gas price, mineral price, revenue shock, rate
//! shock) are correlated through a fixed matrix supplied in the
//! calibration. Given `n` independent standard normals `Z`, correlated
//! normals are obtained as `W = L * Z` where `L` is the lower triangular
//! Cholesky factor of the correlation matrix `C = L * L^T`.
//!
//! A correlation matrix must be square and symmetric, have a unit
//! diagonal, off-diagonal entries in `[-1, 1]`, and be positive definite
//! for the decomposition to exist.

use serde::{Deserialize, Serialize};

/// Rejection reasons for a proposed correlation matrix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorrelationError {
    /// Cholesky decomposition hit a non-positive pivot.
    #[error("correlation matrix is not positive definite")]
    NotPositiveDefinite,

    /// Flat data length does not match the declared dimension.
    #[error("expected {expected} elements for the declared dimension, got {got}")]
    InvalidDimensions {
        /// Expected element count (dim * dim).
        expected: usize,
        /// Actual element count supplied.
        got: usize,
    },

    /// A diagonal element is not 1.0.
    #[error("diagonal element {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Row/column index of the offending diagonal.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// The matrix is not symmetric.
    #[error("matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },

    /// An off-diagonal correlation is outside [-1, 1].
    #[error("correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Offending value.
        value: f64,
    },
}

/// Validated correlation matrix in row-major storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl CorrelationMatrix {
    /// Builds a correlation matrix from a flat row-major slice.
    ///
    /// # Errors
    ///
    /// Rejects wrong element counts, non-unit diagonals, asymmetry, and
    /// off-diagonal entries outside `[-1, 1]`. Positive definiteness is
    /// only checked when [`cholesky`](Self::cholesky) is taken.
    pub fn new(data: &[f64], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        const EPS: f64 = 1e-10;

        for i in 0..dim {
            let diag = data[i * dim + i];
            if (diag - 1.0).abs() > EPS {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if (val_ij - val_ji).abs() > EPS {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
                if !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij,
                    });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Identity matrix (uncorrelated drivers).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Matrix dimension `n` (the matrix is `n x n`).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Lower triangular Cholesky factor `L` with `C = L * L^T`.
    ///
    /// # Errors
    ///
    /// [`CorrelationError::NotPositiveDefinite`] when a pivot is not
    /// strictly positive, which also serves as the positive-definiteness
    /// check for calibration validation.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                if j == i {
                    for k in 0..j {
                        let l_jk = lower[j * n + k];
                        sum += l_jk * l_jk;
                    }
                    let diag = self.get(j, j) - sum;
                    if diag <= 0.0 {
                        return Err(CorrelationError::NotPositiveDefinite);
                    }
                    lower[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += lower[i * n + k] * lower[j * n + k];
                    }
                    let l_jj = lower[j * n + j];
                    if l_jj <= 0.0 {
                        return Err(CorrelationError::NotPositiveDefinite);
                    }
                    lower[i * n + j] = (self.get(i, j) - sum) / l_jj;
                }
            }
        }

        Ok(CholeskyFactor {
            data: lower,
            dim: n,
        })
    }
}

/// Lower triangular Cholesky factor used to correlate shock draws.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    data: Vec<f64>,
    dim: usize,
}

impl CholeskyFactor {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(i, j)`; zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Transforms independent standard normals in place: `z <- L * z`.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform_inplace(&self, z: &mut [f64]) {
        assert!(
            z.len() >= self.dim,
            "input length {} is less than matrix dimension {}",
            z.len(),
            self.dim
        );

        let n = self.dim;
        // In-place back-substitution: row i only reads z[0..=i], so
        // iterating from the bottom row up avoids a temporary buffer.
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in 0..=i {
                sum += self.get(i, j) * z[j];
            }
            z[i] = sum;
        }
    }
}
