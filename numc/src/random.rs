/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};

use crate::{Matrix, MatrixError};

/// Parameters for randomized initialization.
///
/// Missing fields take their default values when deserializing, so `{"seed": 7}` describes
/// values in `[0, 1)` drawn from a generator seeded with 7.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomFill {
    pub seed: u64,
    pub low: f64,
    pub high: f64,
}

impl Default for RandomFill {
    fn default() -> Self {
        Self {
            seed: 0,
            low: 0.0,
            high: 1.0,
        }
    }
}

impl RandomFill {
    pub fn new(seed: u64, low: f64, high: f64) -> Self {
        Self { seed, low, high }
    }

    /// Check that `[low, high)` is a non-empty finite range.
    pub fn validate(&self) -> Result<(), MatrixError> {
        uniform(self.low, self.high).map(|_| ())
    }

    /// Return a generator seeded with `self.seed`.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

fn uniform(low: f64, high: f64) -> Result<Uniform<f64>, MatrixError> {
    Uniform::new(low, high).map_err(|_| MatrixError::InvalidRange { low, high })
}

/// Fill every cell of `matrix` with a value drawn uniformly from `[low, high)`.
///
/// Cells are visited in row-major order, so the result is deterministic for a given
/// generator state.
///
/// # Errors
///
/// Returns [`MatrixError::InvalidRange`] if `low >= high` or either bound is not finite.
/// `matrix` is untouched in that case.
pub fn randomized_fill<R>(
    matrix: &Matrix,
    rng: &mut R,
    low: f64,
    high: f64,
) -> Result<(), MatrixError>
where
    R: Rng + ?Sized,
{
    let distribution = uniform(low, high)?;
    for row in 0..matrix.rows() {
        matrix
            .row_cells(row)
            .iter()
            .for_each(|c| c.set(distribution.sample(rng)));
    }
    Ok(())
}

/// Fill `matrix` using a fresh generator seeded from `params.seed`.
///
/// Two calls with equal parameters produce equal matrices.
pub fn randomized_fill_seeded(matrix: &Matrix, params: &RandomFill) -> Result<(), MatrixError> {
    randomized_fill(matrix, &mut params.rng(), params.low, params.high)
}

impl Matrix {
    /// Allocate a root matrix and fill it according to `params`.
    pub fn random(rows: usize, cols: usize, params: &RandomFill) -> Result<Self, MatrixError> {
        params.validate()?;
        let m = Self::allocate(rows, cols)?;
        randomized_fill_seeded(&m, params)?;
        Ok(m)
    }
}

///////////
// Tests //
///////////
