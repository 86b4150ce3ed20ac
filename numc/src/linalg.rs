/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use tracing::trace;

use crate::{alias::Staged, kernels::check_result, Matrix, MatrixError, Shape};

/// Compute the matrix product `result = a * b`.
///
/// `result` may be `a`, `b`, or a view overlapping either of them. Operands that share
/// cells with `result` are copied before the first write, so
///
/// ```
/// use numc::{linalg, Matrix};
///
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// linalg::multiply(&a, &a, &a).unwrap();
/// assert_eq!(a.to_rows(), vec![vec![7.0, 10.0], vec![15.0, 22.0]]);
/// ```
///
/// # Errors
///
/// Returns [`MatrixError::ShapeMismatch`] unless `a.cols() == b.rows()` and `result` has
/// shape `a.rows() x b.cols()`. [`MatrixError::AllocationFailure`] is returned if a
/// snapshot of an aliased operand cannot be allocated; `result` is untouched in that case.
pub fn multiply(result: &Matrix, a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::mismatch(
            "multiply",
            Shape::new(a.cols(), b.cols()),
            b.shape(),
        ));
    }
    check_result("multiply", result, Shape::new(a.rows(), b.cols()))?;

    let a = Staged::product("multiply", result, a)?;
    let b = Staged::product("multiply", result, b)?;

    for i in 0..a.rows() {
        let lhs = a.row_cells(i);
        for (j, dst) in result.row_cells(i).iter().enumerate() {
            let sum = lhs
                .iter()
                .enumerate()
                .fold(0.0, |acc, (k, x)| acc + x.get() * b.cell(k, j).get());
            dst.set(sum);
        }
    }
    Ok(())
}

/// Compute `result = a^exponent` by repeated multiplication.
///
/// An exponent of zero yields the identity. Otherwise `result` starts as the identity and is
/// multiplied by `a` exactly `exponent` times. `result` may alias `a`.
///
/// # Errors
///
/// * [`MatrixError::ShapeMismatch`] if `a` is not square or `result` does not have the
///   shape of `a`.
/// * [`MatrixError::InvalidExponent`] if `exponent` is negative.
pub fn power(result: &Matrix, a: &Matrix, exponent: i64) -> Result<(), MatrixError> {
    if !a.shape().is_square() {
        return Err(MatrixError::mismatch(
            "power",
            Shape::new(a.rows(), a.rows()),
            a.shape(),
        ));
    }
    if exponent < 0 {
        return Err(MatrixError::InvalidExponent(exponent));
    }
    check_result("power", result, a.shape())?;

    // Writing the identity below would destroy `a` if the two overlap.
    let base = Staged::product("power", result, a)?;

    trace!(shape = %a.shape(), exponent, "computing matrix power");
    set_identity(result);
    for _ in 0..exponent {
        multiply(result, result, &base)?;
    }
    Ok(())
}

/// Overwrite `matrix` with ones on the main diagonal and zeros elsewhere.
pub fn set_identity(matrix: &Matrix) {
    for row in 0..matrix.rows() {
        for (col, cell) in matrix.row_cells(row).iter().enumerate() {
            cell.set(if row == col { 1.0 } else { 0.0 });
        }
    }
}

impl Matrix {
    /// Allocate the `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let m = Self::allocate(n, n)?;
        set_identity(&m);
        Ok(m)
    }
}

///////////
// Tests //
///////////
