/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Elementwise kernels.
//!
//! Every kernel writes into a caller-provided `result` whose shape must match the
//! operands. `result` may be the same matrix as an operand, or a view overlapping one.

use crate::{alias::Staged, Matrix, MatrixError, Shape};

/// Set every cell of `matrix` to `value`.
pub fn fill(matrix: &Matrix, value: f64) {
    for row in 0..matrix.rows() {
        matrix.row_cells(row).iter().for_each(|c| c.set(value));
    }
}

/// Copy every cell of `source` into `result`.
///
/// # Errors
///
/// Returns [`MatrixError::ShapeMismatch`] if the shapes differ.
pub fn copy(result: &Matrix, source: &Matrix) -> Result<(), MatrixError> {
    unary("copy", result, source, |x| x)
}

/// Compute `result = a + b` cell by cell.
///
/// # Errors
///
/// Returns [`MatrixError::ShapeMismatch`] if `a` and `b` differ in shape, or if `result`
/// does not have their shape.
pub fn add(result: &Matrix, a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
    binary("add", result, a, b, |x, y| x + y)
}

/// Compute `result = a - b` cell by cell.
///
/// # Errors
///
/// Returns [`MatrixError::ShapeMismatch`] if `a` and `b` differ in shape, or if `result`
/// does not have their shape.
pub fn subtract(result: &Matrix, a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
    binary("subtract", result, a, b, |x, y| x - y)
}

/// Compute `result = -a` cell by cell.
pub fn negate(result: &Matrix, a: &Matrix) -> Result<(), MatrixError> {
    unary("negate", result, a, |x| -x)
}

/// Compute `result = |a|` cell by cell.
pub fn absolute(result: &Matrix, a: &Matrix) -> Result<(), MatrixError> {
    unary("absolute", result, a, f64::abs)
}

pub(crate) fn check_result(
    op: &'static str,
    result: &Matrix,
    expected: Shape,
) -> Result<(), MatrixError> {
    if result.shape() == expected {
        Ok(())
    } else {
        Err(MatrixError::mismatch(op, expected, result.shape()))
    }
}

fn unary<F>(op: &'static str, result: &Matrix, a: &Matrix, f: F) -> Result<(), MatrixError>
where
    F: Fn(f64) -> f64,
{
    check_result(op, result, a.shape())?;
    let a = Staged::elementwise(op, result, a)?;

    for row in 0..result.rows() {
        result
            .row_cells(row)
            .iter()
            .zip(a.row_cells(row))
            .for_each(|(dst, x)| dst.set(f(x.get())));
    }
    Ok(())
}

fn binary<F>(
    op: &'static str,
    result: &Matrix,
    a: &Matrix,
    b: &Matrix,
    f: F,
) -> Result<(), MatrixError>
where
    F: Fn(f64, f64) -> f64,
{
    if a.shape() != b.shape() {
        return Err(MatrixError::mismatch(op, a.shape(), b.shape()));
    }
    check_result(op, result, a.shape())?;
    let a = Staged::elementwise(op, result, a)?;
    let b = Staged::elementwise(op, result, b)?;

    for row in 0..result.rows() {
        result
            .row_cells(row)
            .iter()
            .zip(a.row_cells(row).iter().zip(b.row_cells(row)))
            .for_each(|(dst, (x, y))| dst.set(f(x.get(), y.get())));
    }
    Ok(())
}

///////////
// Tests //
///////////
