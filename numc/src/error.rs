/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use thiserror::Error;

use crate::Shape;

/// Errors returned by matrix construction, access and kernels.
///
/// None of these conditions are transient. Retrying the same call with the same arguments
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MatrixError {
    /// A dimension is zero, or a view does not fit inside its parent.
    #[error("invalid shape {shape}: {problem}")]
    InvalidShape { shape: Shape, problem: ShapeProblem },

    /// Operand shapes are incompatible for the requested operation.
    #[error("shape mismatch in `{op}`: expected {expected}, found {found}")]
    ShapeMismatch {
        op: &'static str,
        expected: Shape,
        found: Shape,
    },

    /// Backing storage for a matrix of the given shape could not be obtained.
    #[error("failed to allocate storage for a {shape} matrix")]
    AllocationFailure { shape: Shape },

    /// An accessor was called outside the bounds of the matrix.
    #[error("index ({row}, {col}) is out of range for a {shape} matrix")]
    IndexOutOfRange { row: usize, col: usize, shape: Shape },

    /// Matrix powers are only defined for non-negative exponents.
    #[error("exponent {0} is negative")]
    InvalidExponent(i64),

    /// The bounds given to a randomized fill do not form a non-empty finite range.
    #[error("cannot draw uniform values from [{low}, {high})")]
    InvalidRange { low: f64, high: f64 },

    /// Constructor input does not describe a matrix of the requested shape.
    #[error("invalid matrix data: {reason}")]
    InvalidData { reason: DataProblem },
}

/// The reason an [`MatrixError::InvalidShape`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeProblem {
    #[error("both dimensions must be non-zero")]
    ZeroDimension,

    #[error(
        "a view at offset ({row_offset}, {col_offset}) does not fit inside its {parent} parent"
    )]
    ViewOutOfBounds {
        row_offset: usize,
        col_offset: usize,
        parent: Shape,
    },
}

/// The reason an [`MatrixError::InvalidData`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataProblem {
    #[error("expected {expected} values, got {got}")]
    Length { expected: usize, got: usize },

    #[error("cannot build a matrix from an empty list of rows")]
    Empty,

    #[error("row {row} has {got} values but row 0 has {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },
}

impl MatrixError {
    pub(crate) fn zero_dimension(shape: Shape) -> Self {
        Self::InvalidShape {
            shape,
            problem: ShapeProblem::ZeroDimension,
        }
    }

    pub(crate) fn mismatch(op: &'static str, expected: Shape, found: Shape) -> Self {
        Self::ShapeMismatch {
            op,
            expected,
            found,
        }
    }

    /// Return `true` if this error is an [`MatrixError::InvalidShape`].
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, Self::InvalidShape { .. })
    }

    /// Return `true` if this error is an [`MatrixError::ShapeMismatch`].
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}
