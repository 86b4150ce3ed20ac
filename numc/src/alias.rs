/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Operand staging for kernels whose result may share storage with an operand.

use std::ops::Deref;

use tracing::trace;

use crate::{Matrix, MatrixError};

/// An operand as seen by a kernel: either the caller's matrix or a private copy of it.
pub(crate) enum Staged<'a> {
    Direct(&'a Matrix),
    Snapshot(Matrix),
}

impl<'a> Staged<'a> {
    /// Stage `operand` for a kernel that reads cell `(i, j)` only to write `(i, j)`.
    ///
    /// Writing the identical region in place is safe. Any other overlap would let an
    /// earlier write clobber a cell that has not been read yet, so the operand is copied.
    pub(crate) fn elementwise(
        op: &'static str,
        result: &Matrix,
        operand: &'a Matrix,
    ) -> Result<Self, MatrixError> {
        if result.overlaps(operand) && !result.same_region(operand) {
            Self::snapshot(op, operand)
        } else {
            Ok(Self::Direct(operand))
        }
    }

    /// Stage `operand` for a kernel where every output cell reads many operand cells.
    ///
    /// Any overlap with `result` requires a copy.
    pub(crate) fn product(
        op: &'static str,
        result: &Matrix,
        operand: &'a Matrix,
    ) -> Result<Self, MatrixError> {
        if result.overlaps(operand) {
            Self::snapshot(op, operand)
        } else {
            Ok(Self::Direct(operand))
        }
    }

    fn snapshot(op: &'static str, operand: &Matrix) -> Result<Self, MatrixError> {
        trace!(op, shape = %operand.shape(), "operand aliases result, taking a snapshot");
        operand.snapshot().map(Self::Snapshot)
    }

    #[cfg(test)]
    pub(crate) fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot(_))
    }
}

impl Deref for Staged<'_> {
    type Target = Matrix;

    fn deref(&self) -> &Matrix {
        match self {
            Self::Direct(m) => m,
            Self::Snapshot(m) => m,
        }
    }
}
