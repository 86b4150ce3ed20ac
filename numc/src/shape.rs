/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// The dimensions of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Return `true` if the matrix has a single row or a single column.
    ///
    /// This is a presentation hint only. Addressing is always two-dimensional.
    pub const fn is_1d(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Return `true` if both dimensions are non-zero.
    pub const fn is_valid(&self) -> bool {
        self.rows != 0 && self.cols != 0
    }

    /// Return the number of cells, or `None` if `rows * cols` overflows.
    pub const fn checked_len(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Return the number of cells.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`. Shapes of allocated matrices never do.
    pub fn flat_len(&self) -> usize {
        self.rows * self.cols
    }

    /// Return `true` if `(row, col)` addresses a cell of a matrix with this shape.
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Return `true` if the shape is square.
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
