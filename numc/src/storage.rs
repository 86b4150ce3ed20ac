/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Root matrices, views and the shared backing buffer.
//!
//! ```text
//!              root (4 x 5)
//!            +----------------+
//!   row 0 -> | a0 a1 a2 a3 a4 |
//!   row 1 -> | b0 b1 b2 b3 b4 |   view = root.allocate_view(1, 1, 2, 3)
//!   row 2 -> | c0 c1 c2 c3 c4 |
//!   row 3 -> | d0 d1 d2 d3 d4 |   view row 0 -> b1 b2 b3
//!            +----------------+   view row 1 -> c1 c2 c3
//! ```
//!
//! Every handle holds a strong reference to the backing buffer. The number of live handles is
//! the reference count of the buffer and the buffer is freed when the last one goes away.

use std::{
    cell::Cell,
    fmt,
    rc::{Rc, Weak},
};

use tracing::{debug, trace};

use crate::{error::ShapeProblem, MatrixError, Shape};

/// Contiguous cell storage shared by a root matrix and all of its views.
pub(crate) struct Buffer {
    cells: Box<[Cell<f64>]>,
}

impl Buffer {
    /// Allocate a zero-initialized buffer for a matrix of `shape`.
    fn zeroed(shape: Shape) -> Result<Self, MatrixError> {
        let len = shape
            .checked_len()
            .ok_or(MatrixError::AllocationFailure { shape })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| MatrixError::AllocationFailure { shape })?;
        cells.resize_with(len, || Cell::new(0.0));

        Ok(Self {
            cells: cells.into_boxed_slice(),
        })
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        debug!(cells = self.len(), "freeing backing buffer");
    }
}

/// Build a row table of `rows` absolute buffer offsets.
fn row_table<F>(shape: Shape, start_of: F) -> Result<Box<[usize]>, MatrixError>
where
    F: Fn(usize) -> usize,
{
    let mut starts = Vec::new();
    starts
        .try_reserve_exact(shape.rows)
        .map_err(|_| MatrixError::AllocationFailure { shape })?;
    starts.extend((0..shape.rows).map(start_of));
    Ok(starts.into_boxed_slice())
}

/// A handle to a dense row-major matrix of `f64`.
///
/// A handle is either a *root*, which allocated its own buffer, or a *view*, which aliases
/// a rectangular region of a root's buffer. Writes through any handle are visible through
/// every other handle covering the same cells.
///
/// Handles are released by calling [`Matrix::release`] or by dropping them. Handles are
/// deliberately not `Clone`, `Send` or `Sync`: each one is obtained from a construction
/// operation and the engine assumes single-threaded access to a buffer.
pub struct Matrix {
    buffer: Rc<Buffer>,
    // Offset of the first cell of each row in `buffer`. Always has `shape.rows` entries.
    row_starts: Box<[usize]>,
    shape: Shape,
    // Position of cell (0, 0) in the coordinates of the root.
    origin: (usize, usize),
    is_view: bool,
}

impl Matrix {
    /// Allocate a zero-filled root matrix with `rows` rows and `cols` columns.
    ///
    /// # Errors
    ///
    /// * [`MatrixError::InvalidShape`] if either dimension is zero.
    /// * [`MatrixError::AllocationFailure`] if the backing storage cannot be obtained.
    pub fn allocate(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let shape = Shape::new(rows, cols);
        if !shape.is_valid() {
            return Err(MatrixError::zero_dimension(shape));
        }

        let buffer = Buffer::zeroed(shape).inspect_err(|err| {
            debug!(%shape, %err, "root allocation failed");
        })?;
        let row_starts = row_table(shape, |row| row * cols)?;

        trace!(%shape, "allocated root matrix");
        Ok(Self {
            buffer: Rc::new(buffer),
            row_starts,
            shape,
            origin: (0, 0),
            is_view: false,
        })
    }

    /// Create a view of `rows x cols` cells starting at `(row_offset, col_offset)`.
    ///
    /// This is equivalent to `self[row_offset..row_offset + rows, col_offset..col_offset + cols]`
    /// and does not copy any cells. The view keeps the backing buffer alive until it is
    /// released. Views of views resolve directly to the root buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] if either dimension is zero or if the view
    /// would extend past the bounds of `self`. The reference count is unchanged on error.
    pub fn allocate_view(
        &self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Self, MatrixError> {
        let shape = Shape::new(rows, cols);
        if !shape.is_valid() {
            return Err(MatrixError::zero_dimension(shape));
        }

        let fits = |offset: usize, len: usize, bound: usize| {
            offset.checked_add(len).is_some_and(|end| end <= bound)
        };
        if !fits(row_offset, rows, self.rows()) || !fits(col_offset, cols, self.cols()) {
            return Err(MatrixError::InvalidShape {
                shape,
                problem: ShapeProblem::ViewOutOfBounds {
                    row_offset,
                    col_offset,
                    parent: self.shape,
                },
            });
        }

        let row_starts = row_table(shape, |row| self.row_starts[row_offset + row] + col_offset)?;
        let view = Self {
            buffer: Rc::clone(&self.buffer),
            row_starts,
            shape,
            origin: (self.origin.0 + row_offset, self.origin.1 + col_offset),
            is_view: true,
        };

        trace!(
            %shape,
            row_offset,
            col_offset,
            ref_count = view.ref_count(),
            "allocated view"
        );
        Ok(view)
    }

    /// Release this handle.
    ///
    /// The backing buffer is freed if this was the last live handle referring to it.
    /// Dropping a handle has the same effect.
    pub fn release(self) {
        trace!(
            shape = %self.shape,
            is_view = self.is_view,
            remaining = self.ref_count() - 1,
            "releasing matrix"
        );
    }

    /// Allocate a new root matrix holding a copy of the cells of `self`.
    pub fn snapshot(&self) -> Result<Self, MatrixError> {
        let copy = Self::allocate(self.rows(), self.cols())?;
        for row in 0..self.rows() {
            copy.row_cells(row)
                .iter()
                .zip(self.row_cells(row))
                .for_each(|(dst, src)| dst.set(src.get()));
        }
        Ok(copy)
    }

    /// Return the number of rows.
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Return the number of columns.
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Return `true` if the matrix has a single row or a single column.
    pub fn is_1d(&self) -> bool {
        self.shape.is_1d()
    }

    /// Return `true` if this handle is a view into another matrix's buffer.
    pub fn is_view(&self) -> bool {
        self.is_view
    }

    /// Return the number of live handles (the root and all of its views) keeping the
    /// backing buffer alive.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.buffer)
    }

    /// Return `true` if `self` and `other` are backed by the same buffer.
    pub fn shares_buffer(&self, other: &Matrix) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Return an observer of the backing buffer that does not keep it alive.
    pub fn buffer_probe(&self) -> BufferProbe {
        BufferProbe(Rc::downgrade(&self.buffer))
    }

    /// Return `true` if some cell is addressed by both `self` and `other`.
    pub(crate) fn overlaps(&self, other: &Matrix) -> bool {
        let intersects =
            |a: usize, alen: usize, b: usize, blen: usize| a < b + blen && b < a + alen;
        self.shares_buffer(other)
            && intersects(self.origin.0, self.rows(), other.origin.0, other.rows())
            && intersects(self.origin.1, self.cols(), other.origin.1, other.cols())
    }

    /// Return `true` if `self` and `other` address exactly the same cells.
    pub(crate) fn same_region(&self, other: &Matrix) -> bool {
        self.shares_buffer(other) && self.origin == other.origin && self.shape == other.shape
    }

    /// Return the cells of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub(crate) fn row_cells(&self, row: usize) -> &[Cell<f64>] {
        let start = self.row_starts[row];
        &self.buffer.cells[start..start + self.cols()]
    }

    /// Return the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of bounds.
    pub(crate) fn cell(&self, row: usize, col: usize) -> &Cell<f64> {
        debug_assert!(self.shape.contains(row, col));
        &self.row_cells(row)[col]
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape)
            .field("origin", &self.origin)
            .field("is_view", &self.is_view)
            .field("ref_count", &self.ref_count())
            .field("data", &self.to_rows())
            .finish()
    }
}

/// A weak observer of a backing buffer.
///
/// The probe does not contribute to the reference count.
#[derive(Debug, Clone)]
pub struct BufferProbe(Weak<Buffer>);

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.len()).finish()
    }
}

impl BufferProbe {
    /// Return `true` if the buffer has not been freed.
    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Return the number of live handles referring to the buffer. Zero once it is freed.
    pub fn ref_count(&self) -> usize {
        self.0.strong_count()
    }
}

///////////
// Tests //
///////////
