/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use crate::{error::DataProblem, kernels, Matrix, MatrixError};

impl Matrix {
    /// Return the value at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if `row >= self.rows()` or
    /// `col >= self.cols()`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.check_index(row, col)?;
        Ok(self.cell(row, col).get())
    }

    /// Write `value` to `(row, col)`.
    ///
    /// The write is visible through every handle that shares this cell.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if `row >= self.rows()` or
    /// `col >= self.cols()`.
    pub fn set(&self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        self.check_index(row, col)?;
        self.cell(row, col).set(value);
        Ok(())
    }

    /// Return a copy of row `row`.
    pub fn row(&self, row: usize) -> Result<Vec<f64>, MatrixError> {
        self.check_index(row, 0)?;
        Ok(self.row_cells(row).iter().map(|c| c.get()).collect())
    }

    /// Return a copy of all cells in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.shape().flat_len());
        for row in 0..self.rows() {
            values.extend(self.row_cells(row).iter().map(|c| c.get()));
        }
        values
    }

    /// Return a copy of the matrix as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .map(|row| self.row_cells(row).iter().map(|c| c.get()).collect())
            .collect()
    }

    /// Allocate a root matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, MatrixError> {
        let m = Self::allocate(rows, cols)?;
        kernels::fill(&m, value);
        Ok(m)
    }

    /// Allocate a root matrix from `data` laid out in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidData`] if `data.len() != rows * cols`, in addition to
    /// the errors of [`Matrix::allocate`].
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        let m = Self::allocate(rows, cols)?;
        let expected = m.shape().flat_len();
        if data.len() != expected {
            return Err(MatrixError::InvalidData {
                reason: DataProblem::Length {
                    expected,
                    got: data.len(),
                },
            });
        }

        for (row, chunk) in data.chunks_exact(cols).enumerate() {
            m.row_cells(row)
                .iter()
                .zip(chunk)
                .for_each(|(dst, src)| dst.set(*src));
        }
        Ok(m)
    }

    /// Allocate a root matrix from a list of equally long rows.
    ///
    /// ```
    /// use numc::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0).unwrap(), 3.0);
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[f64]>,
    {
        let first = rows.first().ok_or(MatrixError::InvalidData {
            reason: DataProblem::Empty,
        })?;
        let cols = first.as_ref().len();
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != cols)
        {
            return Err(MatrixError::InvalidData {
                reason: DataProblem::Ragged {
                    row,
                    expected: cols,
                    got: r.as_ref().len(),
                },
            });
        }

        let m = Self::allocate(rows.len(), cols)?;
        for (i, r) in rows.iter().enumerate() {
            m.row_cells(i)
                .iter()
                .zip(r.as_ref())
                .for_each(|(dst, src)| dst.set(*src));
        }
        Ok(m)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if self.shape().contains(row, col) {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfRange {
                row,
                col,
                shape: self.shape(),
            })
        }
    }
}

/// Matrices compare equal when they have the same shape and the same cell values,
/// regardless of whether they are roots or views.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && (0..self.rows()).all(|row| {
                self.row_cells(row)
                    .iter()
                    .zip(other.row_cells(row))
                    .all(|(a, b)| a.get() == b.get())
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Shape;

    #[test]
    fn get_and_set() {
        let m = Matrix::allocate(2, 3).unwrap();
        m.set(1, 2, 4.5).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), 4.5);
        assert_eq!(m.get(0, 0).unwrap(), 0.0);
    }

    #[rstest]
    #[case(2, 0)]
    #[case(0, 3)]
    #[case(5, 5)]
    fn accessors_reject_out_of_range(#[case] row: usize, #[case] col: usize) {
        let m = Matrix::allocate(2, 3).unwrap();
        let expected = MatrixError::IndexOutOfRange {
            row,
            col,
            shape: Shape::new(2, 3),
        };
        assert_eq!(m.get(row, col).unwrap_err(), expected);
        assert_eq!(m.set(row, col, 1.0).unwrap_err(), expected);
    }

    #[test]
    fn view_accessors_are_relative_to_the_view() {
        let m = Matrix::allocate(4, 4).unwrap();
        let v = m.allocate_view(1, 2, 2, 2).unwrap();
        v.set(1, 1, 3.0).unwrap();
        assert_eq!(m.get(2, 3).unwrap(), 3.0);

        // In range for the root but not for the view.
        assert!(matches!(
            v.get(2, 0),
            Err(MatrixError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn conversions() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            m.to_rows(),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
        );
        assert_eq!(m.row(1).unwrap(), vec![4.0, 5.0, 6.0]);
        assert!(m.row(2).is_err());

        let v = m.allocate_view(0, 1, 2, 2).unwrap();
        assert_eq!(v.to_vec(), vec![2.0, 3.0, 5.0, 6.0]);

        let r = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(r, m);
    }

    #[test]
    fn filled() {
        let m = Matrix::filled(3, 2, -1.5).unwrap();
        assert!(m.to_vec().iter().all(|&x| x == -1.5));
    }

    #[test]
    fn constructors_reject_bad_data() {
        let err = Matrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidData {
                reason: DataProblem::Length {
                    expected: 4,
                    got: 3
                }
            }
        );

        let empty: &[Vec<f64>] = &[];
        assert_eq!(
            Matrix::from_rows(empty).unwrap_err(),
            MatrixError::InvalidData {
                reason: DataProblem::Empty
            }
        );

        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidData {
                reason: DataProblem::Ragged {
                    row: 1,
                    expected: 2,
                    got: 1
                }
            }
        );

        // A single empty row has a zero dimension.
        let err = Matrix::from_rows(&[Vec::<f64>::new()]).unwrap_err();
        assert!(err.is_invalid_shape());
    }

    #[test]
    fn equality_ignores_ownership() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let big = Matrix::allocate(3, 3).unwrap();
        let v = big.allocate_view(1, 1, 2, 2).unwrap();
        assert_ne!(v, m);

        v.set(0, 0, 1.0).unwrap();
        v.set(0, 1, 2.0).unwrap();
        v.set(1, 0, 3.0).unwrap();
        v.set(1, 1, 4.0).unwrap();
        assert_eq!(v, m);

        let wrong_shape = Matrix::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap();
        assert_ne!(wrong_shape, m);
    }
}
