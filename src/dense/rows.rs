use log::trace;

use super::Matrix;
use crate::error::{AlgebraError, Result};
use crate::utils::FloatOps;
use crate::vector::Vector;

impl<T: FloatOps> Matrix<T> {
    /// Exchanges two rows by swapping their storage slots. No values move.
    pub fn swap_rows(&mut self, row_1: usize, row_2: usize) -> Result<()> {
        self.check_row(row_1)?;
        self.check_row(row_2)?;
        self.row_order.swap(row_1, row_2);
        Ok(())
    }

    /// `row_1 += row_2`
    pub fn add_rows(&mut self, row_1: usize, row_2: usize) -> Result<()> {
        self.check_row(row_1)?;
        self.check_row(row_2)?;
        if row_1 == row_2 {
            return Err(AlgebraError::DegenerateOperation(
                "row addition with itself",
            ));
        }
        self.axpy_row(row_1, row_2, T::one());
        Ok(())
    }

    /// `row *= scalar`; the scalar must be non-zero.
    pub fn multiply_row(&mut self, row: usize, scalar: T) -> Result<()> {
        self.check_row(row)?;
        if scalar.is_zero() {
            return Err(AlgebraError::DegenerateOperation(
                "row multiplication by zero",
            ));
        }
        for v in self.row_slice_mut(row) {
            *v *= scalar;
        }
        Ok(())
    }

    /// `row_1 += scalar * row_2`; requires a non-zero scalar and distinct rows.
    pub fn add_scaled_row(&mut self, row_1: usize, row_2: usize, scalar: T) -> Result<()> {
        self.check_row(row_1)?;
        self.check_row(row_2)?;
        if scalar.is_zero() {
            return Err(AlgebraError::DegenerateOperation(
                "scaled row addition with a zero factor",
            ));
        }
        if row_1 == row_2 {
            return Err(AlgebraError::DegenerateOperation(
                "scaled row addition with itself",
            ));
        }
        self.axpy_row(row_1, row_2, scalar);
        Ok(())
    }

    // Callers guarantee both rows are in range and distinct.
    pub(crate) fn axpy_row(&mut self, target: usize, source: usize, scalar: T) {
        let target = self.row_start(target);
        let source = self.row_start(source);
        for c in 0..self.cols {
            let value = self.data[source + c];
            self.data[target + c] += scalar * value;
        }
    }

    /// Appends `v` as a new last column. Requires `v.dimension() == self.rows()`.
    pub fn augment_with_vector(&self, v: &Vector<T>) -> Result<Self> {
        if v.dimension() != self.rows {
            return Err(AlgebraError::mismatch(
                "augment with vector",
                self.rows,
                v.dimension(),
            ));
        }
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for (row, &value) in self.iter_rows().zip(v.iter()) {
            data.extend_from_slice(row);
            data.push(value);
        }
        trace!("augmented {} matrix with a vector", self.shape_string());
        Ok(Matrix::from_parts(self.rows, cols, data))
    }

    /// Places the columns of `other` to the right of this matrix's columns.
    pub fn augment_with_matrix(&self, other: &Self) -> Result<Self> {
        if other.rows != self.rows {
            return Err(AlgebraError::mismatch(
                "augment with matrix",
                format!("{} rows", self.rows),
                other.rows,
            ));
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for (left, right) in self.iter_rows().zip(other.iter_rows()) {
            data.extend_from_slice(left);
            data.extend_from_slice(right);
        }
        trace!(
            "augmented {} matrix with {} matrix",
            self.shape_string(),
            other.shape_string()
        );
        Ok(Matrix::from_parts(self.rows, cols, data))
    }

    /// Copy of the matrix without row `ex_row` and column `ex_col`.
    ///
    /// The result is `(rows - 1) x (cols - 1)`, so both extents must be at
    /// least 2.
    pub fn splice(&self, ex_row: usize, ex_col: usize) -> Result<Self> {
        self.check_row(ex_row)?;
        self.check_col(ex_col)?;
        if self.rows < 2 || self.cols < 2 {
            return Err(AlgebraError::mismatch(
                "splice",
                "at least 2x2",
                self.shape_string(),
            ));
        }
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for (_, row) in self.iter_rows().enumerate().filter(|(r, _)| *r != ex_row) {
            data.extend(
                row.iter()
                    .enumerate()
                    .filter(|(c, _)| *c != ex_col)
                    .map(|(_, &v)| v),
            );
        }
        Ok(Matrix::from_parts(self.rows - 1, self.cols - 1, data))
    }
}
