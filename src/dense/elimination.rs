//! Gaussian and Gauss-Jordan elimination.
//!
//! Both procedures walk the columns left to right with a pivot-row cursor,
//! pick the first row at or below the cursor with a non-zero entry in the
//! current column, swap it into place and scale it so the pivot is exactly 1.
//! A column without a candidate is skipped without advancing the cursor.
//! Zero tests are exact.

use log::{debug, trace};

use super::Matrix;
use crate::utils::FloatOps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Elimination {
    /// Clear the pivot column below the pivot only
    BelowPivot,
    /// Clear the pivot column in every other row
    AllRows,
}

impl<T: FloatOps> Matrix<T> {
    /// Reduces the matrix in place to row echelon form.
    pub fn row_echelon_form(&mut self) {
        self.eliminate(Elimination::BelowPivot);
    }

    /// Reduces the matrix in place to reduced row echelon form. Running it on
    /// its own output leaves the matrix unchanged.
    pub fn reduced_row_echelon_form(&mut self) {
        self.eliminate(Elimination::AllRows);
    }

    /// Number of pivots found when reducing a copy of the matrix.
    pub fn rank(&self) -> usize {
        self.clone().eliminate(Elimination::AllRows)
    }

    fn find_pivot(&self, col: usize, from_row: usize) -> Option<usize> {
        (from_row..self.rows).find(|&r| !self.data[self.offset(r, col)].is_zero())
    }

    /// Returns the number of pivot rows.
    fn eliminate(&mut self, mode: Elimination) -> usize {
        let mut pivot_row = 0;
        for col in 0..self.cols {
            if pivot_row >= self.rows {
                break;
            }

            let Some(found) = self.find_pivot(col, pivot_row) else {
                debug!("no pivot in column {col} at or below row {pivot_row}, skipping");
                continue;
            };

            if found != pivot_row {
                trace!("swapping rows {pivot_row} and {found} for column {col}");
                self.row_order.swap(pivot_row, found);
            }

            let factor = T::one() / self.data[self.offset(pivot_row, col)];
            let start = self.row_start(pivot_row);
            for c in col..self.cols {
                self.data[start + c] *= factor;
            }
            // the product above may round; the leading entry is 1 by definition
            self.data[start + col] = T::one();

            let rows = match mode {
                Elimination::BelowPivot => pivot_row + 1..self.rows,
                Elimination::AllRows => 0..self.rows,
            };
            for r in rows {
                if r == pivot_row {
                    continue;
                }
                let entry = self.data[self.offset(r, col)];
                if entry.is_zero() {
                    continue;
                }
                self.axpy_row(r, pivot_row, -entry);
            }

            pivot_row += 1;
        }
        debug!(
            "elimination ({:?}) of {} matrix finished with {} pivots",
            mode,
            self.shape_string(),
            pivot_row
        );
        pivot_row
    }
}
