use std::fmt;

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::error::{AlgebraError, Result};
use crate::utils::{write_value, Direction, FloatOps};
use crate::vector::Vector;

mod arithmetic;
mod elimination;
mod rows;

/// Dense `rows x cols` matrix of floats.
///
/// Values live in a single row-major buffer. Rows are addressed through a
/// logical-to-storage index table, so [`Matrix::swap_rows`] exchanges two
/// table entries instead of moving values. All public indices are
/// zero-based.
#[derive(Clone)]
pub struct Matrix<T: FloatOps> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
    row_order: Vec<usize>,
}

impl<T: FloatOps> Matrix<T> {
    fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix {
            rows,
            cols,
            data,
            row_order: (0..rows).collect(),
        }
    }

    fn check_shape(rows: usize, cols: usize) -> Result<()> {
        if rows == 0 {
            return Err(AlgebraError::EmptyDimension("matrix row count"));
        }
        if cols == 0 {
            return Err(AlgebraError::EmptyDimension("matrix column count"));
        }
        Ok(())
    }

    /// Allocates a `rows x cols` matrix. The contents are zeroed but callers
    /// should treat them as unspecified and overwrite every entry.
    pub fn allocate(rows: usize, cols: usize) -> Result<Self> {
        Self::zeros(rows, cols)
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::check_shape(rows, cols)?;
        Ok(Self::from_parts(rows, cols, vec![T::zero(); rows * cols]))
    }

    /// Square matrix with ones on the diagonal.
    pub fn identity(dimension: usize) -> Result<Self> {
        let mut ret = Self::zeros(dimension, dimension)?;
        for i in 0..dimension {
            ret.data[i * dimension + i] = T::one();
        }
        Ok(ret)
    }

    /// Fills the matrix in row-major order from `values`. Missing trailing
    /// values are zero; supplying more than `rows * cols` values is an error.
    pub fn from_values(rows: usize, cols: usize, values: &[T]) -> Result<Self> {
        Self::check_shape(rows, cols)?;
        if values.len() > rows * cols {
            return Err(AlgebraError::mismatch(
                "matrix construction",
                format!("at most {} values", rows * cols),
                values.len(),
            ));
        }
        let mut data = values.to_vec();
        data.resize(rows * cols, T::zero());
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Takes ownership of a row-major buffer of exactly `rows * cols` values.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        Self::check_shape(rows, cols)?;
        if data.len() != rows * cols {
            return Err(AlgebraError::mismatch(
                "matrix construction",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Builds a matrix from a compile-time checked array of rows.
    pub fn from_array<const R: usize, const C: usize>(values: [[T; C]; R]) -> Self {
        const { assert!(R > 0 && C > 0, "matrix shape must be at least 1x1") };
        let data = values.iter().flat_map(|row| row.iter().copied()).collect();
        Self::from_parts(R, C, data)
    }

    /// Stacks the given vectors as rows. All rows must share one dimension.
    pub fn from_rows(rows: &[Vector<T>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or(AlgebraError::EmptyDimension("matrix row count"))?;
        let cols = first.dimension();
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.dimension() != cols {
                return Err(AlgebraError::mismatch(
                    "matrix from rows",
                    cols,
                    row.dimension(),
                ));
            }
            data.extend_from_slice(row.as_slice());
        }
        Ok(Self::from_parts(rows.len(), cols, data))
    }

    /// `1 x n` matrix holding `v`
    pub fn row_matrix(v: &Vector<T>) -> Self {
        Self::from_parts(1, v.dimension(), v.as_slice().to_vec())
    }

    /// `n x 1` matrix holding `v`
    pub fn column_matrix(v: &Vector<T>) -> Self {
        Self::from_parts(v.dimension(), 1, v.as_slice().to_vec())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub(crate) fn shape_string(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        self.row_order[row] * self.cols + col
    }

    #[inline]
    fn row_start(&self, row: usize) -> usize {
        self.row_order[row] * self.cols
    }

    pub(crate) fn row_slice(&self, row: usize) -> &[T] {
        let start = self.row_start(row);
        &self.data[start..start + self.cols]
    }

    pub(crate) fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.row_start(row);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(AlgebraError::row_index(row, self.rows));
        }
        Ok(())
    }

    pub(crate) fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(AlgebraError::col_index(col, self.cols));
        }
        Ok(())
    }

    pub(crate) fn check_same_shape(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(AlgebraError::mismatch(
                op,
                self.shape_string(),
                other.shape_string(),
            ));
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_row(row)?;
        self.check_col(col)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    /// Iterates over the rows in logical order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row_slice(r))
    }

    /// Row-major copy of the values in logical row order.
    pub fn to_row_major_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for row in self.iter_rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Copies a full row or column out into a new vector.
    pub fn lane(&self, direction: Direction, index: usize) -> Result<Vector<T>> {
        match direction {
            Direction::ROW => {
                self.check_row(index)?;
                Vector::from_values(self.row_slice(index))
            }
            Direction::COLUMN => {
                self.check_col(index)?;
                Vector::from_vec(
                    (0..self.rows)
                        .map(|r| self.data[self.offset(r, index)])
                        .collect(),
                )
            }
        }
    }

    /// Overwrites a full row or column with the values of `v`.
    pub fn set_lane(&mut self, direction: Direction, index: usize, v: &Vector<T>) -> Result<()> {
        let (extent, check) = match direction {
            Direction::ROW => (self.cols, self.check_row(index)),
            Direction::COLUMN => (self.rows, self.check_col(index)),
        };
        check?;
        if v.dimension() != extent {
            return Err(AlgebraError::mismatch(
                match direction {
                    Direction::ROW => "set row",
                    Direction::COLUMN => "set column",
                },
                extent,
                v.dimension(),
            ));
        }
        match direction {
            Direction::ROW => self.row_slice_mut(index).copy_from_slice(v.as_slice()),
            Direction::COLUMN => {
                for (r, &value) in v.iter().enumerate() {
                    let offset = self.offset(r, index);
                    self.data[offset] = value;
                }
            }
        }
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vector<T>> {
        self.lane(Direction::ROW, row)
    }

    pub fn col(&self, col: usize) -> Result<Vector<T>> {
        self.lane(Direction::COLUMN, col)
    }

    pub fn set_row(&mut self, row: usize, v: &Vector<T>) -> Result<()> {
        self.set_lane(Direction::ROW, row, v)
    }

    pub fn set_col(&mut self, col: usize, v: &Vector<T>) -> Result<()> {
        self.set_lane(Direction::COLUMN, col, v)
    }

    /// Exact elementwise equality. Operands of different shape are rejected.
    pub fn compare(&self, other: &Self) -> Result<bool> {
        self.check_same_shape(other, "matrix comparison")?;
        Ok(self.iter_rows().zip(other.iter_rows()).all(|(a, b)| a == b))
    }

    /// Elementwise equality within an absolute `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: T) -> Result<bool> {
        self.check_same_shape(other, "matrix comparison")?;
        Ok(self.abs_diff_eq(other, epsilon))
    }
}

impl<T: FloatOps> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self.iter_rows().zip(other.iter_rows()).all(|(a, b)| a == b)
    }
}

impl<T: FloatOps> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "matrix index ({row}, {col}) out of range for {}", self.shape_string());
        &self.data[self.offset(row, col)]
    }
}

impl<T: FloatOps> std::ops::IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.rows && col < self.cols, "matrix index ({row}, {col}) out of range for {}", self.shape_string());
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}

impl<T: FloatOps> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("values", &self.iter_rows().collect::<Vec<_>>())
            .finish()
    }
}

/// Renders one line per row, `| v00 v01 ... |`.
impl<T: FloatOps> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.iter_rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for value in row {
                write!(f, " ")?;
                write_value(f, value)?;
            }
            write!(f, " |")?;
        }
        Ok(())
    }
}

impl<T: FloatOps> AbsDiffEq for Matrix<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.shape() == other.shape()
            && self
                .iter_rows()
                .flatten()
                .zip(other.iter_rows().flatten())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: FloatOps> RelativeEq for Matrix<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.shape() == other.shape()
            && self
                .iter_rows()
                .flatten()
                .zip(other.iter_rows().flatten())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T: FloatOps> UlpsEq for Matrix<T> {
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
        self.shape() == other.shape()
            && self
                .iter_rows()
                .flatten()
                .zip(other.iter_rows().flatten())
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction() {
        let m = Matrix::<f64>::identity(3).unwrap();
        assert_eq!(m.shape(), (3, 3));
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(m[(r, c)], if r == c { 1.0 } else { 0.0 });
            }
        }

        let z = Matrix::<f32>::zeros(2, 4).unwrap();
        assert!(z.iter_rows().flatten().all(|&v| v == 0.0));
        assert!(!z.is_square());

        assert!(Matrix::<f64>::zeros(0, 3).is_err());
        assert!(Matrix::<f64>::allocate(3, 0).is_err());
        assert!(Matrix::<f64>::identity(0).is_err());
    }

    #[test]
    fn test_from_values_zero_fills_remainder() {
        let m = Matrix::from_values(2, 3, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.to_row_major_vec(), vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0]);

        let too_many = Matrix::from_values(1, 2, &[1.0, 2.0, 3.0]);
        assert!(matches!(
            too_many,
            Err(AlgebraError::DimensionMismatch { .. })
        ));

        assert!(Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).is_err());
        let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m, Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]));
    }

    #[test]
    fn test_from_rows_and_vector_matrices() {
        let rows = [
            Vector::from_array([1.0, 2.0]),
            Vector::from_array([3.0, 4.0]),
            Vector::from_array([5.0, 6.0]),
        ];
        let m = Matrix::from_rows(&rows).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row(2).unwrap(), rows[2]);

        let ragged = [Vector::from_array([1.0, 2.0]), Vector::from_array([3.0])];
        assert!(Matrix::from_rows(&ragged).is_err());
        assert!(Matrix::<f64>::from_rows(&[]).is_err());

        let v = Vector::from_array([1.0, 2.0, 3.0]);
        assert_eq!(Matrix::row_matrix(&v).shape(), (1, 3));
        let column = Matrix::column_matrix(&v);
        assert_eq!(column.shape(), (3, 1));
        assert_eq!(column.col(0).unwrap(), v);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let mut copy = original.clone();
        copy.set(0, 0, 10.0).unwrap();
        assert_eq!(original[(0, 0)], 1.0);
        assert_eq!(copy[(0, 0)], 10.0);
    }

    #[test]
    fn test_row_and_column_access() {
        let mut m = Matrix::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.row(1).unwrap().as_slice(), &[4.0, 5.0, 6.0]);
        assert_eq!(m.col(2).unwrap().as_slice(), &[3.0, 6.0]);
        assert_eq!(
            m.lane(Direction::COLUMN, 0).unwrap().as_slice(),
            &[1.0, 4.0]
        );

        assert!(matches!(
            m.row(2),
            Err(AlgebraError::IndexOutOfRange { index: 2, extent: 2, .. })
        ));
        assert!(m.col(3).is_err());

        m.set_row(0, &Vector::from_array([7.0, 8.0, 9.0])).unwrap();
        m.set_col(1, &Vector::from_array([0.0, -1.0])).unwrap();
        assert_eq!(m, Matrix::from_array([[7.0, 0.0, 9.0], [4.0, -1.0, 6.0]]));

        // row length must equal the column count, column length the row count
        assert!(m.set_row(0, &Vector::from_array([1.0, 2.0])).is_err());
        assert!(m.set_col(0, &Vector::from_array([1.0, 2.0, 3.0])).is_err());
        assert!(m.set_row(5, &Vector::from_array([1.0, 2.0, 3.0])).is_err());
    }

    #[test]
    fn test_checked_element_access() {
        let mut m = Matrix::<f64>::zeros(2, 2).unwrap();
        m.set(1, 0, 3.0).unwrap();
        assert_eq!(m.get(1, 0).unwrap(), 3.0);
        assert!(m.get(2, 0).is_err());
        assert!(m.set(0, 2, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let m = Matrix::<f64>::identity(2).unwrap();
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_compare() {
        let a = Matrix::from_array([[0.1 + 0.2, 1.0], [2.0, 3.0]]);
        let b = Matrix::from_array([[0.3, 1.0], [2.0, 3.0]]);

        assert!(a.compare(&a.clone()).unwrap());
        assert!(!a.compare(&b).unwrap());
        assert!(a.approx_eq(&b, 1e-12).unwrap());
        assert_relative_eq!(a, b);

        let wide = Matrix::<f64>::zeros(2, 3).unwrap();
        assert!(a.compare(&wide).is_err());
        assert_ne!(a, wide);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_array([[1.0f32, 0.0], [0.5, -2.0]]);
        assert_eq!(m.to_string(), "| 1 0 |\n| 0.5 -2 |");
        assert_eq!(format!("{:.1}", m), "| 1.0 0.0 |\n| 0.5 -2.0 |");
    }
}
