use nalgebra::{DMatrix, DVector};

use crate::error::{AlgebraError, Result};
use crate::utils::FloatOps;
use crate::{Matrix, Vector};

impl<T: FloatOps> From<&Matrix<T>> for DMatrix<T> {
    fn from(m: &Matrix<T>) -> Self {
        DMatrix::from_fn(m.rows(), m.cols(), |r, c| m[(r, c)])
    }
}

impl<T: FloatOps> TryFrom<&DMatrix<T>> for Matrix<T> {
    type Error = AlgebraError;

    fn try_from(m: &DMatrix<T>) -> Result<Self> {
        // nalgebra stores columns contiguously; the transpose's column-major
        // order is our row-major order
        let data = m.transpose().iter().copied().collect();
        Matrix::from_vec(m.nrows(), m.ncols(), data)
    }
}

impl<T: FloatOps> From<&Vector<T>> for DVector<T> {
    fn from(v: &Vector<T>) -> Self {
        DVector::from_column_slice(v.as_slice())
    }
}

impl<T: FloatOps> TryFrom<&DVector<T>> for Vector<T> {
    type Error = AlgebraError;

    fn try_from(v: &DVector<T>) -> Result<Self> {
        Vector::from_vec(v.iter().copied().collect())
    }
}
