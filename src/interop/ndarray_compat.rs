use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{AlgebraError, Result};
use crate::utils::FloatOps;
use crate::{Matrix, Vector};

impl<T: FloatOps> From<&Matrix<T>> for Array2<T> {
    fn from(m: &Matrix<T>) -> Self {
        Array2::from_shape_fn(m.shape(), |(r, c)| m[(r, c)])
    }
}

impl<T: FloatOps> TryFrom<ArrayView2<'_, T>> for Matrix<T> {
    type Error = AlgebraError;

    fn try_from(view: ArrayView2<'_, T>) -> Result<Self> {
        let (rows, cols) = view.dim();
        Matrix::from_vec(rows, cols, view.iter().copied().collect())
    }
}

impl<T: FloatOps> TryFrom<&Array2<T>> for Matrix<T> {
    type Error = AlgebraError;

    fn try_from(array: &Array2<T>) -> Result<Self> {
        Matrix::try_from(array.view())
    }
}

impl<T: FloatOps> From<&Vector<T>> for Array1<T> {
    fn from(v: &Vector<T>) -> Self {
        Array1::from(v.as_slice().to_vec())
    }
}

impl<T: FloatOps> TryFrom<ArrayView1<'_, T>> for Vector<T> {
    type Error = AlgebraError;

    fn try_from(view: ArrayView1<'_, T>) -> Result<Self> {
        Vector::from_vec(view.to_vec())
    }
}

impl<T: FloatOps> TryFrom<&Array1<T>> for Vector<T> {
    type Error = AlgebraError;

    fn try_from(array: &Array1<T>) -> Result<Self> {
        Vector::try_from(array.view())
    }
}
