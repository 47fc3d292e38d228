use std::ops::{Add, Mul, Neg, Sub};

use super::Matrix;
use crate::error::{AlgebraError, Result};
use crate::utils::FloatOps;
use crate::vector::Vector;

impl<T: FloatOps> Matrix<T> {
    fn map(&self, f: impl Fn(T) -> T) -> Self {
        let data = self.iter_rows().flatten().map(|&v| f(v)).collect();
        Matrix::from_parts(self.rows, self.cols, data)
    }

    // Storage order does not matter for elementwise updates.
    fn apply(&mut self, f: impl Fn(T) -> T) {
        for v in self.data.iter_mut() {
            *v = f(*v);
        }
    }

    fn zip_map(&self, other: &Self, op: &'static str, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_same_shape(other, op)?;
        let data = self
            .iter_rows()
            .flatten()
            .zip(other.iter_rows().flatten())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::from_parts(self.rows, self.cols, data))
    }

    fn zip_apply(&mut self, other: &Self, op: &'static str, f: impl Fn(&mut T, T)) -> Result<()> {
        self.check_same_shape(other, op)?;
        for r in 0..self.rows {
            let rhs = other.row_slice(r);
            for (a, &b) in self.row_slice_mut(r).iter_mut().zip(rhs) {
                f(a, b);
            }
        }
        Ok(())
    }

    pub fn add_scalar(&self, scalar: T) -> Self {
        self.map(|v| v + scalar)
    }

    pub fn add_scalar_in_place(&mut self, scalar: T) {
        self.apply(|v| v + scalar)
    }

    pub fn sub_scalar(&self, scalar: T) -> Self {
        self.map(|v| v - scalar)
    }

    pub fn sub_scalar_in_place(&mut self, scalar: T) {
        self.apply(|v| v - scalar)
    }

    pub fn mul_scalar(&self, scalar: T) -> Self {
        self.map(|v| v * scalar)
    }

    pub fn mul_scalar_in_place(&mut self, scalar: T) {
        self.apply(|v| v * scalar)
    }

    pub fn div_scalar(&self, scalar: T) -> Result<Self> {
        if scalar.is_zero() {
            return Err(AlgebraError::DegenerateOperation(
                "division of a matrix by a zero scalar",
            ));
        }
        Ok(self.map(|v| v / scalar))
    }

    pub fn div_scalar_in_place(&mut self, scalar: T) -> Result<()> {
        if scalar.is_zero() {
            return Err(AlgebraError::DegenerateOperation(
                "division of a matrix by a zero scalar",
            ));
        }
        self.apply(|v| v / scalar);
        Ok(())
    }

    pub fn add_matrix(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "matrix addition", |a, b| a + b)
    }

    pub fn add_matrix_in_place(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, "matrix addition", |a, b| *a += b)
    }

    pub fn sub_matrix(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "matrix subtraction", |a, b| a - b)
    }

    pub fn sub_matrix_in_place(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, "matrix subtraction", |a, b| *a -= b)
    }

    /// Matrix product `self · other`.
    ///
    /// Each entry is the dot product of a row of `self` with a column of
    /// `other`; requires `self.cols() == other.rows()`.
    pub fn mul_matrix(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(AlgebraError::mismatch(
                "matrix multiplication",
                format!("{} rows on the right-hand side", self.cols),
                other.rows,
            ));
        }

        let lhs_rows = (0..self.rows)
            .map(|r| self.row(r))
            .collect::<Result<Vec<_>>>()?;
        let rhs_cols = (0..other.cols)
            .map(|c| other.col(c))
            .collect::<Result<Vec<_>>>()?;

        let mut data = Vec::with_capacity(self.rows * other.cols);
        for row in &lhs_rows {
            for col in &rhs_cols {
                data.push(row.dot(col)?);
            }
        }
        Ok(Matrix::from_parts(self.rows, other.cols, data))
    }

    /// Matrix-vector product `self · v`, a vector of length `self.rows()`.
    pub fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>> {
        if self.cols != v.dimension() {
            return Err(AlgebraError::mismatch(
                "matrix-vector multiplication",
                self.cols,
                v.dimension(),
            ));
        }
        let values = self
            .iter_rows()
            .map(|row| {
                row.iter()
                    .zip(v.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect();
        Vector::from_vec(values)
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[self.offset(r, c)]);
            }
        }
        Matrix::from_parts(self.cols, self.rows, data)
    }

    pub fn negated(&self) -> Self {
        self.map(|v| -v)
    }
}

fn unwrap_or_panic<V>(result: Result<V>) -> V {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

impl<T: FloatOps> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        unwrap_or_panic(self.add_matrix(rhs))
    }
}

impl<T: FloatOps> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        unwrap_or_panic(self.sub_matrix(rhs))
    }
}

impl<T: FloatOps> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        unwrap_or_panic(self.mul_matrix(rhs))
    }
}

impl<T: FloatOps> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        unwrap_or_panic(self.mul_vector(rhs))
    }
}

impl<T: FloatOps> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, scalar: T) -> Matrix<T> {
        self.mul_scalar(scalar)
    }
}

impl<T: FloatOps> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_matrix(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> Matrix<f64> {
        let values: Vec<f64> = (0..rows * cols)
            .map(|_| rng.random_range(-5.0..5.0))
            .collect();
        Matrix::from_vec(rows, cols, values).unwrap()
    }

    #[test]
    fn test_scalar_arithmetic() {
        let m = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);

        assert_eq!(m.add_scalar(1.0), Matrix::from_array([[2.0, 3.0], [4.0, 5.0]]));
        assert_eq!(m.sub_scalar(1.0), Matrix::from_array([[0.0, 1.0], [2.0, 3.0]]));
        assert_eq!(m.mul_scalar(2.0), Matrix::from_array([[2.0, 4.0], [6.0, 8.0]]));
        assert_eq!(
            m.div_scalar(2.0).unwrap(),
            Matrix::from_array([[0.5, 1.0], [1.5, 2.0]])
        );

        let mut n = m.clone();
        n.add_scalar_in_place(2.0);
        n.mul_scalar_in_place(2.0);
        n.sub_scalar_in_place(2.0);
        n.div_scalar_in_place(2.0).unwrap();
        assert_eq!(n, Matrix::from_array([[2.0, 3.0], [4.0, 5.0]]));

        assert!(matches!(
            m.div_scalar(0.0),
            Err(AlgebraError::DegenerateOperation(_))
        ));
        assert!(n.div_scalar_in_place(0.0).is_err());
    }

    #[test]
    fn test_matrix_addition_and_subtraction() {
        let a = Matrix::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::from_array([[6.0, 5.0, 4.0], [3.0, 2.0, 1.0]]);

        let sum = a.add_matrix(&b).unwrap();
        assert!(sum.iter_rows().flatten().all(|&v| v == 7.0));
        assert_eq!(sum.sub_matrix(&b).unwrap(), a);

        let mut c = a.clone();
        c.add_matrix_in_place(&b).unwrap();
        c.sub_matrix_in_place(&a).unwrap();
        assert_eq!(c, b);

        let square = Matrix::<f64>::identity(2).unwrap();
        assert!(a.add_matrix(&square).is_err());
        assert!(c.sub_matrix_in_place(&square).is_err());
    }

    #[test]
    fn test_multiply_by_identity() {
        let m = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let identity = Matrix::identity(2).unwrap();
        assert_eq!(m.mul_matrix(&identity).unwrap(), m);
        assert_eq!(identity.mul_matrix(&m).unwrap(), m);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let a = random_matrix(&mut rng, 3, 5);
        assert_relative_eq!(
            a.mul_matrix(&Matrix::identity(5).unwrap()).unwrap(),
            a
        );
        assert_relative_eq!(
            Matrix::identity(3).unwrap().mul_matrix(&a).unwrap(),
            a
        );
    }

    #[test]
    fn test_multiplication() {
        let a = Matrix::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::from_array([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
        let product = a.mul_matrix(&b).unwrap();
        assert_eq!(product, Matrix::from_array([[58.0, 64.0], [139.0, 154.0]]));

        assert!(matches!(
            a.mul_matrix(&a),
            Err(AlgebraError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_multiplication_is_associative() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..8 {
            let a = random_matrix(&mut rng, 3, 4);
            let b = random_matrix(&mut rng, 4, 2);
            let c = random_matrix(&mut rng, 2, 5);

            let left = a.mul_matrix(&b).unwrap().mul_matrix(&c).unwrap();
            let right = a.mul_matrix(&b.mul_matrix(&c).unwrap()).unwrap();
            assert_relative_eq!(left, right, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_multiplication_respects_swapped_rows() {
        let mut a = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
        a.swap_rows(0, 1).unwrap();
        let product = a.mul_matrix(&Matrix::identity(2).unwrap()).unwrap();
        assert_eq!(product, Matrix::from_array([[3.0, 4.0], [1.0, 2.0]]));
    }

    #[cfg(feature = "nalgebra")]
    #[test]
    fn test_multiplication_matches_nalgebra() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let a = random_matrix(&mut rng, 4, 6);
        let b = random_matrix(&mut rng, 6, 3);

        let expected = nalgebra::DMatrix::from(&a) * nalgebra::DMatrix::from(&b);
        let actual = nalgebra::DMatrix::from(&a.mul_matrix(&b).unwrap());
        assert_relative_eq!(actual, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_matrix_vector_multiplication() {
        let m = Matrix::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let v = Vector::from_array([1.0, 0.0, -1.0]);
        assert_eq!(m.mul_vector(&v).unwrap().as_slice(), &[-2.0, -2.0]);
        assert!(m.mul_vector(&Vector::from_array([1.0, 2.0])).is_err());
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t, Matrix::from_array([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
        assert_eq!(t.transpose(), m);

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for (rows, cols) in [(1, 1), (1, 7), (4, 3), (6, 6)] {
            let a = random_matrix(&mut rng, rows, cols);
            assert!(a.transpose().transpose().compare(&a).unwrap());
        }
    }

    #[test]
    fn test_operators() {
        let a = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_array([[0.0, 1.0], [1.0, 0.0]]);

        assert_eq!(&a + &b, Matrix::from_array([[1.0, 3.0], [4.0, 4.0]]));
        assert_eq!(&a - &b, Matrix::from_array([[1.0, 1.0], [2.0, 4.0]]));
        assert_eq!(&a * &b, Matrix::from_array([[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(&a * 2.0, Matrix::from_array([[2.0, 4.0], [6.0, 8.0]]));
        assert_eq!(-&b, Matrix::from_array([[-0.0, -1.0], [-1.0, -0.0]]));
        assert_eq!(
            (&a * &Vector::from_array([1.0, 1.0])).as_slice(),
            &[3.0, 7.0]
        );
    }

    #[test]
    #[should_panic(expected = "matrix multiplication")]
    fn test_operator_shape_mismatch_panics() {
        let a = Matrix::<f64>::zeros(2, 3).unwrap();
        let _ = &a * &a;
    }
}
