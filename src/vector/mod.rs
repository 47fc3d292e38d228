use std::fmt;

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::error::{AlgebraError, Result};
use crate::utils::{write_value, FloatOps};

mod ops;

/// Fixed-length sequence of floats.
///
/// The dimension is chosen at construction and never changes afterwards.
/// All binary operations require operands of equal dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T: FloatOps> {
    values: Vec<T>,
}

impl<T: FloatOps> Vector<T> {
    /// Allocates a vector of the given dimension. The contents are zeroed but
    /// callers should treat them as unspecified and overwrite every entry.
    pub fn allocate(dimension: usize) -> Result<Self> {
        Self::filled(dimension, T::zero())
    }

    pub fn zeros(dimension: usize) -> Result<Self> {
        Self::filled(dimension, T::zero())
    }

    /// Every component set to `value`
    pub fn filled(dimension: usize, value: T) -> Result<Self> {
        if dimension == 0 {
            return Err(AlgebraError::EmptyDimension("vector dimension"));
        }
        Ok(Vector {
            values: vec![value; dimension],
        })
    }

    /// Copies `values`; the dimension is the slice length.
    pub fn from_values(values: &[T]) -> Result<Self> {
        Self::from_vec(values.to_vec())
    }

    pub fn from_vec(values: Vec<T>) -> Result<Self> {
        if values.is_empty() {
            return Err(AlgebraError::EmptyDimension("vector dimension"));
        }
        Ok(Vector { values })
    }

    /// Builds a vector whose dimension is checked at compile time.
    pub fn from_array<const N: usize>(values: [T; N]) -> Self {
        const { assert!(N > 0, "vector dimension must be at least 1") };
        Vector {
            values: values.to_vec(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| AlgebraError::element_index(index, self.dimension()))
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let dimension = self.dimension();
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| AlgebraError::element_index(index, dimension))?;
        *slot = value;
        Ok(())
    }

    fn check_same_dimension(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(AlgebraError::mismatch(
                op,
                self.dimension(),
                other.dimension(),
            ));
        }
        Ok(())
    }

    fn zip_map(&self, other: &Self, op: &'static str, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_same_dimension(other, op)?;
        Ok(Vector {
            values: self
                .values
                .iter()
                .zip(other.values.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn zip_apply(&mut self, other: &Self, op: &'static str, f: impl Fn(&mut T, T)) -> Result<()> {
        self.check_same_dimension(other, op)?;
        for (a, &b) in self.values.iter_mut().zip(other.values.iter()) {
            f(a, b);
        }
        Ok(())
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        Vector {
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    fn apply(&mut self, f: impl Fn(T) -> T) {
        for v in self.values.iter_mut() {
            *v = f(*v);
        }
    }

    // Elementwise vector-vector arithmetic

    pub fn add_vector(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "vector addition", |a, b| a + b)
    }

    pub fn add_vector_in_place(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, "vector addition", |a, b| *a += b)
    }

    pub fn sub_vector(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "vector subtraction", |a, b| a - b)
    }

    pub fn sub_vector_in_place(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, "vector subtraction", |a, b| *a -= b)
    }

    /// Componentwise product
    pub fn mul_vector(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "vector multiplication", |a, b| a * b)
    }

    pub fn mul_vector_in_place(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, "vector multiplication", |a, b| *a *= b)
    }

    /// Componentwise quotient. Zero components in `other` follow IEEE rules.
    pub fn div_vector(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, "vector division", |a, b| a / b)
    }

    pub fn div_vector_in_place(&mut self, other: &Self) -> Result<()> {
        self.zip_apply(other, "vector division", |a, b| *a /= b)
    }

    // Scalar arithmetic

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
                "division of a vector by a zero scalar",
            ));
        }
        Ok(self.map(|v| v / scalar))
    }

    pub fn div_scalar_in_place(&mut self, scalar: T) -> Result<()> {
        if scalar.is_zero() {
            return Err(AlgebraError::DegenerateOperation(
                "division of a vector by a zero scalar",
            ));
        }
        self.apply(|v| v / scalar);
        Ok(())
    }

    pub fn negated(&self) -> Self {
        self.map(|v| -v)
    }

    // Geometry

    pub fn dot(&self, other: &Self) -> Result<T> {
        self.check_same_dimension(other, "dot product")?;
        let mut sum = T::zero();
        for (&a, &b) in self.values.iter().zip(other.values.iter()) {
            sum += a * b;
        }
        Ok(sum)
    }

    /// Cross product, defined for 3-dimensional operands only.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        if self.dimension() != 3 {
            return Err(AlgebraError::mismatch("cross product", 3, self.dimension()));
        }
        if other.dimension() != 3 {
            return Err(AlgebraError::mismatch("cross product", 3, other.dimension()));
        }
        let (a, b) = (&self.values, &other.values);
        Ok(Vector {
            values: vec![
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ],
        })
    }

    pub fn magnitude_squared(&self) -> T {
        self.values.iter().fold(T::zero(), |acc, &v| acc + v * v)
    }

    pub fn magnitude(&self) -> T {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector pointing the same way as `self`.
    pub fn normalized(&self) -> Result<Self> {
        let magnitude = self.nonzero_magnitude()?;
        Ok(self.map(|v| v / magnitude))
    }

    pub fn normalize(&mut self) -> Result<()> {
        let magnitude = self.nonzero_magnitude()?;
        self.apply(|v| v / magnitude);
        Ok(())
    }

    fn nonzero_magnitude(&self) -> Result<T> {
        let magnitude = self.magnitude();
        if magnitude.is_zero() {
            return Err(AlgebraError::DegenerateOperation(
                "normalization of a zero-magnitude vector",
            ));
        }
        Ok(magnitude)
    }

    /// True iff both vectors have the same dimension and their dot product is
    /// exactly zero.
    pub fn perpendicular(&self, other: &Self) -> bool {
        match self.dot(other) {
            Ok(dot) => dot.is_zero(),
            Err(_) => false,
        }
    }

    /// Every component raised to `exponent`
    pub fn raised_by(&self, exponent: T) -> Self {
        self.map(|v| v.powf(exponent))
    }

    pub fn raise_by(&mut self, exponent: T) {
        self.apply(|v| v.powf(exponent))
    }

    /// Euclidean distance between the two points.
    pub fn distance(&self, other: &Self) -> Result<T> {
        Ok(self.sub_vector(other)?.magnitude())
    }

    /// Exact elementwise equality. Unlike `==`, operands of different
    /// dimension are rejected instead of compared.
    pub fn compare(&self, other: &Self) -> Result<bool> {
        self.check_same_dimension(other, "vector comparison")?;
        Ok(self.values == other.values)
    }

    /// Elementwise equality within an absolute `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: T) -> Result<bool> {
        self.check_same_dimension(other, "vector comparison")?;
        Ok(self.abs_diff_eq(other, epsilon))
    }
}

impl<T: FloatOps> std::ops::Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T: FloatOps> std::ops::IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

impl<'a, T: FloatOps> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: FloatOps> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        &self.values
    }
}

impl<T: FloatOps> TryFrom<Vec<T>> for Vector<T> {
    type Error = AlgebraError;

    fn try_from(values: Vec<T>) -> Result<Self> {
        Vector::from_vec(values)
    }
}

impl<T: FloatOps, const N: usize> From<[T; N]> for Vector<T> {
    fn from(values: [T; N]) -> Self {
        Vector::from_array(values)
    }
}

/// Renders as `{ v0, v1, ..., vn }`.
impl<T: FloatOps> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_value(f, value)?;
        }
        write!(f, " }}")
    }
}

impl<T: FloatOps> AbsDiffEq for Vector<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.dimension() == other.dimension()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: FloatOps> RelativeEq for Vector<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.dimension() == other.dimension()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T: FloatOps> UlpsEq for Vector<T> {
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
        self.dimension() == other.dimension()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}
