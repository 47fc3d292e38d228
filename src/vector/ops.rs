//! Operator sugar over the checked vector methods.
//!
//! Binary operators panic with the [`AlgebraError`](crate::AlgebraError)
//! message when the operands disagree in dimension, the same way slice
//! indexing panics when out of bounds. Use the `*_vector` methods when the
//! dimensions are not known to match.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Vector;
use crate::utils::FloatOps;

macro_rules! vector_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<T: FloatOps> $trait<&Vector<T>> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                match self.$checked(rhs) {
                    Ok(v) => v,
                    Err(e) => panic!("{e}"),
                }
            }
        }

        impl<T: FloatOps> $trait<Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: Vector<T>) -> Vector<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

vector_binop!(Add, add, add_vector);
vector_binop!(Sub, sub, sub_vector);

impl<T: FloatOps> Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, scalar: T) -> Vector<T> {
        self.mul_scalar(scalar)
    }
}

impl<T: FloatOps> Mul<T> for Vector<T> {
    type Output = Vector<T>;

    fn mul(mut self, scalar: T) -> Vector<T> {
        self.mul_scalar_in_place(scalar);
        self
    }
}

impl<T: FloatOps> Div<T> for &Vector<T> {
    type Output = Vector<T>;

    fn div(self, scalar: T) -> Vector<T> {
        match self.div_scalar(scalar) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: FloatOps> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.negated()
    }
}

impl<T: FloatOps> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.negated()
    }
}
