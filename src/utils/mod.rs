use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use approx::{RelativeEq, UlpsEq};
use num_traits::{Float, FromPrimitive, NumCast};

/// Element type accepted by [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix).
///
/// Blanket-implemented for every float that supports the arithmetic and
/// tolerant comparison the crate needs; in practice `f32` and `f64`.
pub trait FloatOps:
    Float
    + FromPrimitive
    + NumCast
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + RelativeEq<Epsilon = Self>
    + UlpsEq<Epsilon = Self>
    + 'static
{
}

impl<T> FloatOps for T where
    T: Float
        + FromPrimitive
        + NumCast
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Sum
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + RelativeEq<Epsilon = T>
        + UlpsEq<Epsilon = T>
        + 'static
{
}

/// Selects the lane (row or column) a matrix operation works along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ROW,
    COLUMN,
}

/// Writes `value` honouring the formatter's precision, if one was given.
pub(crate) fn write_value<T: Display>(
    f: &mut std::fmt::Formatter<'_>,
    value: &T,
) -> std::fmt::Result {
    match f.precision() {
        Some(precision) => write!(f, "{:.*}", precision, value),
        None => write!(f, "{}", value),
    }
}
