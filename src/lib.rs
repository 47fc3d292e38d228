pub mod dense;
pub mod error;
mod interop;
pub mod transform;
mod utils;
pub mod vector;

pub use dense::Matrix;
pub use error::{AlgebraError, Result};
pub use utils::Direction;
pub use utils::FloatOps;
pub use vector::Vector;
