//! Conversions to and from the ndarray and nalgebra containers.
//!
//! Each backend sits behind the cargo feature of the same name; both are on
//! by default. Conversions into this crate's types are fallible because the
//! foreign containers admit empty shapes.

#[cfg(feature = "nalgebra")]
mod nalgebra_compat;
#[cfg(feature = "ndarray")]
mod ndarray_compat;
