//! 4x4 transform builders for 3-D graphics.
//!
//! Matrices follow the row-vector convention: a point is the row
//! `[x y z 1]` and is transformed as `p · M`, so the translation lives in the
//! last row and "apply `A`, then `B`" composes as `A · B`.

use log::warn;

use crate::dense::Matrix;
use crate::error::{AlgebraError, Result};
use crate::utils::FloatOps;
use crate::vector::Vector;

fn check_transform<T: FloatOps>(m: &Matrix<T>) -> Result<()> {
    if m.shape() != (4, 4) {
        return Err(AlgebraError::mismatch("transform", "4x4", m.shape_string()));
    }
    Ok(())
}

fn check_vec3<T: FloatOps>(v: &Vector<T>, op: &'static str) -> Result<()> {
    if v.dimension() != 3 {
        return Err(AlgebraError::mismatch(op, 3, v.dimension()));
    }
    Ok(())
}

fn two<T: FloatOps>() -> T {
    T::one() + T::one()
}

pub fn radians<T: FloatOps>(degrees: T) -> T {
    degrees.to_radians()
}

pub fn degrees<T: FloatOps>(radians: T) -> T {
    radians.to_degrees()
}

/// Adds `v` to the translation row of `m`.
pub fn translate<T: FloatOps>(m: &Matrix<T>, v: &Vector<T>) -> Result<Matrix<T>> {
    check_transform(m)?;
    check_vec3(v, "translate")?;

    let mut ret = m.clone();
    for c in 0..3 {
        ret[(3, c)] += v[c];
    }
    Ok(ret)
}

/// Rotates `m` by `angle` radians around `axis`.
///
/// The rotation is applied before `m`: the basis rows of `m` are recombined
/// by the axis-angle rotation and the translation row is kept.
pub fn rotate<T: FloatOps>(m: &Matrix<T>, angle: T, axis: &Vector<T>) -> Result<Matrix<T>> {
    check_transform(m)?;
    check_vec3(axis, "rotate")?;

    let c = angle.cos();
    let s = angle.sin();
    let axis = axis.normalized()?;
    let tmp = axis.mul_scalar(T::one() - c);
    let (x, y, z) = (axis[0], axis[1], axis[2]);

    let rotation = Matrix::from_array([
        [c + tmp[0] * x, tmp[0] * y + s * z, tmp[0] * z - s * y],
        [tmp[1] * x - s * z, c + tmp[1] * y, tmp[1] * z + s * x],
        [tmp[2] * x + s * y, tmp[2] * y - s * x, c + tmp[2] * z],
    ]);

    let basis = [m.row(0)?, m.row(1)?, m.row(2)?];
    let mut ret = m.clone();
    for i in 0..3 {
        let mut combined = basis[0].mul_scalar(rotation[(i, 0)]);
        combined.add_vector_in_place(&basis[1].mul_scalar(rotation[(i, 1)]))?;
        combined.add_vector_in_place(&basis[2].mul_scalar(rotation[(i, 2)]))?;
        ret.set_row(i, &combined)?;
    }
    Ok(ret)
}

/// Scales the basis rows of `m` by the components of `v`.
pub fn scale<T: FloatOps>(m: &Matrix<T>, v: &Vector<T>) -> Result<Matrix<T>> {
    check_transform(m)?;
    check_vec3(v, "scale")?;

    let mut ret = m.clone();
    for i in 0..3 {
        ret.set_row(i, &m.row(i)?.mul_scalar(v[i]))?;
    }
    Ok(ret)
}

/// View matrix for a camera at `eye` looking at `center`.
///
/// The camera axes `s` (right), `u` (up) and `-f` (back) fill the first three
/// columns, and the last row holds `(-s·eye, -u·eye, f·eye, 1)` so that
/// `eye` maps to the origin.
pub fn look_at<T: FloatOps>(
    eye: &Vector<T>,
    center: &Vector<T>,
    up: &Vector<T>,
) -> Result<Matrix<T>> {
    check_vec3(eye, "look at")?;
    check_vec3(center, "look at")?;
    check_vec3(up, "look at")?;

    let f = center.sub_vector(eye)?.normalized()?;
    let side = f.cross(up)?;
    if side.magnitude().is_zero() {
        warn!("look_at: up vector {up} is parallel to the view direction {f}");
        return Err(AlgebraError::DegenerateOperation(
            "up vector parallel to the view direction",
        ));
    }
    let s = side.normalized()?;
    let u = s.cross(&f)?;

    let mut ret = Matrix::identity(4)?;
    for i in 0..3 {
        ret[(i, 0)] = s[i];
        ret[(i, 1)] = u[i];
        ret[(i, 2)] = -f[i];
    }
    ret[(3, 0)] = -s.dot(eye)?;
    ret[(3, 1)] = -u.dot(eye)?;
    ret[(3, 2)] = f.dot(eye)?;
    Ok(ret)
}

/// Symmetric perspective projection with a vertical field of view `fov` in
/// radians.
pub fn perspective<T: FloatOps>(fov: T, aspect_ratio: T, near: T, far: T) -> Result<Matrix<T>> {
    let tan_half_fov = (fov / two()).tan();
    if tan_half_fov.is_zero() || aspect_ratio.is_zero() {
        return Err(AlgebraError::DegenerateOperation(
            "perspective with zero field of view or aspect ratio",
        ));
    }
    if far == near {
        return Err(AlgebraError::DegenerateOperation(
            "perspective with coincident near and far planes",
        ));
    }

    let mut ret = Matrix::zeros(4, 4)?;
    ret[(0, 0)] = T::one() / (aspect_ratio * tan_half_fov);
    ret[(1, 1)] = T::one() / tan_half_fov;
    ret[(2, 2)] = -(far + near) / (far - near);
    ret[(2, 3)] = -T::one();
    ret[(3, 2)] = -(two::<T>() * far * near) / (far - near);
    Ok(ret)
}

/// Orthographic projection of the box `[left, right] x [bottom, top]`.
pub fn ortho<T: FloatOps>(left: T, right: T, bottom: T, top: T) -> Result<Matrix<T>> {
    if left == right || bottom == top {
        return Err(AlgebraError::DegenerateOperation(
            "orthographic projection of an empty box",
        ));
    }

    let mut ret = Matrix::identity(4)?;
    ret[(0, 0)] = two::<T>() / (right - left);
    ret[(1, 1)] = two::<T>() / (top - bottom);
    ret[(2, 2)] = -T::one();
    ret[(3, 0)] = -(right + left) / (right - left);
    ret[(3, 1)] = -(top + bottom) / (top - bottom);
    Ok(ret)
}

/// Applies a 4x4 transform to the point `p` as `[x y z 1] · m`, followed by
/// the perspective divide when `w` is neither 0 nor 1.
pub fn transform_point<T: FloatOps>(p: &Vector<T>, m: &Matrix<T>) -> Result<Vector<T>> {
    check_transform(m)?;
    check_vec3(p, "transform point")?;

    let homogeneous = Vector::from_array([p[0], p[1], p[2], T::one()]);
    let out = m.transpose().mul_vector(&homogeneous)?;
    let w = out[3];
    let point = Vector::from_array([out[0], out[1], out[2]]);
    if w.is_zero() || w == T::one() {
        return Ok(point);
    }
    point.div_scalar(w)
}
