//! 4x4 transformation matrices
//!
//! Column-vector convention: `multiply(a, b)` applies `b` first, then `a`.
use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Perspective projection with vertical field of view `fov_y` (radians)
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, fov_y, near, far)
    }

    /// Create a scale matrix
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Rotation by `angle` radians about `axis`; the axis need not be normalized.
    /// A zero axis yields the identity.
    pub fn axis_rotation(axis: &Vector3<f32>, angle: f32) -> Matrix4<f32> {
        match Unit::try_new(*axis, f32::EPSILON) {
            Some(axis) => Rotation3::from_axis_angle(&axis, angle).to_homogeneous(),
            None => Matrix4::identity(),
        }
    }

    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
        a * b
    }

    /// Column-major element order, as expected by `uniformMatrix4fv` without transpose
    pub fn to_column_major(matrix: &Matrix4<f32>) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(matrix.as_slice());
        out
    }
}
