//! Virtual trackball rotation driven by pointer drags
use nalgebra::{Matrix4, UnitQuaternion, Vector3};

/// Rotation state for mouse-driven viewing.
///
/// Pointer positions are projected onto a unit sphere inscribed in the
/// drawing surface; dragging rotates the view by the arc between the
/// previous and current projected points.
#[derive(Debug, Clone)]
pub struct Trackball {
    rotation: UnitQuaternion<f32>,
    view_distance: f32,
    drag_from: Option<Vector3<f32>>,
}

impl Trackball {
    pub fn new(view_distance: f32) -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            view_distance,
            drag_from: None,
        }
    }

    /// `translation(0, 0, -view_distance) * rotation`
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(0.0, 0.0, -self.view_distance))
            * self.rotation.to_homogeneous()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn begin_drag(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.drag_from = Some(sphere_point(x, y, width, height));
    }

    /// Returns true when the rotation changed and the view needs redrawing
    pub fn drag_to(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        let Some(from) = self.drag_from else {
            return false;
        };
        let to = sphere_point(x, y, width, height);
        if (to - from).norm() < 1e-6 {
            return false;
        }
        let Some(delta) = UnitQuaternion::rotation_between(&from, &to) else {
            return false;
        };
        self.rotation = delta * self.rotation;
        self.drag_from = Some(to);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }

    pub fn reset(&mut self) {
        self.rotation = UnitQuaternion::identity();
        self.drag_from = None;
    }
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Map a surface position (origin top-left, y down) onto the unit sphere,
/// or onto its silhouette when the position falls outside it.
fn sphere_point(x: f32, y: f32, width: f32, height: f32) -> Vector3<f32> {
    let radius = (width.min(height) / 2.0).max(1.0);
    let vx = (x - width / 2.0) / radius;
    let vy = (height / 2.0 - y) / radius;
    let d2 = vx * vx + vy * vy;
    if d2 > 1.0 {
        let d = d2.sqrt();
        Vector3::new(vx / d, vy / d, 0.0)
    } else {
        Vector3::new(vx, vy, (1.0 - d2).sqrt())
    }
}
