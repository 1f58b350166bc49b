//! Per-frame uniform values
use nalgebra::{Matrix4, Vector3};

use crate::config::RenderConfig;
use crate::transform::Transform;

/// The combined transform uploaded for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    pub model_view_projection: [f32; 16],
}

impl FrameUniforms {
    pub fn compute(config: &RenderConfig, view: &Matrix4<f32>) -> Self {
        Self {
            model_view_projection: Transform::to_column_major(&model_view_projection(config, view)),
        }
    }
}

/// `projection * scale * translation * axis_rotation * view`
pub fn model_view_projection(config: &RenderConfig, view: &Matrix4<f32>) -> Matrix4<f32> {
    let projection = Transform::perspective(config.fov_y, config.aspect, config.near, config.far);
    let [sx, sy, sz] = config.scale;
    let scale = Transform::scaling(sx, sy, sz);
    let rotate = Transform::axis_rotation(&Vector3::from(config.axis), config.axis_angle);
    let [tx, ty, tz] = config.translation;
    let translate = Transform::translation(tx, ty, tz);

    let accumulated = Transform::multiply(&rotate, view);
    let accumulated = Transform::multiply(&translate, &accumulated);
    let accumulated = Transform::multiply(&scale, &accumulated);
    Transform::multiply(&projection, &accumulated)
}
