//! Surface sampling: the sinusoid `r(t) = radius * sin(frequency * PI * t)`
//! swept around the vertical axis, emitted as line strips.
use log::info;
use nalgebra::Point3;

use crate::config::{GenerationMode, SurfaceConfig};
use crate::error::ConfigError;
use crate::geometry::{LineStrip, SurfaceMesh};

/// Sample the surface described by `config` in its configured mode
pub fn sample(config: &SurfaceConfig) -> Result<SurfaceMesh, ConfigError> {
    config.validate()?;

    let mesh = match config.mode {
        GenerationMode::Combined => SurfaceMesh::Combined(combined_strip(config)),
        GenerationMode::Decomposed => SurfaceMesh::Decomposed {
            u_lines: u_lines(config),
            v_lines: v_lines(config),
        },
    };

    info!(
        "sampled {:?} surface: {} strips, {} vertices",
        config.mode,
        mesh.strip_count(),
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Point on the surface at angle `theta` (radians) and height parameter `t` in `[0, 1]`
pub fn surface_point(config: &SurfaceConfig, theta: f32, t: f32) -> Point3<f32> {
    let r = config.radius * (config.frequency * std::f32::consts::PI * t).sin();
    Point3::new(r * theta.cos(), config.height * t, r * theta.sin())
}

/// Sampled angles in degrees; the closing angle itself is never emitted.
fn angles(range_deg: u32, step_deg: u32) -> impl Iterator<Item = f32> {
    (0..range_deg)
        .step_by(step_deg as usize)
        .map(|deg| (deg as f32).to_radians())
}

fn height_parameter(j: u32, steps: u32) -> f32 {
    j as f32 / steps as f32
}

/// One ribbon strip: every height sample is pushed twice, the second copy
/// raised by `ribbon_offset` and clamped to the surface height.
fn combined_strip(config: &SurfaceConfig) -> LineStrip {
    let angle_count = config.angle_range_deg.div_ceil(config.combined_angle_step_deg) as usize;
    let mut strip = LineStrip::with_capacity(angle_count * (config.height_steps as usize + 1) * 2);

    for theta in angles(config.angle_range_deg, config.combined_angle_step_deg) {
        for j in 0..=config.height_steps {
            let point = surface_point(config, theta, height_parameter(j, config.height_steps));
            let raised_y = (point.y + config.ribbon_offset).min(config.height);
            strip.push(point);
            strip.push(Point3::new(point.x, raised_y, point.z));
        }
    }
    strip
}

/// Constant-angle curves, one per sampled angle, running bottom to top
fn u_lines(config: &SurfaceConfig) -> Vec<LineStrip> {
    angles(config.angle_range_deg, config.u_angle_step_deg)
        .map(|theta| LineStrip {
            points: (0..=config.height_steps)
                .map(|j| surface_point(config, theta, height_parameter(j, config.height_steps)))
                .collect(),
        })
        .collect()
}

/// Constant-height curves, one per sampled height, running around the axis
fn v_lines(config: &SurfaceConfig) -> Vec<LineStrip> {
    (0..=config.height_steps)
        .step_by(config.v_height_step as usize)
        .map(|j| {
            let t = height_parameter(j, config.height_steps);
            let mut strip = LineStrip::new();
            for theta in angles(config.angle_range_deg, config.v_angle_step_deg) {
                strip.push(surface_point(config, theta, t));
            }
            strip
        })
        .collect()
}
