//! Viewer configuration.
//!
//! Every numeric constant of the viewer lives here so a page can override
//! it through a JSON document. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::StripFamily;

/// Upper bound on the vertices a sampled surface may produce
pub const MAX_SURFACE_VERTICES: u64 = 1 << 24;

/// How the surface is broken into line strips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// One long ribbon strip walking every sampled angle
    #[default]
    Combined,
    /// Separate constant-angle and constant-height strip families
    Decomposed,
}

/// Parameters of the swept sinusoid `r(t) = radius * sin(frequency * PI * t)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub mode: GenerationMode,
    /// Angles are sampled over `[0, angle_range_deg)`
    pub angle_range_deg: u32,
    /// Number of height intervals; each height curve has `height_steps + 1` points
    pub height_steps: u32,
    pub radius: f32,
    pub height: f32,
    pub frequency: f32,
    pub combined_angle_step_deg: u32,
    /// Vertical distance between the two rails of the combined ribbon
    pub ribbon_offset: f32,
    pub u_angle_step_deg: u32,
    pub v_height_step: u32,
    pub v_angle_step_deg: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Combined,
            angle_range_deg: 720,
            height_steps: 100,
            radius: 1.2,
            height: 5.0,
            frequency: 5.0,
            combined_angle_step_deg: 5,
            ribbon_offset: 0.1,
            u_angle_step_deg: 60,
            v_height_step: 5,
            v_angle_step_deg: 10,
        }
    }
}

/// Fixed camera and object transform applied every frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub scale: [f32; 3],
    pub axis: [f32; 3],
    pub axis_angle: f32,
    pub translation: [f32; 3],
    pub clear_color: [f32; 4],
    pub surface_color: [f32; 4],
    pub u_color: [f32; 4],
    pub v_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::PI / 8.0,
            aspect: 1.0,
            near: 2.0,
            far: 10.0,
            scale: [0.4, 0.4, 0.4],
            axis: [0.6, 0.6, 0.0],
            axis_angle: 0.7,
            translation: [0.0, 0.0, -25.0],
            clear_color: [0.0, 0.0, 0.0, 1.0],
            surface_color: [1.0, 1.0, 0.0, 1.0],
            u_color: [1.0, 1.0, 0.0, 1.0],
            v_color: [0.0, 1.0, 1.0, 1.0],
        }
    }
}

impl RenderConfig {
    pub fn color_for(&self, family: StripFamily) -> [f32; 4] {
        match family {
            StripFamily::Surface => self.surface_color,
            StripFamily::ULines => self.u_color,
            StripFamily::VLines => self.v_color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackballConfig {
    pub view_distance: f32,
}

impl Default for TrackballConfig {
    fn default() -> Self {
        Self { view_distance: 0.0 }
    }
}

/// Top-level configuration consumed by the bootstrap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub surface: SurfaceConfig,
    pub render: RenderConfig,
    pub trackball: TrackballConfig,
    pub canvas_id: String,
    pub holder_id: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            render: RenderConfig::default(),
            trackball: TrackballConfig::default(),
            canvas_id: "webglcanvas".into(),
            holder_id: "canvas-holder".into(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        self.surface.collect_errors(&mut errors);
        self.render.collect_errors(&mut errors);
        if !self.trackball.view_distance.is_finite() || self.trackball.view_distance < 0.0 {
            errors.push(format!(
                "trackball.view_distance = {} must be finite and non-negative",
                self.trackball.view_distance
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }
}

impl SurfaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }

    fn collect_errors(&self, errors: &mut Vec<String>) {
        let reported = errors.len();
        validate_step(errors, "surface.angle_range_deg", self.angle_range_deg, u32::MAX);
        validate_step(errors, "surface.height_steps", self.height_steps, u32::MAX);
        validate_step(
            errors,
            "surface.combined_angle_step_deg",
            self.combined_angle_step_deg,
            self.angle_range_deg,
        );
        validate_step(errors, "surface.u_angle_step_deg", self.u_angle_step_deg, self.angle_range_deg);
        validate_step(errors, "surface.v_angle_step_deg", self.v_angle_step_deg, self.angle_range_deg);
        validate_step(errors, "surface.v_height_step", self.v_height_step, self.height_steps);
        validate_positive(errors, "surface.radius", self.radius);
        validate_positive(errors, "surface.height", self.height);
        validate_positive(errors, "surface.frequency", self.frequency);
        if !self.ribbon_offset.is_finite() || self.ribbon_offset < 0.0 {
            errors.push(format!(
                "surface.ribbon_offset = {} must be finite and non-negative",
                self.ribbon_offset
            ));
        }
        if errors.len() == reported {
            let vertices = self.vertex_budget();
            if vertices > MAX_SURFACE_VERTICES {
                errors.push(format!(
                    "surface produces {vertices} vertices, more than the limit of {MAX_SURFACE_VERTICES}"
                ));
            }
        }
    }

    /// Vertices the sampler emits for this configuration.
    ///
    /// Only meaningful once every step is known to be non-zero.
    pub fn vertex_budget(&self) -> u64 {
        let samples = |range: u32, step: u32| u64::from(range.div_ceil(step));
        let height_samples = u64::from(self.height_steps) + 1;
        match self.mode {
            GenerationMode::Combined => samples(self.angle_range_deg, self.combined_angle_step_deg)
                .saturating_mul(height_samples)
                .saturating_mul(2),
            GenerationMode::Decomposed => {
                let u_lines = samples(self.angle_range_deg, self.u_angle_step_deg)
                    .saturating_mul(height_samples);
                let v_lines = (u64::from(self.height_steps) / u64::from(self.v_height_step) + 1)
                    .saturating_mul(samples(self.angle_range_deg, self.v_angle_step_deg));
                u_lines.saturating_add(v_lines)
            }
        }
    }
}

impl RenderConfig {
    fn collect_errors(&self, errors: &mut Vec<String>) {
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            errors.push(format!("render.fov_y = {} is out of range (0, PI)", self.fov_y));
        }
        validate_positive(errors, "render.aspect", self.aspect);
        validate_positive(errors, "render.near", self.near);
        if !(self.far > self.near) {
            errors.push(format!(
                "render.far = {} must be greater than render.near = {}",
                self.far, self.near
            ));
        }
        let [x, y, z] = self.axis;
        if x * x + y * y + z * z <= f32::EPSILON {
            errors.push("render.axis must not be the zero vector".into());
        }
    }
}

/// Push an error unless `value` lies in `[1, max]`.
fn validate_step(errors: &mut Vec<String>, name: &str, value: u32, max: u32) {
    if value == 0 || value > max {
        errors.push(format!("{name} = {value} is out of range [1, {max}]"));
    }
}

fn validate_positive(errors: &mut Vec<String>, name: &str, value: f32) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{name} = {value} must be finite and positive"));
    }
}
