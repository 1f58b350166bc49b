//! Sinewire Core Library - Shared surface geometry and rendering logic
//!
//! This library provides the platform-independent half of the sinusoidal
//! surface viewer: mesh sampling, transformation matrices, the trackball
//! controller, and the shader/model/render-loop components written against
//! the [`GlContext`] trait so any WebGL-like backend can drive them.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gpu;
pub mod model;
pub mod renderer;
pub mod sampler;
pub mod shader;
pub mod trackball;
pub mod transform;

#[cfg(test)]
mod recording;

// Re-export commonly used types
pub use bootstrap::{bootstrap, report_failure, Host};
pub use config::{GenerationMode, RenderConfig, SurfaceConfig, TrackballConfig, ViewerConfig};
pub use error::{ConfigError, RenderError};
pub use frame::FrameUniforms;
pub use geometry::{LineStrip, StripFamily, SurfaceMesh};
pub use gpu::{GlContext, ShaderStage};
pub use model::DrawableModel;
pub use renderer::Renderer;
pub use shader::ShaderProgram;
pub use trackball::Trackball;
pub use transform::Transform;
