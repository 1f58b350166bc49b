//! Error taxonomy for configuration and GPU initialization.

use crate::gpu::ShaderStage;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Invalid(String),
}

/// Failures that abort viewer initialization.
///
/// None of these occur during steady-state rendering; once a [`Renderer`]
/// exists every frame is assumed to succeed.
///
/// [`Renderer`]: crate::renderer::Renderer
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Browser does not support WebGL")]
    ContextUnavailable,

    #[error("could not create {0}")]
    ShaderCreation(ShaderStage),

    #[error("Error in vertex shader:  {0}")]
    VertexShader(String),

    #[error("Error in fragment shader:  {0}")]
    FragmentShader(String),

    #[error("could not create shader program")]
    ProgramCreation,

    #[error("Link error in program:  {0}")]
    Link(String),

    #[error("attribute `{0}` not found in shader program")]
    MissingAttribute(&'static str),

    #[error("uniform `{0}` not found in shader program")]
    MissingUniform(&'static str),

    #[error("could not allocate vertex buffer")]
    BufferAllocation,

    #[error("line strip of {0} vertices exceeds the draw count limit")]
    StripTooLong(usize),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
