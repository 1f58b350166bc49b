//! Compiled shader program with its cached attribute and uniform locations
use log::{debug, error};

use crate::error::RenderError;
use crate::gpu::{GlContext, ShaderStage};

pub const VERTEX_SHADER_SOURCE: &str = include_str!("../shaders/surface.vert");
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("../shaders/surface.frag");

pub const ATTRIB_VERTEX: &str = "vertex";
pub const UNIFORM_MVP: &str = "ModelViewProjectionMatrix";
pub const UNIFORM_COLOR: &str = "color";

/// A linked program. Locations are looked up once in [`ShaderProgram::build`]
/// and reused for the lifetime of the program.
pub struct ShaderProgram<G: GlContext> {
    program: G::Program,
    attrib_vertex: u32,
    mvp: G::UniformLocation,
    color: G::UniformLocation,
}

impl<G: GlContext> ShaderProgram<G> {
    /// Compile both stages, link them, and resolve the viewer's locations.
    ///
    /// The error names the failing stage and carries the driver's log.
    pub fn build(gl: &G, vertex_source: &str, fragment_source: &str) -> Result<Self, RenderError> {
        let program = link_program(gl, vertex_source, fragment_source)?;

        let attrib_vertex = u32::try_from(gl.attrib_location(&program, ATTRIB_VERTEX))
            .map_err(|_| RenderError::MissingAttribute(ATTRIB_VERTEX))?;
        let mvp = gl
            .uniform_location(&program, UNIFORM_MVP)
            .ok_or(RenderError::MissingUniform(UNIFORM_MVP))?;
        let color = gl
            .uniform_location(&program, UNIFORM_COLOR)
            .ok_or(RenderError::MissingUniform(UNIFORM_COLOR))?;

        debug!("shader program linked, `{ATTRIB_VERTEX}` at location {attrib_vertex}");
        Ok(Self {
            program,
            attrib_vertex,
            mvp,
            color,
        })
    }

    /// Build the viewer's bundled line shader
    pub fn surface(gl: &G) -> Result<Self, RenderError> {
        Self::build(gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }

    pub fn use_program(&self, gl: &G) {
        gl.use_program(&self.program);
    }

    pub fn attrib_vertex(&self) -> u32 {
        self.attrib_vertex
    }

    pub fn set_model_view_projection(&self, gl: &G, matrix: &[f32; 16]) {
        gl.uniform_matrix4(&self.mvp, matrix);
    }

    pub fn set_color(&self, gl: &G, color: &[f32; 4]) {
        gl.uniform4(&self.color, color);
    }
}

fn compile_shader<G: GlContext>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, RenderError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(RenderError::ShaderCreation(stage))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl.shader_compiled(&shader) {
        let log = gl.shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(&shader);
        error!("{stage} failed to compile: {log}");
        return Err(match stage {
            ShaderStage::Vertex => RenderError::VertexShader(log),
            ShaderStage::Fragment => RenderError::FragmentShader(log),
        });
    }
    Ok(shader)
}

fn link_program<G: GlContext>(
    gl: &G,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<G::Program, RenderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
        Ok(fragment) => fragment,
        Err(e) => {
            gl.delete_shader(&vertex);
            return Err(e);
        }
    };

    let linked = gl.create_program().ok_or(RenderError::ProgramCreation).and_then(|program| {
        gl.attach_shader(&program, &vertex);
        gl.attach_shader(&program, &fragment);
        gl.link_program(&program);

        if gl.program_linked(&program) {
            Ok(program)
        } else {
            let log = gl.program_info_log(&program).unwrap_or_default();
            gl.delete_program(&program);
            error!("shader program failed to link: {log}");
            Err(RenderError::Link(log))
        }
    });

    // A linked program keeps its own copy of the stages
    gl.delete_shader(&vertex);
    gl.delete_shader(&fragment);
    linked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{GlCall, RecordingGl};

    #[test]
    fn test_build_resolves_locations() {
        let gl = RecordingGl::new();
        let program = ShaderProgram::surface(&gl).unwrap();
        assert_eq!(program.attrib_vertex(), 0);

        program.set_color(&gl, &[1.0, 0.0, 0.0, 1.0]);
        assert!(gl
            .calls()
            .contains(&GlCall::Uniform4(UNIFORM_COLOR.into(), [1.0, 0.0, 0.0, 1.0])));
    }

    #[test]
    fn test_vertex_failure_names_stage() {
        let gl = RecordingGl {
            fail_compile: Some(ShaderStage::Vertex),
            ..RecordingGl::default()
        };
        let err = ShaderProgram::build(&gl, "not glsl", FRAGMENT_SHADER_SOURCE)
            .err()
            .unwrap();
        let message = err.to_string();
        assert!(message.contains("vertex shader"), "{message}");
        assert!(message.contains("syntax error"), "{message}");
        // Nothing past the failing stage is attempted
        assert!(!gl.calls().contains(&GlCall::CreateShader(ShaderStage::Fragment)));
    }

    #[test]
    fn test_fragment_failure_names_stage() {
        let gl = RecordingGl {
            fail_compile: Some(ShaderStage::Fragment),
            ..RecordingGl::default()
        };
        let err = ShaderProgram::surface(&gl).err().unwrap();
        assert!(matches!(err, RenderError::FragmentShader(_)));
        assert!(err.to_string().contains("fragment shader"));
    }

    #[test]
    fn test_link_failure_carries_log() {
        let gl = RecordingGl {
            fail_link: true,
            ..RecordingGl::default()
        };
        let err = ShaderProgram::surface(&gl).err().unwrap();
        assert_eq!(err.to_string(), "Link error in program:  varying mismatch");
    }

    #[test]
    fn test_stages_released_after_link() {
        let gl = RecordingGl::new();
        ShaderProgram::surface(&gl).unwrap();
        let calls = gl.calls();
        // vertex = 1, fragment = 2, program = 3
        assert!(calls.contains(&GlCall::DeleteShader(1)));
        assert!(calls.contains(&GlCall::DeleteShader(2)));
        assert!(!calls.contains(&GlCall::DeleteProgram(3)));
    }

    #[test]
    fn test_fragment_failure_releases_vertex_stage() {
        let gl = RecordingGl {
            fail_compile: Some(ShaderStage::Fragment),
            ..RecordingGl::default()
        };
        assert!(ShaderProgram::surface(&gl).is_err());
        let calls = gl.calls();
        assert!(calls.contains(&GlCall::DeleteShader(1)));
        assert!(calls.contains(&GlCall::DeleteShader(2)));
        assert!(!calls.contains(&GlCall::CreateProgram));
    }

    #[test]
    fn test_link_failure_releases_program_and_stages() {
        let gl = RecordingGl {
            fail_link: true,
            ..RecordingGl::default()
        };
        assert!(ShaderProgram::surface(&gl).is_err());
        let calls = gl.calls();
        assert!(calls.contains(&GlCall::DeleteProgram(3)));
        assert!(calls.contains(&GlCall::DeleteShader(1)));
        assert!(calls.contains(&GlCall::DeleteShader(2)));
    }

    #[test]
    fn test_bundled_sources_need_webgl2() {
        assert!(VERTEX_SHADER_SOURCE.starts_with("#version 300 es"));
        assert!(FRAGMENT_SHADER_SOURCE.starts_with("#version 300 es"));
    }

    #[test]
    fn test_bundled_sources_declare_expected_names() {
        assert!(VERTEX_SHADER_SOURCE.contains(ATTRIB_VERTEX));
        assert!(VERTEX_SHADER_SOURCE.contains(UNIFORM_MVP));
        assert!(FRAGMENT_SHADER_SOURCE.contains(UNIFORM_COLOR));
    }
}
