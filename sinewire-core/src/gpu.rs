//! The subset of a WebGL-style context the viewer needs.
//!
//! Keeping the renderer generic over this trait lets the shader, model and
//! render-loop logic run against the browser context in production and a
//! recording double in tests.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex shader"),
            ShaderStage::Fragment => write!(f, "fragment shader"),
        }
    }
}

pub trait GlContext {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compiled(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_linked(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: &Self::Program);

    /// Negative when the attribute does not exist
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn delete_buffer(&self, buffer: &Self::Buffer);
    fn bind_array_buffer(&self, buffer: &Self::Buffer);
    /// Bind `buffer` and replace its contents with `data`
    fn upload_vertices(&self, buffer: &Self::Buffer, data: &[f32]);

    /// Tightly packed `f32` components starting at offset zero
    fn vertex_attrib_pointer(&self, index: u32, components: i32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn draw_line_strip(&self, count: i32);

    fn uniform_matrix4(&self, location: &Self::UniformLocation, matrix: &[f32; 16]);
    fn uniform4(&self, location: &Self::UniformLocation, value: &[f32; 4]);

    /// Clear the color and depth buffers
    fn clear(&self, color: &[f32; 4]);
    fn enable_depth_test(&self);
}
