//! Recording `GlContext` double for tests.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::gpu::{GlContext, ShaderStage};
use crate::shader::{ATTRIB_VERTEX, UNIFORM_COLOR, UNIFORM_MVP};

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader(ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer(u32),
    BufferData { buffer: u32, floats: usize },
    VertexAttribPointer { index: u32, components: i32 },
    EnableVertexAttribArray(u32),
    DrawLineStrip(i32),
    UniformMatrix4(String, [f32; 16]),
    Uniform4(String, [f32; 4]),
    Clear([f32; 4]),
    EnableDepthTest,
}

#[derive(Default)]
pub struct RecordingGl {
    pub calls: Rc<RefCell<Vec<GlCall>>>,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,
    pub buffer_limit: Option<u32>,
    pub next_id: Cell<u32>,
    pub shader_stages: RefCell<Vec<(u32, ShaderStage)>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn next_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.shader_stages
            .borrow()
            .iter()
            .find(|(id, _)| *id == shader)
            .map(|(_, stage)| *stage)
    }
}

impl GlContext for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        self.record(GlCall::CreateShader(stage));
        let id = self.next_id();
        self.shader_stages.borrow_mut().push((id, stage));
        Some(id)
    }

    fn shader_source(&self, _shader: &u32, _source: &str) {}

    fn compile_shader(&self, shader: &u32) {
        self.record(GlCall::CompileShader(*shader));
    }

    fn shader_compiled(&self, shader: &u32) -> bool {
        self.fail_compile.is_none() || self.fail_compile != self.stage_of(*shader)
    }

    fn shader_info_log(&self, shader: &u32) -> Option<String> {
        Some(format!("0:1: syntax error in shader {shader}"))
    }

    fn delete_shader(&self, shader: &u32) {
        self.record(GlCall::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        self.record(GlCall::CreateProgram);
        Some(self.next_id())
    }

    fn attach_shader(&self, _program: &u32, _shader: &u32) {}

    fn link_program(&self, program: &u32) {
        self.record(GlCall::LinkProgram(*program));
    }

    fn program_linked(&self, _program: &u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        Some("varying mismatch".into())
    }

    fn delete_program(&self, program: &u32) {
        self.record(GlCall::DeleteProgram(*program));
    }

    fn use_program(&self, program: &u32) {
        self.record(GlCall::UseProgram(*program));
    }

    fn attrib_location(&self, _program: &u32, name: &str) -> i32 {
        if name == ATTRIB_VERTEX {
            0
        } else {
            -1
        }
    }

    fn uniform_location(&self, _program: &u32, name: &str) -> Option<String> {
        [UNIFORM_MVP, UNIFORM_COLOR]
            .contains(&name)
            .then(|| name.to_string())
    }

    fn create_buffer(&self) -> Option<u32> {
        let id = self.next_id();
        if self.buffer_limit.is_some_and(|limit| id > limit) {
            return None;
        }
        self.record(GlCall::CreateBuffer(id));
        Some(id)
    }

    fn delete_buffer(&self, buffer: &u32) {
        self.record(GlCall::DeleteBuffer(*buffer));
    }

    fn bind_array_buffer(&self, buffer: &u32) {
        self.record(GlCall::BindBuffer(*buffer));
    }

    fn upload_vertices(&self, buffer: &u32, data: &[f32]) {
        self.record(GlCall::BufferData {
            buffer: *buffer,
            floats: data.len(),
        });
    }

    fn vertex_attrib_pointer(&self, index: u32, components: i32) {
        self.record(GlCall::VertexAttribPointer { index, components });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn draw_line_strip(&self, count: i32) {
        self.record(GlCall::DrawLineStrip(count));
    }

    fn uniform_matrix4(&self, location: &String, matrix: &[f32; 16]) {
        self.record(GlCall::UniformMatrix4(location.clone(), *matrix));
    }

    fn uniform4(&self, location: &String, value: &[f32; 4]) {
        self.record(GlCall::Uniform4(location.clone(), *value));
    }

    fn clear(&self, color: &[f32; 4]) {
        self.record(GlCall::Clear(*color));
    }

    fn enable_depth_test(&self) {
        self.record(GlCall::EnableDepthTest);
    }
}
