//! The render loop and the state it owns
use log::info;
use nalgebra::Matrix4;

use crate::config::{RenderConfig, ViewerConfig};
use crate::error::RenderError;
use crate::frame::FrameUniforms;
use crate::geometry::StripFamily;
use crate::gpu::GlContext;
use crate::model::DrawableModel;
use crate::sampler;
use crate::shader::ShaderProgram;

/// One uploaded strip family, drawn in a single flat color
pub struct SurfaceLayer<G: GlContext> {
    pub family: StripFamily,
    pub model: DrawableModel<G>,
}

/// Everything a frame needs: the context, the program, and the uploaded
/// surface. Built once and read-only afterwards.
pub struct Renderer<G: GlContext> {
    gl: G,
    program: ShaderProgram<G>,
    layers: Vec<SurfaceLayer<G>>,
    config: RenderConfig,
}

impl<G: GlContext> Renderer<G> {
    /// Build the shader program, sample and upload the surface, and enable depth testing.
    pub fn initialize(gl: G, config: &ViewerConfig) -> Result<Self, RenderError> {
        config.validate()?;

        let program = ShaderProgram::surface(&gl)?;
        program.use_program(&gl);

        let mesh = sampler::sample(&config.surface)?;
        let mut layers = Vec::new();
        for (family, strips) in mesh.families() {
            let mut model = DrawableModel::new(family.name());
            model.upload(&gl, strips)?;
            layers.push(SurfaceLayer { family, model });
        }

        gl.enable_depth_test();
        info!(
            "renderer ready: {} layers, {} strips",
            layers.len(),
            mesh.strip_count()
        );

        Ok(Self {
            gl,
            program,
            layers,
            config: config.render.clone(),
        })
    }

    /// Draw one frame for the given view matrix
    pub fn render(&self, view: &Matrix4<f32>) {
        let gl = &self.gl;
        gl.clear(&self.config.clear_color);

        let frame = FrameUniforms::compute(&self.config, view);
        self.program.use_program(gl);
        self.program
            .set_model_view_projection(gl, &frame.model_view_projection);

        for layer in &self.layers {
            self.program
                .set_color(gl, &self.config.color_for(layer.family));
            layer.model.draw(gl, self.program.attrib_vertex());
        }
    }

    pub fn layers(&self) -> &[SurfaceLayer<G>] {
        &self.layers
    }

    pub fn context(&self) -> &G {
        &self.gl
    }
}
