//! GPU-resident line strips
use log::debug;

use crate::error::RenderError;
use crate::geometry::LineStrip;
use crate::gpu::GlContext;

/// Floats per vertex: tightly packed `x, y, z`
pub const COMPONENTS_PER_VERTEX: i32 = 3;

/// Draw count for `floats` packed coordinates; must fit a GL `count`
fn strip_vertex_count(floats: usize) -> Result<i32, RenderError> {
    let vertices = floats / COMPONENTS_PER_VERTEX as usize;
    i32::try_from(vertices).map_err(|_| RenderError::StripTooLong(vertices))
}

struct StripBuffer<B> {
    buffer: B,
    vertex_count: i32,
}

/// One vertex buffer per line strip, drawn as `LINE_STRIP`s.
///
/// Buffers are never shared between strips or between models.
pub struct DrawableModel<G: GlContext> {
    name: String,
    strips: Vec<StripBuffer<G::Buffer>>,
}

impl<G: GlContext> DrawableModel<G> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strips: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allocate and fill one buffer per strip, replacing any previous upload.
    pub fn upload(&mut self, gl: &G, strips: &[LineStrip]) -> Result<(), RenderError> {
        let mut uploaded: Vec<StripBuffer<G::Buffer>> = Vec::with_capacity(strips.len());
        for strip in strips {
            let buffer = match gl.create_buffer() {
                Some(buffer) => buffer,
                None => {
                    for partial in &uploaded {
                        gl.delete_buffer(&partial.buffer);
                    }
                    return Err(RenderError::BufferAllocation);
                }
            };
            let coords = strip.flatten();
            let vertex_count = match strip_vertex_count(coords.len()) {
                Ok(count) => count,
                Err(e) => {
                    gl.delete_buffer(&buffer);
                    for partial in &uploaded {
                        gl.delete_buffer(&partial.buffer);
                    }
                    return Err(e);
                }
            };
            gl.upload_vertices(&buffer, &coords);
            uploaded.push(StripBuffer {
                buffer,
                vertex_count,
            });
        }

        self.release(gl);
        self.strips = uploaded;
        debug!(
            "model `{}`: uploaded {} strips, {} vertices",
            self.name,
            self.strips.len(),
            self.vertex_counts().iter().sum::<usize>()
        );
        Ok(())
    }

    /// Issue one `LINE_STRIP` draw per buffer with `attrib` bound to positions
    pub fn draw(&self, gl: &G, attrib: u32) {
        for strip in &self.strips {
            gl.bind_array_buffer(&strip.buffer);
            gl.vertex_attrib_pointer(attrib, COMPONENTS_PER_VERTEX);
            gl.enable_vertex_attrib_array(attrib);
            gl.draw_line_strip(strip.vertex_count);
        }
    }

    pub fn vertex_counts(&self) -> Vec<usize> {
        self.strips
            .iter()
            .map(|strip| strip.vertex_count as usize)
            .collect()
    }

    pub fn is_uploaded(&self) -> bool {
        !self.strips.is_empty()
    }

    fn release(&mut self, gl: &G) {
        for strip in self.strips.drain(..) {
            gl.delete_buffer(&strip.buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{GlCall, RecordingGl};
    use nalgebra::Point3;

    fn strip(points: usize) -> LineStrip {
        LineStrip {
            points: (0..points)
                .map(|i| Point3::new(i as f32, 0.0, 0.0))
                .collect(),
        }
    }

    #[test]
    fn test_vertex_count_matches_uploaded_coordinates() {
        let gl = RecordingGl::new();
        let mut model = DrawableModel::new("test");
        model.upload(&gl, &[strip(101), strip(72), strip(1)]).unwrap();

        assert_eq!(model.vertex_counts(), vec![101, 72, 1]);
        let floats: Vec<usize> = gl
            .calls()
            .iter()
            .filter_map(|call| match call {
                GlCall::BufferData { floats, .. } => Some(*floats),
                _ => None,
            })
            .collect();
        assert_eq!(floats, vec![303, 216, 3]);
    }

    #[test]
    fn test_each_strip_gets_its_own_buffer() {
        let gl = RecordingGl::new();
        let mut model = DrawableModel::new("test");
        model.upload(&gl, &[strip(2), strip(3)]).unwrap();
        gl.clear_calls();

        model.draw(&gl, 0);
        let calls = gl.calls();
        let GlCall::BindBuffer(first) = calls[0] else {
            panic!("expected bind, got {:?}", calls[0]);
        };
        assert_eq!(
            calls,
            vec![
                GlCall::BindBuffer(first),
                GlCall::VertexAttribPointer { index: 0, components: 3 },
                GlCall::EnableVertexAttribArray(0),
                GlCall::DrawLineStrip(2),
                GlCall::BindBuffer(first + 1),
                GlCall::VertexAttribPointer { index: 0, components: 3 },
                GlCall::EnableVertexAttribArray(0),
                GlCall::DrawLineStrip(3),
            ]
        );
    }

    #[test]
    fn test_allocation_failure_propagates() {
        let gl = RecordingGl {
            buffer_limit: Some(1),
            ..RecordingGl::default()
        };
        let mut model = DrawableModel::new("test");
        let err = model.upload(&gl, &[strip(2), strip(2)]).unwrap_err();
        assert!(matches!(err, RenderError::BufferAllocation));
        assert!(!model.is_uploaded());
        assert!(gl.calls().contains(&GlCall::DeleteBuffer(1)));
    }

    #[test]
    fn test_vertex_count_must_fit_draw_count() {
        assert_eq!(strip_vertex_count(303).unwrap(), 101);
        let too_many = (i32::MAX as usize + 1) * 3;
        assert!(matches!(
            strip_vertex_count(too_many),
            Err(RenderError::StripTooLong(n)) if n == i32::MAX as usize + 1
        ));
    }

    #[test]
    fn test_reupload_replaces_buffers() {
        let gl = RecordingGl::new();
        let mut model = DrawableModel::new("test");
        model.upload(&gl, &[strip(4)]).unwrap();
        model.upload(&gl, &[strip(5), strip(6)]).unwrap();
        assert_eq!(model.vertex_counts(), vec![5, 6]);
        assert!(gl.calls().contains(&GlCall::DeleteBuffer(1)));
    }
}
