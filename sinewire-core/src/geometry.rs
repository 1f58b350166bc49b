//! Geometry primitives for wireframe rendering
use nalgebra::Point3;

/// Which family of curves a strip belongs to; selects its draw color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripFamily {
    /// The single ribbon strip produced in combined mode
    Surface,
    /// Constant-angle curves
    ULines,
    /// Constant-height curves
    VLines,
}

impl StripFamily {
    pub fn name(&self) -> &'static str {
        match self {
            StripFamily::Surface => "surface",
            StripFamily::ULines => "u-lines",
            StripFamily::VLines => "v-lines",
        }
    }
}

/// An ordered run of points drawn as connected segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStrip {
    pub points: Vec<Point3<f32>>,
}

impl LineStrip {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point3<f32>) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pack the points as tightly interleaved `x, y, z` floats for upload
    pub fn flatten(&self) -> Vec<f32> {
        let mut coords = Vec::with_capacity(self.points.len() * 3);
        for point in &self.points {
            coords.extend_from_slice(&[point.x, point.y, point.z]);
        }
        coords
    }
}

/// The sampled wireframe, in one of the two generation layouts
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMesh {
    Combined(LineStrip),
    Decomposed {
        u_lines: Vec<LineStrip>,
        v_lines: Vec<LineStrip>,
    },
}

impl SurfaceMesh {
    /// Strip families in draw order: U-lines before V-lines.
    pub fn families(&self) -> Vec<(StripFamily, &[LineStrip])> {
        match self {
            SurfaceMesh::Combined(strip) => {
                vec![(StripFamily::Surface, std::slice::from_ref(strip))]
            }
            SurfaceMesh::Decomposed { u_lines, v_lines } => vec![
                (StripFamily::ULines, u_lines.as_slice()),
                (StripFamily::VLines, v_lines.as_slice()),
            ],
        }
    }

    pub fn strip_count(&self) -> usize {
        self.families().iter().map(|(_, strips)| strips.len()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.families()
            .iter()
            .flat_map(|(_, strips)| strips.iter())
            .map(LineStrip::len)
            .sum()
    }

    /// Iterate over every point of every strip
    pub fn points(&self) -> impl Iterator<Item = &Point3<f32>> + '_ {
        let strips: Vec<&LineStrip> = match self {
            SurfaceMesh::Combined(strip) => vec![strip],
            SurfaceMesh::Decomposed { u_lines, v_lines } => {
                u_lines.iter().chain(v_lines.iter()).collect()
            }
        };
        strips.into_iter().flat_map(|strip| strip.points.iter())
    }
}
