//! Interleaved vertex buffers and their declared per-vertex format

use super::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How consecutive vertices in a buffer assemble into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveType {
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
}

/// Declared layout of one interleaved vertex record: a position, then the
/// optional normal, texture-coordinate and color groups, in that fixed order.
///
/// The stride is always derived from the flags via [`VertexFormat::stride`],
/// never stored, so it cannot go stale when a flag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexFormat {
    pub primitive: PrimitiveType,
    pub has_normal: bool,
    pub has_tex_coord: bool,
    pub has_color: bool,
}

impl VertexFormat {
    /// Position-only format for the given primitive type
    pub fn new(primitive: PrimitiveType) -> Self {
        Self {
            primitive,
            has_normal: false,
            has_tex_coord: false,
            has_color: false,
        }
    }

    /// Floats per vertex record
    pub fn stride(&self) -> usize {
        let mut stride = 3;
        if self.has_normal {
            stride += 3;
        }
        if self.has_tex_coord {
            stride += 2;
        }
        if self.has_color {
            stride += 4;
        }
        stride
    }
}

/// A flat interleaved float buffer plus the format describing its records.
///
/// The buffer is owned by whoever built it; the rasterizer only borrows it
/// (read-only) for the duration of one draw call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexBuffer {
    pub format: VertexFormat,
    pub data: Vec<f32>,
}

impl Default for VertexFormat {
    fn default() -> Self {
        VertexFormat::new(PrimitiveType::Triangles)
    }
}

impl VertexBuffer {
    pub fn new(format: VertexFormat) -> Self {
        Self {
            format,
            data: Vec::new(),
        }
    }

    /// Number of complete vertex records in the buffer
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.format.stride()
    }

    /// Append one vertex record. Groups the format does not declare are
    /// ignored.
    pub fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2, color: [f32; 4]) {
        self.data.extend_from_slice(&[position.x, position.y, position.z]);
        if self.format.has_normal {
            self.data.extend_from_slice(&[normal.x, normal.y, normal.z]);
        }
        if self.format.has_tex_coord {
            self.data.extend_from_slice(&[uv.x, uv.y]);
        }
        if self.format.has_color {
            self.data.extend_from_slice(&color);
        }
    }

    /// Bounds-checked, vertex-ordinal-indexed view over the records
    pub fn view(&self) -> VertexView<'_> {
        VertexView {
            data: &self.data,
            format: self.format,
        }
    }
}

/// Read-only accessor that addresses the interleaved buffer by vertex
/// ordinal instead of raw float offset. Out-of-range ordinals panic via the
/// underlying slice indexing; they cannot read past the buffer.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    data: &'a [f32],
    format: VertexFormat,
}

impl<'a> VertexView<'a> {
    pub fn format(&self) -> VertexFormat {
        self.format
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.format.stride()
    }

    fn record(&self, index: usize) -> &'a [f32] {
        let stride = self.format.stride();
        let start = index * stride;
        &self.data[start..start + stride]
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let r = self.record(index);
        Vec3::new(r[0], r[1], r[2])
    }

    /// Vertex normal, or zero when the format carries none
    pub fn normal(&self, index: usize) -> Vec3 {
        if !self.format.has_normal {
            return Vec3::ZERO;
        }
        let r = self.record(index);
        Vec3::new(r[3], r[4], r[5])
    }

    /// Texture coordinate, or zero when the format carries none
    pub fn tex_coord(&self, index: usize) -> Vec2 {
        if !self.format.has_tex_coord {
            return Vec2::ZERO;
        }
        let r = self.record(index);
        let offset = if self.format.has_normal { 6 } else { 3 };
        Vec2::new(r[offset], r[offset + 1])
    }

    /// Vertex color as RGBA floats, or zeros when the format carries none
    pub fn color(&self, index: usize) -> [f32; 4] {
        if !self.format.has_color {
            return [0.0; 4];
        }
        let r = self.record(index);
        let mut offset = 3;
        if self.format.has_normal {
            offset += 3;
        }
        if self.format.has_tex_coord {
            offset += 2;
        }
        [r[offset], r[offset + 1], r[offset + 2], r[offset + 3]]
    }
}
