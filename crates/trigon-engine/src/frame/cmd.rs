use std::ops::Range;

/// Rasterized primitive kind, the mode argument of a draw.
///
/// Programs are linked for one kind; the app only draws triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    Triangles,
}

impl Primitive {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Primitive::Points => wgpu::PrimitiveTopology::PointList,
            Primitive::Lines => wgpu::PrimitiveTopology::LineList,
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    pub fn vertices_per_primitive(self) -> u32 {
        match self {
            Primitive::Points => 1,
            Primitive::Lines => 2,
            Primitive::Triangles => 3,
        }
    }
}

/// Values written by a clear.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearValues {
    pub color: wgpu::Color,
    pub depth: f32,
}

impl Default for ClearValues {
    fn default() -> Self {
        Self {
            color: wgpu::Color::BLACK,
            depth: 1.0,
        }
    }
}

/// Non-indexed, non-instanced draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl DrawCall {
    /// Draws `vertex_count` vertices starting at 0.
    pub fn new(primitive: Primitive, vertex_count: u32) -> Self {
        Self {
            primitive,
            first_vertex: 0,
            vertex_count,
        }
    }

    pub fn vertices(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex.saturating_add(self.vertex_count)
    }

    pub fn primitive_count(&self) -> u32 {
        self.vertex_count / self.primitive.vertices_per_primitive()
    }
}

/// One step of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCmd {
    /// Clear color and depth attachments.
    Clear(ClearValues),
    /// Bind the frame's program.
    UseProgram,
    /// Bind the frame's vertex array.
    BindVertexArray,
    Draw(DrawCall),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── primitive ─────────────────────────────────────────────────────────

    #[test]
    fn each_primitive_maps_to_its_list_topology() {
        assert_eq!(Primitive::Points.topology(), wgpu::PrimitiveTopology::PointList);
        assert_eq!(Primitive::Lines.topology(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(
            Primitive::Triangles.topology(),
            wgpu::PrimitiveTopology::TriangleList
        );
    }

    #[test]
    fn vertices_per_primitive() {
        assert_eq!(Primitive::Points.vertices_per_primitive(), 1);
        assert_eq!(Primitive::Lines.vertices_per_primitive(), 2);
        assert_eq!(Primitive::Triangles.vertices_per_primitive(), 3);
    }

    // ── draw call ─────────────────────────────────────────────────────────

    #[test]
    fn primitive_count_follows_the_kind() {
        assert_eq!(DrawCall::new(Primitive::Triangles, 6).primitive_count(), 2);
        assert_eq!(DrawCall::new(Primitive::Lines, 6).primitive_count(), 3);
        assert_eq!(DrawCall::new(Primitive::Points, 6).primitive_count(), 6);
    }

    #[test]
    fn vertex_range_saturates_at_u32_max() {
        let call = DrawCall {
            primitive: Primitive::Points,
            first_vertex: u32::MAX - 1,
            vertex_count: 4,
        };
        assert_eq!(call.vertices(), (u32::MAX - 1)..u32::MAX);
    }

    #[test]
    fn default_clear_is_opaque_black_at_far_depth() {
        let clear = ClearValues::default();
        assert_eq!(clear.color, wgpu::Color::BLACK);
        assert_eq!(clear.depth, 1.0);
    }
}
