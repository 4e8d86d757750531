use wgpu::util::DeviceExt;

use crate::render::RenderCtx;

use super::{VertexLayout, VertexList};

/// GPU vertex buffer plus the layout that interprets it.
///
/// The buffer is owned here and destroyed when the array is dropped. Its
/// contents are written once at creation: usage is `VERTEX` plus `COPY_SRC`
/// so the upload can be copied out and checked, never `COPY_DST`.
pub struct VertexArray {
    buffer: wgpu::Buffer,
    layout: VertexLayout,
    vertex_count: u32,
}

impl VertexArray {
    /// Uploads `vertices` and binds them to [`VertexLayout::positions`].
    pub fn new(ctx: &RenderCtx<'_>, vertices: &VertexList) -> Self {
        let buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("trigon vertex buffer"),
                contents: vertices.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_SRC,
            });

        log::debug!(
            "uploaded {} vertices ({} bytes)",
            vertices.vertex_count(),
            buffer.size()
        );

        Self {
            buffer,
            layout: VertexLayout::positions(),
            vertex_count: vertices.vertex_count(),
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        log::debug!("releasing vertex array ({} vertices)", self.vertex_count);
        self.buffer.destroy();
    }
}
