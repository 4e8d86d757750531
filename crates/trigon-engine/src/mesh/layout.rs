/// Describes how vertex buffer bytes map to shader inputs.
///
/// The only layout in use is [`VertexLayout::positions`]: attribute slot 0,
/// three tightly packed `f32` per vertex, no normalization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    stride: wgpu::BufferAddress,
    attributes: &'static [wgpu::VertexAttribute],
}

impl VertexLayout {
    const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Slot 0 = `vec3<f32>` position, stride 12, offset 0.
    pub const fn positions() -> Self {
        Self {
            stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            attributes: &Self::POSITION_ATTRS,
        }
    }

    pub fn stride(&self) -> wgpu::BufferAddress {
        self.stride
    }

    pub fn attributes(&self) -> &'static [wgpu::VertexAttribute] {
        self.attributes
    }

    /// Shader locations fed by this layout.
    pub fn locations(&self) -> impl Iterator<Item = u32> + '_ {
        self.attributes.iter().map(|a| a.shader_location)
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_layout_is_tightly_packed_slot_zero() {
        let layout = VertexLayout::positions();
        assert_eq!(layout.stride(), 12);

        let [attr] = layout.attributes() else {
            panic!("expected exactly one attribute");
        };
        assert_eq!(attr.shader_location, 0);
        assert_eq!(attr.offset, 0);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attr.format.size(), layout.stride());
    }

    #[test]
    fn buffer_layout_steps_per_vertex() {
        let bl = VertexLayout::positions().buffer_layout();
        assert_eq!(bl.array_stride, 12);
        assert_eq!(bl.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(bl.attributes.len(), 1);
    }

    #[test]
    fn locations_lists_slot_zero() {
        let locs: Vec<u32> = VertexLayout::positions().locations().collect();
        assert_eq!(locs, vec![0]);
    }
}
