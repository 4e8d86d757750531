use crate::frame::Primitive;
use crate::mesh::VertexLayout;
use crate::render::RenderCtx;
use crate::shader::{CompiledShader, ShaderStage, StageInterface};

use super::LinkError;

/// Checks that the stage interfaces fit together.
///
/// - every vertex input location is fed by the vertex layout
/// - every fragment input location is written by the vertex stage
pub fn check_link(
    vertex: &StageInterface,
    fragment: &StageInterface,
    attributes: &[u32],
) -> Result<(), LinkError> {
    if let Some(&location) = vertex
        .inputs()
        .iter()
        .find(|loc| !attributes.contains(*loc))
    {
        return Err(LinkError::UnboundAttribute { location });
    }

    if let Some(&location) = fragment
        .inputs()
        .iter()
        .find(|loc| !vertex.outputs().contains(*loc))
    {
        return Err(LinkError::UnmatchedVarying { location });
    }

    Ok(())
}

/// Collects shader stages for linking.
///
/// ```ignore
/// let program = ProgramBuilder::new("triangle")
///     .attach(&vertex)
///     .attach(&fragment)
///     .link(&ctx, vertex_array.layout())?;
/// ```
pub struct ProgramBuilder<'s> {
    label: String,
    primitive: Primitive,
    vertex: Option<&'s CompiledShader>,
    fragment: Option<&'s CompiledShader>,
    duplicate: Option<ShaderStage>,
}

impl<'s> ProgramBuilder<'s> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            primitive: Primitive::Triangles,
            vertex: None,
            fragment: None,
            duplicate: None,
        }
    }

    /// Primitive the program rasterizes. Defaults to triangles.
    pub fn primitive(mut self, primitive: Primitive) -> Self {
        self.primitive = primitive;
        self
    }

    /// Attaches a compiled shader to the slot of its stage.
    pub fn attach(mut self, shader: &'s CompiledShader) -> Self {
        let slot = match shader.stage() {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        };

        if slot.is_some() && self.duplicate.is_none() {
            self.duplicate = Some(shader.stage());
        }
        *slot = Some(shader);
        self
    }

    /// Returns the attached (vertex, fragment) pair, or why there is none.
    pub fn resolve(&self) -> Result<(&'s CompiledShader, &'s CompiledShader), LinkError> {
        if let Some(stage) = self.duplicate {
            return Err(LinkError::DuplicateStage(stage));
        }
        let vertex = self.vertex.ok_or(LinkError::MissingStage(ShaderStage::Vertex))?;
        let fragment = self
            .fragment
            .ok_or(LinkError::MissingStage(ShaderStage::Fragment))?;
        Ok((vertex, fragment))
    }

    /// Links the attached stages against `layout` for the context's color format.
    ///
    /// All link checks run before anything is created on the device; a program
    /// with zero attached shaders fails with [`LinkError::MissingStage`].
    pub fn link(self, ctx: &RenderCtx<'_>, layout: &VertexLayout) -> Result<Program, LinkError> {
        let (vertex, fragment) = self.resolve()?;

        let attributes: Vec<u32> = layout.locations().collect();
        check_link(
            vertex.unit().interface(),
            fragment.unit().interface(),
            &attributes,
        )?;

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(self.label.as_str()),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(self.label.as_str()),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: vertex.module(),
                    entry_point: Some(vertex.unit().entry_point()),
                    compilation_options: Default::default(),
                    buffers: &[layout.buffer_layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: fragment.module(),
                    entry_point: Some(fragment.unit().entry_point()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.color_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: self.primitive.topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        log::debug!(
            "linked program `{}` ({} `{}` + {} `{}`)",
            self.label,
            vertex.stage(),
            vertex.unit().label(),
            fragment.stage(),
            fragment.unit().label()
        );

        Ok(Program {
            label: self.label,
            primitive: self.primitive,
            color_format: ctx.color_format,
            pipeline,
        })
    }
}

/// A linked, drawable program.
///
/// Only [`ProgramBuilder::link`] creates one, so holding a `Program` means both
/// stages compiled and the link checks passed.
pub struct Program {
    label: String,
    primitive: Primitive,
    color_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
}

impl Program {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Color format the program renders into.
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        log::debug!("releasing program `{}`", self.label);
    }
}
