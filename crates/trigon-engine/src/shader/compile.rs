use crate::render::RenderCtx;

use super::{ShaderError, ShaderErrorKind, ShaderSource, ShaderStage, StageInterface};

/// A shader that parsed, validated, and exposes exactly one entry point for its
/// stage. No GPU objects are involved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderUnit {
    stage: ShaderStage,
    source: ShaderSource,
    entry_point: String,
    interface: StageInterface,
}

impl ShaderUnit {
    /// Parses and validates `source` as a `stage` shader.
    pub fn parse(stage: ShaderStage, source: &ShaderSource) -> Result<Self, ShaderError> {
        let text = source.text();
        let fail = |kind, log: String| ShaderError::new(stage, source.label(), kind, log, text);

        let module = naga::front::wgsl::parse_str(text)
            .map_err(|e| fail(ShaderErrorKind::Parse, e.emit_to_string(text)))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        validator
            .validate(&module)
            .map_err(|e| fail(ShaderErrorKind::Validation, e.emit_to_string(text)))?;

        let mut candidates = module
            .entry_points
            .iter()
            .filter(|ep| ep.stage == stage.naga());

        let Some(ep) = candidates.next() else {
            let found: Vec<String> = module
                .entry_points
                .iter()
                .map(|ep| format!("{:?} `{}`", ep.stage, ep.name))
                .collect();
            let found = if found.is_empty() {
                "none".to_string()
            } else {
                found.join(", ")
            };
            return Err(fail(
                ShaderErrorKind::MissingEntryPoint,
                format!("no @{stage} entry point (entry points found: {found})"),
            ));
        };

        if let Some(extra) = candidates.next() {
            return Err(fail(
                ShaderErrorKind::AmbiguousEntryPoint,
                format!(
                    "more than one @{stage} entry point: `{}`, `{}`",
                    ep.name, extra.name
                ),
            ));
        }

        Ok(Self {
            stage,
            source: source.clone(),
            entry_point: ep.name.clone(),
            interface: StageInterface::from_entry_point(&module, ep),
        })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn label(&self) -> &str {
        self.source.label()
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn interface(&self) -> &StageInterface {
        &self.interface
    }
}

/// A shader unit uploaded to the device.
pub struct CompiledShader {
    unit: ShaderUnit,
    module: wgpu::ShaderModule,
}

impl CompiledShader {
    pub fn unit(&self) -> &ShaderUnit {
        &self.unit
    }

    pub fn stage(&self) -> ShaderStage {
        self.unit.stage
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}

/// Compiles `source` for `stage`.
///
/// Parse and validation failures come back as [`ShaderError`] with the
/// compiler log attached; nothing reaches the device unless the source is valid.
pub fn compile_shader(
    ctx: &RenderCtx<'_>,
    stage: ShaderStage,
    source: &ShaderSource,
) -> Result<CompiledShader, ShaderError> {
    let unit = ShaderUnit::parse(stage, source)?;

    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(source.label()),
        source: wgpu::ShaderSource::Wgsl(source.text().into()),
    });

    log::debug!(
        "compiled {stage} shader `{}` (entry point `{}`)",
        unit.label(),
        unit.entry_point()
    );

    Ok(CompiledShader { unit, module })
}
