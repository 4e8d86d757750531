use anyhow::{Context, Result};

use trigon_engine::core::{App, AppControl, FrameCtx};
use trigon_engine::device::Gpu;
use trigon_engine::frame::{DrawCall, FrameScript, Primitive};
use trigon_engine::mesh::VertexArray;
use trigon_engine::program::{Program, ProgramBuilder};
use trigon_engine::render::execute_script;
use trigon_engine::shader::{compile_shader, ShaderStage};

use crate::config::SceneConfig;

/// GPU resources created once at startup.
struct Resources {
    program: Program,
    vertex_array: VertexArray,
}

/// Draws the configured vertex list as triangles every frame.
pub struct TriangleApp {
    scene: SceneConfig,
    resources: Option<Resources>,
}

impl TriangleApp {
    pub fn new(scene: SceneConfig) -> Self {
        Self {
            scene,
            resources: None,
        }
    }

    /// Commands for one frame: clear, bind, draw every vertex.
    pub fn record_frame(&self) -> FrameScript {
        FrameScript::single_draw(
            self.scene.clear,
            DrawCall::new(Primitive::Triangles, self.scene.vertices.vertex_count()),
        )
    }
}

impl App for TriangleApp {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let ctx = gpu.render_ctx()?;

        let vertex = compile_shader(&ctx, ShaderStage::Vertex, &self.scene.vertex_shader)?;
        let fragment = compile_shader(&ctx, ShaderStage::Fragment, &self.scene.fragment_shader)?;

        let vertex_array = VertexArray::new(&ctx, &self.scene.vertices);

        let program = ProgramBuilder::new("triangle")
            .attach(&vertex)
            .attach(&fragment)
            .link(&ctx, vertex_array.layout())
            .context("failed to link triangle program")?;

        log::info!(
            "ready: {} vertices, present mode {:?}",
            vertex_array.vertex_count(),
            gpu.present_mode()
        );

        self.resources = Some(Resources {
            program,
            vertex_array,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(res) = self.resources.as_ref() else {
            log::error!("frame requested before setup");
            return AppControl::Exit;
        };

        let script = self.record_frame();
        let control = ctx.render(|target| {
            execute_script(target, &script, &res.program, &res.vertex_array)?;
            Ok(())
        });

        if ctx.frame_index == 0 && ctx.presented() {
            log::debug!("first frame presented");
        }

        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigon_engine::frame::{FrameBindings, FrameCmd};
    use trigon_engine::mesh::VertexLayout;
    use trigon_engine::program::check_link;
    use trigon_engine::shader::ShaderUnit;

    fn app() -> TriangleApp {
        TriangleApp::new(SceneConfig::default())
    }

    #[test]
    fn embedded_shaders_compile_and_link() {
        let scene = SceneConfig::default();
        let vs = ShaderUnit::parse(ShaderStage::Vertex, &scene.vertex_shader).unwrap();
        let fs = ShaderUnit::parse(ShaderStage::Fragment, &scene.fragment_shader).unwrap();

        let attrs: Vec<u32> = VertexLayout::positions().locations().collect();
        assert_eq!(check_link(vs.interface(), fs.interface(), &attrs), Ok(()));
    }

    #[test]
    fn frame_draws_one_triangle() {
        let script = app().record_frame();
        let draws: Vec<_> = script.draws().collect();

        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].primitive, Primitive::Triangles);
        assert_eq!(draws[0].vertex_count, 3);
        assert!(matches!(script.commands().first(), Some(FrameCmd::Clear(_))));
    }

    #[test]
    fn consecutive_frames_are_identical() {
        let app = app();
        let bindings = FrameBindings {
            primitive: Primitive::Triangles,
            vertex_count: 3,
        };

        let first = app.record_frame();
        let second = app.record_frame();
        assert_eq!(first, second);
        assert_eq!(
            first.validate(&bindings).unwrap(),
            second.validate(&bindings).unwrap()
        );
    }
}
