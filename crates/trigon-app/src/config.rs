use trigon_engine::device::{GpuInit, VSync};
use trigon_engine::frame::ClearValues;
use trigon_engine::logging::LoggingConfig;
use trigon_engine::mesh::VertexList;
use trigon_engine::shader::ShaderSource;
use trigon_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

pub const WIDTH: f64 = 500.0;
pub const HEIGHT: f64 = 500.0;
pub const TITLE: &str = "Conway's Game of Life";

pub const VERTEX_SHADER: ShaderSource =
    ShaderSource::from_static("triangle.vert", include_str!("shaders/triangle.vert.wgsl"));
pub const FRAGMENT_SHADER: ShaderSource =
    ShaderSource::from_static("triangle.frag", include_str!("shaders/triangle.frag.wgsl"));

/// Everything the program needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub window: RuntimeConfig,
    pub gpu: GpuInit,
    pub scene: SceneConfig,
}

/// What gets drawn.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub clear: ClearValues,
    pub vertices: VertexList,
    pub vertex_shader: ShaderSource,
    pub fragment_shader: ShaderSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            window: RuntimeConfig {
                title: TITLE.to_string(),
                size: LogicalSize::new(WIDTH, HEIGHT),
                resizable: false,
            },
            gpu: GpuInit {
                vsync: VSync::On,
                ..GpuInit::default()
            },
            scene: SceneConfig::default(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear: ClearValues::default(),
            vertices: VertexList::triangle(),
            vertex_shader: VERTEX_SHADER,
            fragment_shader: FRAGMENT_SHADER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_fixed_500_square() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.window.title, "Conway's Game of Life");
        assert_eq!(cfg.window.size, LogicalSize::new(500.0, 500.0));
        assert!(!cfg.window.resizable);
    }

    #[test]
    fn vsync_is_explicit() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.gpu.vsync, VSync::On);
        assert_eq!(cfg.gpu.vsync.present_mode(), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn scene_is_the_single_triangle() {
        let scene = SceneConfig::default();
        assert_eq!(scene.vertices.vertex_count(), 3);
        assert_eq!(scene.clear.depth, 1.0);
        assert_eq!(scene.clear.color, wgpu::Color::BLACK);
    }
}
