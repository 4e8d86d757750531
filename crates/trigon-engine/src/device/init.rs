/// Vertical synchronization request.
///
/// Presentation pacing is always chosen explicitly instead of relying on a
/// platform default.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VSync {
    /// Present on vertical blank (FIFO). Supported everywhere.
    #[default]
    On,
    /// Present as soon as possible; tearing allowed where the platform has it.
    Off,
}

impl VSync {
    /// Present mode requested from the surface.
    pub fn present_mode(self) -> wgpu::PresentMode {
        match self {
            VSync::On => wgpu::PresentMode::Fifo,
            VSync::Off => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

/// Initialization parameters for the GPU layer.
///
/// This is the context request: which backends may be used, which adapter class
/// is preferred, and the exact feature set and limits the device must provide.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may pick from.
    pub backends: wgpu::Backends,

    /// Adapter preference.
    pub power_preference: wgpu::PowerPreference,

    /// Presentation pacing.
    pub vsync: VSync,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features. Empty keeps every backend eligible.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// Downlevel defaults keep GL-class adapters eligible.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            vsync: VSync::On,
            prefer_srgb: true,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_maps_to_explicit_present_modes() {
        assert_eq!(VSync::On.present_mode(), wgpu::PresentMode::Fifo);
        assert_eq!(VSync::Off.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn default_request_is_portable() {
        let init = GpuInit::default();
        assert_eq!(init.vsync, VSync::On);
        assert!(init.required_features.is_empty());
        assert_eq!(init.backends, wgpu::Backends::all());
    }
}
