use anyhow::Result;
use winit::window::Window;

use crate::device::{AcquireError, Gpu, SurfaceErrorAction};
use crate::render::RenderTarget;

use super::app::AppControl;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    /// Index of this frame, counting from 0.
    pub frame_index: u64,
    presented: bool,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub(crate) fn new(window: &'a Window, gpu: &'a mut Gpu<'w>, frame_index: u64) -> Self {
        Self {
            window,
            gpu,
            frame_index,
            presented: false,
        }
    }

    /// Whether [`render`](Self::render) presented a frame.
    pub fn presented(&self) -> bool {
        self.presented
    }

    /// Acquires the next surface texture, lets `draw` record into it, then
    /// submits and presents.
    ///
    /// Surface loss is handled here (reconfigure or skip); only unrecoverable
    /// conditions and errors from `draw` return [`AppControl::Exit`].
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut RenderTarget<'_>) -> Result<()>,
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(AcquireError::Surface(err)) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
            Err(err @ AcquireError::Context(_)) => {
                log::error!("{err}");
                return AppControl::Exit;
            }
        };

        // RenderTarget borrows frame.encoder; dropped before present() takes frame.
        {
            let mut target =
                RenderTarget::new(&mut frame.encoder, &frame.view, self.gpu.depth_view());
            if let Err(e) = draw(&mut target) {
                log::error!("frame {} failed: {e:#}", self.frame_index);
                return AppControl::Exit;
            }
        }

        self.window.pre_present_notify();
        if let Err(e) = self.gpu.present(frame) {
            log::error!("{e}");
            return AppControl::Exit;
        }

        self.presented = true;
        AppControl::Continue
    }
}
