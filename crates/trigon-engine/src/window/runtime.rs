use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            size: LogicalSize::new(500.0, 500.0),
            resizable: false,
        }
    }
}

/// Entry point for the runtime.
///
/// Runs on the calling thread, which must be the main thread on most platforms
/// and becomes the owner of the GPU context.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and the app, and runs frames until
    /// the window is closed.
    ///
    /// Returns the first fatal error (window/context creation, app init, or an
    /// unrecoverable frame failure).
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.fatal.take() {
            return Err(err);
        }

        log::info!("window closed after {} frames", state.frames_presented);
        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    frames_presented: u64,
    started: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            fatal: None,
            frames_presented: 0,
            started: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntry::try_new(window, |w| pollster::block_on(Gpu::new(w, gpu_init)))
            .context("GPU initialization failed")?;

        entry
            .with_gpu(|gpu| self.app.init(gpu))
            .context("application setup failed")?;

        Ok(entry)
    }

    /// Records a fatal error and stops the loop. GPU resources are dropped
    /// before the event loop returns.
    ///
    /// The error is not logged here; `run` returns it and the caller reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        keep_first(&mut self.fatal, err);
        self.entry = None;
        event_loop.exit();
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.entry = None;
        event_loop.exit();
    }
}

/// Stores `err` unless an earlier fatal error is already pending.
fn keep_first(slot: &mut Option<anyhow::Error>, err: anyhow::Error) {
    if let Some(first) = slot.as_ref() {
        log::debug!("after `{first}`, also: {err:#}");
        return;
    }
    *slot = Some(err);
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };

        // Render continuously; events are pumped between frames.
        event_loop.set_control_flow(ControlFlow::Poll);
        entry.with_window(|w| w.request_redraw());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.entry.is_none() {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.close(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.close(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                let resized = self
                    .entry
                    .as_mut()
                    .map(|entry| entry.with_gpu_mut(|gpu| gpu.resize(*new_size)));
                if let Some(Err(e)) = resized {
                    self.fail(event_loop, e.into());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let resized = self.entry.as_mut().map(|entry| {
                    let size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(size))
                });
                if let Some(Err(e)) = resized {
                    self.fail(event_loop, e.into());
                }
            }

            WindowEvent::RedrawRequested => {
                // Split borrows to avoid `self` capture inside `ouroboros` closures.
                let (app, entry) = (&mut self.app, &mut self.entry);
                let Some(entry) = entry.as_mut() else { return };

                let frame_index = self.frames_presented;
                let (control, presented) = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx::new(fields.window, fields.gpu, frame_index);
                    let control = app.on_frame(&mut ctx);
                    (control, ctx.presented())
                });

                if presented {
                    self.frames_presented += 1;
                }

                if control == AppControl::Exit {
                    self.fail(
                        event_loop,
                        anyhow::anyhow!("frame {frame_index} could not be rendered"),
                    );
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── fatal errors ──────────────────────────────────────────────────────

    #[test]
    fn first_fatal_error_is_the_one_returned() {
        let mut slot = None;
        keep_first(&mut slot, anyhow::anyhow!("failed to create window"));
        keep_first(&mut slot, anyhow::anyhow!("frame 0 could not be rendered"));

        let err = slot.unwrap();
        assert_eq!(err.to_string(), "failed to create window");
    }

    #[test]
    fn error_context_survives_to_the_caller() {
        let mut slot = None;
        let err = Err::<(), _>(anyhow::anyhow!("no adapter"))
            .context("GPU initialization failed")
            .unwrap_err();
        keep_first(&mut slot, err);

        let err = slot.unwrap();
        assert_eq!(format!("{err:#}"), "GPU initialization failed: no adapter");
    }

    #[test]
    fn default_window_is_fixed_size() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.size, LogicalSize::new(500.0, 500.0));
        assert!(!cfg.resizable);
    }
}
