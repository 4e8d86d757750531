//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue from a [`GpuInit`] request
//! - creating & configuring the Surface (swapchain) and its depth target
//! - acquiring frames and presenting them
//! - pinning the context to the thread that created it

mod affinity;
mod depth;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use affinity::OwnerThread;
pub use depth::{DepthTarget, DEPTH_FORMAT};
pub use error::{AcquireError, ContextError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::{GpuInit, VSync};
