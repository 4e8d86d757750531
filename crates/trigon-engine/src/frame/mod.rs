//! Per-frame command scripts.
//!
//! A frame is recorded as a short, renderer-agnostic list of commands
//! (clear, bind program, bind vertex array, draw) and validated before the
//! renderer replays it on the GPU.

mod cmd;
mod script;

pub use cmd::{ClearValues, DrawCall, FrameCmd, Primitive};
pub use script::{FrameBindings, FrameError, FrameScript, FrameStats};
