//! GPU rendering.
//!
//! Resource creation goes through [`RenderCtx`]; frame recording goes through
//! [`RenderTarget`]. [`execute_script`] replays a validated
//! [`FrameScript`](crate::frame::FrameScript) on a target.

mod ctx;
mod execute;

pub use ctx::{RenderCtx, RenderTarget};
pub use execute::execute_script;
