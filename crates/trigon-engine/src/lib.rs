//! trigon engine crate.
//!
//! Owns the platform + GPU runtime pieces: window and context bootstrap, shader
//! compilation, program linking, vertex arrays and the per-frame command
//! scripts that draw them.

pub mod core;
pub mod device;
pub mod frame;
pub mod logging;
pub mod mesh;
pub mod program;
pub mod render;
pub mod shader;
pub mod window;
