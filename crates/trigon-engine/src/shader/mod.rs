//! Shader compilation.
//!
//! WGSL sources are parsed and validated on the CPU (naga) before the wgpu
//! module is created, so a bad shader always produces a [`ShaderError`] carrying
//! the compiler diagnostic instead of a device-level validation panic.

mod compile;
mod error;
mod interface;
mod source;
mod stage;

pub use compile::{compile_shader, CompiledShader, ShaderUnit};
pub use error::{ShaderError, ShaderErrorKind};
pub use interface::StageInterface;
pub use source::ShaderSource;
pub use stage::ShaderStage;
