use std::fmt;

use crate::shader::ShaderStage;

/// Why a program failed to link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// No shader attached for the stage.
    MissingStage(ShaderStage),
    /// Two shaders attached for the same stage.
    DuplicateStage(ShaderStage),
    /// The vertex stage reads a location the vertex layout does not provide.
    UnboundAttribute { location: u32 },
    /// The fragment stage reads a location the vertex stage never writes.
    UnmatchedVarying { location: u32 },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::MissingStage(stage) => write!(f, "no {stage} shader attached"),
            LinkError::DuplicateStage(stage) => {
                write!(f, "more than one {stage} shader attached")
            }
            LinkError::UnboundAttribute { location } => write!(
                f,
                "vertex shader input @location({location}) has no matching vertex attribute"
            ),
            LinkError::UnmatchedVarying { location } => write!(
                f,
                "fragment shader input @location({location}) is not written by the vertex shader"
            ),
        }
    }
}

impl std::error::Error for LinkError {}
