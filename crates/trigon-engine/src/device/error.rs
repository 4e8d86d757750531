use std::fmt;
use std::thread::ThreadId;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate.
    Fatal,
}

/// Misuse of the GPU context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A context operation was issued from a thread other than the one that
    /// created the context.
    WrongThread { owner: ThreadId, caller: ThreadId },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::WrongThread { owner, caller } => write!(
                f,
                "GPU context owned by thread {owner:?} used from thread {caller:?}"
            ),
        }
    }
}

impl std::error::Error for ContextError {}

/// Failure to acquire the next frame.
#[derive(Debug)]
pub enum AcquireError {
    Context(ContextError),
    Surface(wgpu::SurfaceError),
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::Context(e) => write!(f, "{e}"),
            AcquireError::Surface(e) => write!(f, "failed to acquire surface texture: {e}"),
        }
    }
}

impl std::error::Error for AcquireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcquireError::Context(e) => Some(e),
            AcquireError::Surface(e) => Some(e),
        }
    }
}

impl From<ContextError> for AcquireError {
    fn from(e: ContextError) -> Self {
        AcquireError::Context(e)
    }
}

impl From<wgpu::SurfaceError> for AcquireError {
    fn from(e: wgpu::SurfaceError) -> Self {
        AcquireError::Surface(e)
    }
}
