//! Program linking: a vertex and a fragment shader joined into one render
//! pipeline.

mod error;
mod link;

pub use error::LinkError;
pub use link::{check_link, Program, ProgramBuilder};
