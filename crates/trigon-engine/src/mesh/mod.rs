//! Vertex data, its layout description, and the GPU-resident vertex array that
//! ties the two together.

mod array;
mod layout;
mod vertex;

pub use array::VertexArray;
pub use layout::VertexLayout;
pub use vertex::{VertexError, VertexList, COMPONENTS_PER_VERTEX, TRIANGLE};
