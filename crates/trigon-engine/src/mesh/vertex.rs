use std::fmt;

/// Floats per vertex (x, y, z).
pub const COMPONENTS_PER_VERTEX: usize = 3;

/// One triangle in normalized device coordinates: top, bottom-left, bottom-right.
pub const TRIANGLE: [f32; 9] = [
    0.0, 0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0,
];

/// Invalid vertex data.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexError {
    Empty,
    /// Length is not a whole number of vertices.
    Ragged { len: usize },
    /// A component is not a finite value in `[-1, 1]`.
    OutOfRange { index: usize, value: f32 },
    TooManyVertices { count: usize },
}

impl fmt::Display for VertexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexError::Empty => write!(f, "vertex list is empty"),
            VertexError::Ragged { len } => write!(
                f,
                "vertex list has {len} floats, not a multiple of {COMPONENTS_PER_VERTEX}"
            ),
            VertexError::OutOfRange { index, value } => write!(
                f,
                "component {index} = {value} lies outside normalized device coordinates [-1, 1]"
            ),
            VertexError::TooManyVertices { count } => {
                write!(f, "{count} vertices exceed the drawable range")
            }
        }
    }
}

impl std::error::Error for VertexError {}

/// Immutable list of 3D positions, stored flat as `x, y, z, x, y, z, ...`.
///
/// Invariants: non-empty, a whole number of vertices, every component finite
/// and inside `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexList {
    components: Vec<f32>,
}

impl VertexList {
    pub fn new(components: impl Into<Vec<f32>>) -> Result<Self, VertexError> {
        let components = components.into();

        if components.is_empty() {
            return Err(VertexError::Empty);
        }
        if components.len() % COMPONENTS_PER_VERTEX != 0 {
            return Err(VertexError::Ragged {
                len: components.len(),
            });
        }
        // `contains` is false for NaN, so non-finite values are rejected too.
        if let Some((index, &value)) = components
            .iter()
            .enumerate()
            .find(|(_, v)| !(-1.0..=1.0).contains(*v))
        {
            return Err(VertexError::OutOfRange { index, value });
        }

        let count = components.len() / COMPONENTS_PER_VERTEX;
        if u32::try_from(count).is_err() {
            return Err(VertexError::TooManyVertices { count });
        }

        Ok(Self { components })
    }

    /// The single triangle drawn by the application.
    pub fn triangle() -> Self {
        Self {
            components: TRIANGLE.to_vec(),
        }
    }

    #[inline]
    pub fn components(&self) -> &[f32] {
        &self.components
    }

    /// Components grouped per vertex.
    pub fn positions(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(&self.components)
    }

    /// Number of vertices (`components().len() / 3`).
    pub fn vertex_count(&self) -> u32 {
        // Bounded by the check in `new`.
        (self.components.len() / COMPONENTS_PER_VERTEX) as u32
    }

    /// Byte-exact view of the components, as uploaded to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_three_vertices() {
        let list = VertexList::triangle();
        assert_eq!(list.components().len(), 9);
        assert_eq!(list.vertex_count(), 3);
        assert_eq!(
            list.positions(),
            &[[0.0, 0.5, 0.0], [-0.5, -0.5, 0.0], [0.5, -0.5, 0.0]]
        );
    }

    #[test]
    fn vertex_count_is_len_over_three() {
        let list = VertexList::new(vec![0.0; 18]).unwrap();
        assert_eq!(list.vertex_count(), 6);
    }

    #[test]
    fn upload_bytes_read_back_exactly() {
        let list = VertexList::new(TRIANGLE).unwrap();
        let bytes = list.as_bytes();
        assert_eq!(bytes.len(), TRIANGLE.len() * std::mem::size_of::<f32>());

        // Reinterpret through an aligned copy, as a mapped read-back would.
        let read_back: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(read_back, TRIANGLE);
        for (a, b) in read_back.iter().zip(TRIANGLE.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn negative_zero_survives_upload() {
        let list = VertexList::new([-0.0, 0.0, 0.0]).unwrap();
        let first = f32::from_ne_bytes(list.as_bytes()[..4].try_into().unwrap());
        assert_eq!(first.to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(VertexList::new(Vec::new()), Err(VertexError::Empty));
    }

    #[test]
    fn ragged_rejected() {
        assert_eq!(
            VertexList::new([0.0, 0.0, 0.0, 0.5]),
            Err(VertexError::Ragged { len: 4 })
        );
    }

    #[test]
    fn out_of_range_rejected() {
        let err = VertexList::new([0.0, 1.5, 0.0]).unwrap_err();
        assert_eq!(err, VertexError::OutOfRange { index: 1, value: 1.5 });
    }

    #[test]
    fn nan_rejected() {
        let err = VertexList::new([0.0, 0.0, f32::NAN]).unwrap_err();
        assert!(matches!(err, VertexError::OutOfRange { index: 2, .. }));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(VertexList::new([-1.0, 1.0, 0.0]).is_ok());
    }
}
