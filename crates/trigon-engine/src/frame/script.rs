use std::fmt;

use super::{ClearValues, DrawCall, FrameCmd, Primitive};

/// Properties of the resources a script will be replayed against.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameBindings {
    /// Primitive the bound program was linked for.
    pub primitive: Primitive,
    /// Vertices available in the bound vertex array.
    pub vertex_count: u32,
}

/// Totals for one validated frame.
///
/// Each draw is bounded by a `u32` vertex count, but a script may hold many
/// of them, so the totals are kept in `u64`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub clears: u64,
    pub draw_calls: u64,
    pub vertices: u64,
    pub primitives: u64,
}

/// A script that cannot be replayed. `index` is the offending command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    DrawWithoutProgram { index: usize },
    DrawWithoutVertexArray { index: usize },
    PrimitiveMismatch {
        index: usize,
        draw: Primitive,
        program: Primitive,
    },
    /// Vertex count is not a whole number of primitives.
    PartialPrimitive { index: usize, vertex_count: u32 },
    OutOfBounds {
        index: usize,
        end: u64,
        available: u32,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::DrawWithoutProgram { index } => {
                write!(f, "command {index}: draw issued with no program bound")
            }
            FrameError::DrawWithoutVertexArray { index } => {
                write!(f, "command {index}: draw issued with no vertex array bound")
            }
            FrameError::PrimitiveMismatch {
                index,
                draw,
                program,
            } => write!(
                f,
                "command {index}: draw of {draw:?} against a program linked for {program:?}"
            ),
            FrameError::PartialPrimitive {
                index,
                vertex_count,
            } => write!(
                f,
                "command {index}: {vertex_count} vertices do not form whole primitives"
            ),
            FrameError::OutOfBounds {
                index,
                end,
                available,
            } => write!(
                f,
                "command {index}: draw reads up to vertex {end} but only {available} are bound"
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// Recorded command list for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameScript {
    cmds: Vec<FrameCmd>,
}

impl FrameScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard frame: clear, bind program, bind vertex array, one draw.
    pub fn single_draw(clear: ClearValues, draw: DrawCall) -> Self {
        let mut script = Self::new();
        script
            .clear(clear)
            .use_program()
            .bind_vertex_array()
            .draw(draw);
        script
    }

    pub fn clear(&mut self, values: ClearValues) -> &mut Self {
        self.cmds.push(FrameCmd::Clear(values));
        self
    }

    pub fn use_program(&mut self) -> &mut Self {
        self.cmds.push(FrameCmd::UseProgram);
        self
    }

    pub fn bind_vertex_array(&mut self) -> &mut Self {
        self.cmds.push(FrameCmd::BindVertexArray);
        self
    }

    pub fn draw(&mut self, call: DrawCall) -> &mut Self {
        self.cmds.push(FrameCmd::Draw(call));
        self
    }

    pub fn commands(&self) -> &[FrameCmd] {
        &self.cmds
    }

    /// Draw calls in recording order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> {
        self.cmds.iter().filter_map(|c| match c {
            FrameCmd::Draw(d) => Some(d),
            _ => None,
        })
    }

    /// Checks the script against the resources it will be replayed with.
    ///
    /// Bindings persist across clears; a draw needs a program and a vertex array
    /// bound earlier in the script.
    pub fn validate(&self, bindings: &FrameBindings) -> Result<FrameStats, FrameError> {
        let mut stats = FrameStats::default();
        let mut program_bound = false;
        let mut vertex_array_bound = false;

        for (index, cmd) in self.cmds.iter().enumerate() {
            match cmd {
                FrameCmd::Clear(_) => stats.clears = stats.clears.saturating_add(1),
                FrameCmd::UseProgram => program_bound = true,
                FrameCmd::BindVertexArray => vertex_array_bound = true,
                FrameCmd::Draw(call) => {
                    if !program_bound {
                        return Err(FrameError::DrawWithoutProgram { index });
                    }
                    if !vertex_array_bound {
                        return Err(FrameError::DrawWithoutVertexArray { index });
                    }
                    if call.primitive != bindings.primitive {
                        return Err(FrameError::PrimitiveMismatch {
                            index,
                            draw: call.primitive,
                            program: bindings.primitive,
                        });
                    }
                    if call.vertex_count % call.primitive.vertices_per_primitive() != 0 {
                        return Err(FrameError::PartialPrimitive {
                            index,
                            vertex_count: call.vertex_count,
                        });
                    }
                    let end = u64::from(call.first_vertex) + u64::from(call.vertex_count);
                    if end > u64::from(bindings.vertex_count) {
                        return Err(FrameError::OutOfBounds {
                            index,
                            end,
                            available: bindings.vertex_count,
                        });
                    }

                    stats.draw_calls = stats.draw_calls.saturating_add(1);
                    stats.vertices = stats.vertices.saturating_add(u64::from(call.vertex_count));
                    stats.primitives = stats
                        .primitives
                        .saturating_add(u64::from(call.primitive_count()));
                }
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexList;

    fn triangle_bindings() -> FrameBindings {
        FrameBindings {
            primitive: Primitive::Triangles,
            vertex_count: VertexList::triangle().vertex_count(),
        }
    }

    fn triangle_frame() -> FrameScript {
        let list = VertexList::triangle();
        FrameScript::single_draw(
            ClearValues::default(),
            DrawCall::new(Primitive::Triangles, list.vertex_count()),
        )
    }

    // ── standard frame ────────────────────────────────────────────────────

    #[test]
    fn triangle_frame_issues_one_triangle_draw_of_three_vertices() {
        let script = triangle_frame();

        let draws: Vec<&DrawCall> = script.draws().collect();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].primitive, Primitive::Triangles);
        assert_eq!(draws[0].vertex_count, 3);
        assert_eq!(draws[0].vertices(), 0..3);

        let stats = script.validate(&triangle_bindings()).unwrap();
        assert_eq!(
            stats,
            FrameStats {
                clears: 1,
                draw_calls: 1,
                vertices: 3,
                primitives: 1,
            }
        );
    }

    #[test]
    fn triangle_frame_command_order() {
        let script = triangle_frame();
        assert!(matches!(
            script.commands(),
            [
                FrameCmd::Clear(_),
                FrameCmd::UseProgram,
                FrameCmd::BindVertexArray,
                FrameCmd::Draw(_)
            ]
        ));
    }

    #[test]
    fn recording_twice_is_identical() {
        let a = triangle_frame();
        let b = triangle_frame();
        assert_eq!(a, b);
        assert_eq!(
            a.validate(&triangle_bindings()),
            b.validate(&triangle_bindings())
        );
    }

    #[test]
    fn triangle_topology_is_triangle_list() {
        assert_eq!(
            Primitive::Triangles.topology(),
            wgpu::PrimitiveTopology::TriangleList
        );
    }

    #[test]
    fn totals_of_large_draws_do_not_wrap() {
        let big = (u32::MAX / 3) * 3;
        let mut script = FrameScript::new();
        script
            .use_program()
            .bind_vertex_array()
            .draw(DrawCall::new(Primitive::Triangles, big))
            .draw(DrawCall::new(Primitive::Triangles, big));

        let bindings = FrameBindings {
            primitive: Primitive::Triangles,
            vertex_count: u32::MAX,
        };
        let stats = script.validate(&bindings).unwrap();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.vertices, 2 * u64::from(big));
        assert_eq!(stats.primitives, 2 * u64::from(big / 3));
    }

    // ── invalid scripts ───────────────────────────────────────────────────

    #[test]
    fn draw_without_program_rejected() {
        let mut script = FrameScript::new();
        script
            .bind_vertex_array()
            .draw(DrawCall::new(Primitive::Triangles, 3));
        assert_eq!(
            script.validate(&triangle_bindings()),
            Err(FrameError::DrawWithoutProgram { index: 1 })
        );
    }

    #[test]
    fn draw_without_vertex_array_rejected() {
        let mut script = FrameScript::new();
        script
            .use_program()
            .draw(DrawCall::new(Primitive::Triangles, 3));
        assert_eq!(
            script.validate(&triangle_bindings()),
            Err(FrameError::DrawWithoutVertexArray { index: 1 })
        );
    }

    #[test]
    fn bindings_survive_a_clear() {
        let mut script = FrameScript::new();
        script
            .use_program()
            .bind_vertex_array()
            .clear(ClearValues::default())
            .draw(DrawCall::new(Primitive::Triangles, 3));
        assert!(script.validate(&triangle_bindings()).is_ok());
    }

    #[test]
    fn primitive_mismatch_rejected() {
        let mut script = FrameScript::new();
        script
            .use_program()
            .bind_vertex_array()
            .draw(DrawCall::new(Primitive::Lines, 2));
        assert!(matches!(
            script.validate(&triangle_bindings()),
            Err(FrameError::PrimitiveMismatch { index: 2, .. })
        ));
    }

    #[test]
    fn partial_triangle_rejected() {
        let mut script = FrameScript::new();
        script
            .use_program()
            .bind_vertex_array()
            .draw(DrawCall::new(Primitive::Triangles, 2));
        assert_eq!(
            script.validate(&triangle_bindings()),
            Err(FrameError::PartialPrimitive {
                index: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn reading_past_the_vertex_array_rejected() {
        let mut script = FrameScript::new();
        script.use_program().bind_vertex_array().draw(DrawCall {
            primitive: Primitive::Triangles,
            first_vertex: 3,
            vertex_count: 3,
        });
        assert_eq!(
            script.validate(&triangle_bindings()),
            Err(FrameError::OutOfBounds {
                index: 2,
                end: 6,
                available: 3
            })
        );
    }

    #[test]
    fn empty_script_is_valid_and_draws_nothing() {
        let stats = FrameScript::new().validate(&triangle_bindings()).unwrap();
        assert_eq!(stats, FrameStats::default());
    }
}
