use crate::frame::{ClearValues, FrameBindings, FrameCmd, FrameError, FrameScript, FrameStats};
use crate::mesh::VertexArray;
use crate::program::Program;

use super::RenderTarget;

/// Replays `script` on `target` with `program` and `vertex_array` as the bound
/// resources.
///
/// The script is validated first; nothing is recorded for an invalid script.
/// Each clear becomes its own pass (color + depth); the commands between clears
/// are recorded into one draw pass that re-applies the current bindings.
pub fn execute_script(
    target: &mut RenderTarget<'_>,
    script: &FrameScript,
    program: &Program,
    vertex_array: &VertexArray,
) -> Result<FrameStats, FrameError> {
    let stats = script.validate(&FrameBindings {
        primitive: program.primitive(),
        vertex_count: vertex_array.vertex_count(),
    })?;

    let mut bound = Bound::default();
    let mut segment: Vec<&FrameCmd> = Vec::new();

    for cmd in script.commands() {
        match cmd {
            FrameCmd::Clear(values) => {
                record_draw_pass(target, &segment, &mut bound, program, vertex_array);
                segment.clear();
                record_clear_pass(target, values);
            }
            other => segment.push(other),
        }
    }
    record_draw_pass(target, &segment, &mut bound, program, vertex_array);

    Ok(stats)
}

#[derive(Default)]
struct Bound {
    program: bool,
    vertex_array: bool,
}

fn record_clear_pass(target: &mut RenderTarget<'_>, values: &ClearValues) {
    let _rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("trigon clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(values.color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: target.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(values.depth),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}

fn record_draw_pass(
    target: &mut RenderTarget<'_>,
    segment: &[&FrameCmd],
    bound: &mut Bound,
    program: &Program,
    vertex_array: &VertexArray,
) {
    let has_draw = segment.iter().any(|c| matches!(c, FrameCmd::Draw(_)));
    if !has_draw {
        // Bindings still count for later segments.
        for cmd in segment {
            match cmd {
                FrameCmd::UseProgram => bound.program = true,
                FrameCmd::BindVertexArray => bound.vertex_array = true,
                _ => {}
            }
        }
        return;
    }

    let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("trigon draw"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    // Pass state does not carry over between passes.
    if bound.program {
        rpass.set_pipeline(program.pipeline());
    }
    if bound.vertex_array {
        rpass.set_vertex_buffer(0, vertex_array.buffer().slice(..));
    }

    for cmd in segment {
        match cmd {
            FrameCmd::UseProgram => {
                rpass.set_pipeline(program.pipeline());
                bound.program = true;
            }
            FrameCmd::BindVertexArray => {
                rpass.set_vertex_buffer(0, vertex_array.buffer().slice(..));
                bound.vertex_array = true;
            }
            FrameCmd::Draw(call) => rpass.draw(call.vertices(), 0..1),
            FrameCmd::Clear(_) => {}
        }
    }
}
