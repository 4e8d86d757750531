/// User-defined I/O locations of one entry point.
///
/// Built-ins (`@builtin(position)` etc.) are not part of the interface; only
/// `@location(n)` bindings are matched at link time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageInterface {
    inputs: Vec<u32>,
    outputs: Vec<u32>,
}

impl StageInterface {
    pub(crate) fn from_entry_point(module: &naga::Module, ep: &naga::EntryPoint) -> Self {
        let mut inputs = Vec::new();
        for arg in &ep.function.arguments {
            collect_locations(module, arg.binding.as_ref(), arg.ty, &mut inputs);
        }

        let mut outputs = Vec::new();
        if let Some(result) = &ep.function.result {
            collect_locations(module, result.binding.as_ref(), result.ty, &mut outputs);
        }

        inputs.sort_unstable();
        inputs.dedup();
        outputs.sort_unstable();
        outputs.dedup();

        Self { inputs, outputs }
    }

    /// Sorted input locations.
    pub fn inputs(&self) -> &[u32] {
        &self.inputs
    }

    /// Sorted output locations.
    pub fn outputs(&self) -> &[u32] {
        &self.outputs
    }
}

fn collect_locations(
    module: &naga::Module,
    binding: Option<&naga::Binding>,
    ty: naga::Handle<naga::Type>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(naga::Binding::BuiltIn(_)) => {}
        // Unbound struct: the members carry the bindings.
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    if let Some(naga::Binding::Location { location, .. }) = &member.binding {
                        out.push(*location);
                    }
                }
            }
        }
    }
}
