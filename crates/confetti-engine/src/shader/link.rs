use naga::{AddressSpace, Binding, Scalar, TypeInner, VectorSize};

use super::{CompiledShader, LinkError, ShaderStage};

/// Name of the per-vertex pixel position input.
pub const POSITION_ATTRIBUTE: &str = "position";
/// Name of the per-vertex color input.
pub const COLOR_ATTRIBUTE: &str = "color";
/// Name of the canvas resolution uniform.
pub const RESOLUTION_UNIFORM: &str = "resolution";

/// Bind group index the renderer uses for its only bind group.
pub(crate) const UNIFORM_GROUP: u32 = 0;

/// Resource slot of a uniform buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformBinding {
    pub group: u32,
    pub binding: u32,
}

/// Locations reflected from a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProgramBindings {
    /// `@location` of the `vec2<f32>` position attribute.
    pub position: u32,
    /// `@location` of the `vec3<f32>` color attribute.
    pub color: u32,
    /// Slot of the resolution uniform.
    pub resolution: UniformBinding,
}

/// A user-defined stage input or output.
#[derive(Debug, Clone)]
struct InterfaceVar {
    name: Option<String>,
    location: u32,
    inner: TypeInner,
}

/// Matches the interfaces of a vertex and a fragment shader.
///
/// Every problem found is collected; the error lists them one per line.
pub fn link(vertex: &CompiledShader, fragment: &CompiledShader) -> Result<ProgramBindings, LinkError> {
    let mut problems = Vec::new();

    if vertex.stage() != ShaderStage::Vertex {
        problems.push(format!("expected a vertex shader, got a {} shader", vertex.stage()));
    }
    if fragment.stage() != ShaderStage::Fragment {
        problems.push(format!("expected a fragment shader, got a {} shader", fragment.stage()));
    }
    if !problems.is_empty() {
        return Err(LinkError { log: problems.join("\n") });
    }

    let vs_module = vertex.module();
    let vs_fn = vertex.function();
    let fs_module = fragment.module();
    let fs_fn = fragment.function();

    let vs_inputs = arguments_interface(vs_module, &vs_fn.arguments);
    let position = find_attribute(&vs_inputs, POSITION_ATTRIBUTE, VectorSize::Bi, &mut problems);
    let color = find_attribute(&vs_inputs, COLOR_ATTRIBUTE, VectorSize::Tri, &mut problems);
    let resolution = find_resolution(vs_module, &mut problems);

    let vs_outputs = result_interface(vs_module, vs_fn.result.as_ref());
    let fs_inputs = arguments_interface(fs_module, &fs_fn.arguments);
    for input in &fs_inputs {
        match vs_outputs.iter().find(|o| o.location == input.location) {
            None => problems.push(format!(
                "fragment input {} at @location({}) is not written by the vertex shader",
                display_name(&input.name),
                input.location
            )),
            Some(output) if output.inner != input.inner => problems.push(format!(
                "@location({}) type mismatch: vertex writes {}, fragment reads {}",
                input.location,
                describe(&output.inner),
                describe(&input.inner)
            )),
            Some(_) => {}
        }
    }

    if result_interface(fs_module, fs_fn.result.as_ref()).is_empty() {
        problems.push("fragment shader writes no @location color output".to_owned());
    }

    match (position, color, resolution) {
        (Some(position), Some(color), Some(resolution)) if problems.is_empty() => {
            log::debug!(
                "linked program: position @location({position}), color @location({color}), \
                 resolution @group({}) @binding({})",
                resolution.group,
                resolution.binding
            );
            Ok(ProgramBindings { position, color, resolution })
        }
        _ => Err(LinkError { log: problems.join("\n") }),
    }
}

fn find_attribute(
    inputs: &[InterfaceVar],
    name: &str,
    size: VectorSize,
    problems: &mut Vec<String>,
) -> Option<u32> {
    let Some(var) = inputs.iter().find(|v| v.name.as_deref() == Some(name)) else {
        problems.push(format!("vertex shader has no `{name}` attribute"));
        return None;
    };

    let expected = TypeInner::Vector { size, scalar: Scalar::F32 };
    if var.inner != expected {
        problems.push(format!(
            "attribute `{name}` must be {}, found {}",
            describe(&expected),
            describe(&var.inner)
        ));
        return None;
    }

    Some(var.location)
}

fn find_resolution(module: &naga::Module, problems: &mut Vec<String>) -> Option<UniformBinding> {
    let Some((_, global)) = module
        .global_variables
        .iter()
        .find(|(_, g)| g.name.as_deref() == Some(RESOLUTION_UNIFORM))
    else {
        problems.push(format!("vertex shader has no `{RESOLUTION_UNIFORM}` uniform"));
        return None;
    };

    if global.space != AddressSpace::Uniform {
        problems.push(format!("`{RESOLUTION_UNIFORM}` must live in the uniform address space"));
        return None;
    }

    let Some(slot) = global.binding.as_ref() else {
        problems.push(format!("`{RESOLUTION_UNIFORM}` has no @group/@binding"));
        return None;
    };

    if slot.group != UNIFORM_GROUP {
        problems.push(format!(
            "`{RESOLUTION_UNIFORM}` must be in @group({UNIFORM_GROUP}), found @group({})",
            slot.group
        ));
        return None;
    }

    let vec2 = TypeInner::Vector { size: VectorSize::Bi, scalar: Scalar::F32 };
    let leading_vec2 = match &module.types[global.ty].inner {
        inner if *inner == vec2 => true,
        TypeInner::Struct { members, .. } => members
            .first()
            .is_some_and(|m| m.offset == 0 && module.types[m.ty].inner == vec2),
        _ => false,
    };
    if !leading_vec2 {
        problems.push(format!(
            "`{RESOLUTION_UNIFORM}` must be vec2<f32> or a struct starting with vec2<f32>"
        ));
        return None;
    }

    Some(UniformBinding { group: slot.group, binding: slot.binding })
}

/// Collects `@location` values among entry point arguments, flattening structs.
fn arguments_interface(module: &naga::Module, args: &[naga::FunctionArgument]) -> Vec<InterfaceVar> {
    let mut out = Vec::new();
    for arg in args {
        collect_interface(module, arg.name.as_ref(), arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

fn result_interface(module: &naga::Module, result: Option<&naga::FunctionResult>) -> Vec<InterfaceVar> {
    let mut out = Vec::new();
    if let Some(result) = result {
        collect_interface(module, None, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

fn collect_interface(
    module: &naga::Module,
    name: Option<&String>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&Binding>,
    out: &mut Vec<InterfaceVar>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(InterfaceVar {
            name: name.cloned(),
            location: *location,
            inner: module.types[ty].inner.clone(),
        }),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_interface(module, m.name.as_ref(), m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(n) => format!("`{n}`"),
        None => "<unnamed>".to_owned(),
    }
}

fn describe(inner: &TypeInner) -> String {
    fn scalar(s: &Scalar) -> String {
        let kind = match s.kind {
            naga::ScalarKind::Float => "f",
            naga::ScalarKind::Sint => "i",
            naga::ScalarKind::Uint => "u",
            naga::ScalarKind::Bool => return "bool".to_owned(),
            _ => "abstract",
        };
        format!("{kind}{}", u32::from(s.width) * 8)
    }

    match inner {
        TypeInner::Scalar(s) => scalar(s),
        TypeInner::Vector { size, scalar: s } => format!("vec{}<{}>", *size as u8, scalar(s)),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{FRAGMENT_SOURCE, VERTEX_SOURCE, compile};

    fn vs(src: &str) -> CompiledShader {
        compile(ShaderStage::Vertex, src).unwrap()
    }

    fn fs(src: &str) -> CompiledShader {
        compile(ShaderStage::Fragment, src).unwrap()
    }

    const PLAIN_FS: &str = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;

    #[test]
    fn bundled_sources_link_and_reflect_locations() {
        let bindings = link(&vs(VERTEX_SOURCE), &fs(FRAGMENT_SOURCE)).unwrap();
        assert_eq!(bindings.position, 0);
        assert_eq!(bindings.color, 1);
        assert_eq!(bindings.resolution, UniformBinding { group: 0, binding: 0 });
    }

    #[test]
    fn reflects_non_default_locations_from_plain_arguments() {
        let src = r#"
@group(0) @binding(3) var<uniform> resolution: vec2<f32>;

struct Out {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn main_vs(@location(4) color: vec3<f32>, @location(2) position: vec2<f32>) -> Out {
    var o: Out;
    o.clip = vec4<f32>(position / resolution, 0.0, 1.0);
    o.color = vec4<f32>(color, 1.0);
    return o;
}
"#;
        let bindings = link(&vs(src), &fs(PLAIN_FS)).unwrap();
        assert_eq!(bindings.position, 2);
        assert_eq!(bindings.color, 4);
        assert_eq!(bindings.resolution.binding, 3);
    }

    #[test]
    fn missing_color_attribute_fails_to_link() {
        let src = r#"
@group(0) @binding(0) var<uniform> resolution: vec2<f32>;

struct Out {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> Out {
    var o: Out;
    o.clip = vec4<f32>(position / resolution, 0.0, 1.0);
    o.color = vec4<f32>(1.0);
    return o;
}
"#;
        let err = link(&vs(src), &fs(PLAIN_FS)).unwrap_err();
        assert!(err.log.contains("`color`"), "{}", err.log);
    }

    #[test]
    fn varying_type_mismatch_fails_to_link() {
        let fs_src = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;
        let err = link(&vs(VERTEX_SOURCE), &fs(fs_src)).unwrap_err();
        assert!(err.log.contains("type mismatch"), "{}", err.log);
        assert!(err.log.contains("vec4<f32>"));
        assert!(err.log.contains("vec3<f32>"));
    }

    #[test]
    fn unwritten_varying_fails_to_link() {
        let fs_src = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>, @location(1) tint: vec4<f32>) -> @location(0) vec4<f32> {
    return color * tint;
}
"#;
        let err = link(&vs(VERTEX_SOURCE), &fs(fs_src)).unwrap_err();
        assert!(err.log.contains("@location(1)"), "{}", err.log);
    }

    #[test]
    fn wrong_attribute_type_fails_to_link() {
        let src = r#"
@group(0) @binding(0) var<uniform> resolution: vec2<f32>;

struct Out {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec3<f32>) -> Out {
    var o: Out;
    o.clip = vec4<f32>(position.xy / resolution, 0.0, 1.0);
    o.color = vec4<f32>(color, 1.0);
    return o;
}
"#;
        let err = link(&vs(src), &fs(PLAIN_FS)).unwrap_err();
        assert!(err.log.contains("must be vec2<f32>, found vec3<f32>"), "{}", err.log);
    }

    #[test]
    fn missing_resolution_uniform_fails_to_link() {
        let src = r#"
struct Out {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(@location(0) position: vec2<f32>, @location(1) color: vec3<f32>) -> Out {
    var o: Out;
    o.clip = vec4<f32>(position, 0.0, 1.0);
    o.color = vec4<f32>(color, 1.0);
    return o;
}
"#;
        let err = link(&vs(src), &fs(PLAIN_FS)).unwrap_err();
        assert!(err.log.contains("`resolution` uniform"), "{}", err.log);
    }

    #[test]
    fn problems_are_reported_together() {
        let src = r#"
@vertex
fn vs_main() -> @builtin(position) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 0.0, 1.0);
}
"#;
        let err = link(&vs(src), &fs(PLAIN_FS)).unwrap_err();
        assert!(err.log.lines().count() >= 4, "{}", err.log);
    }

    #[test]
    fn swapped_stages_fail_to_link() {
        let err = link(&fs(FRAGMENT_SOURCE), &vs(VERTEX_SOURCE)).unwrap_err();
        assert!(err.log.contains("expected a vertex shader"));
    }
}
