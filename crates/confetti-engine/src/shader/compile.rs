use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{CompileError, ShaderStage};

/// A WGSL source that parsed and validated for one stage.
///
/// Keeps the source text (wgpu compiles it again for the device) and the naga
/// module (used for interface reflection when linking).
#[derive(Debug)]
pub struct CompiledShader {
    stage: ShaderStage,
    source: String,
    entry_point: String,
    entry_index: usize,
    module: naga::Module,
}

impl CompiledShader {
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the entry point used for this stage.
    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    #[inline]
    pub(crate) fn module(&self) -> &naga::Module {
        &self.module
    }

    /// Entry point function of this stage.
    pub(crate) fn function(&self) -> &naga::Function {
        &self.module.entry_points[self.entry_index].function
    }
}

/// Parses and validates `source` as a shader for `stage`.
///
/// The source must declare at least one entry point of `stage`; the first one
/// is used. Diagnostics are rendered against the source text.
pub fn compile(stage: ShaderStage, source: &str) -> Result<CompiledShader, CompileError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| CompileError {
        stage,
        log: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| CompileError {
            stage,
            log: e.emit_to_string(source),
        })?;

    let naga_stage = stage.to_naga();
    let mut candidates = module
        .entry_points
        .iter()
        .enumerate()
        .filter(|(_, ep)| ep.stage == naga_stage);

    let Some((entry_index, entry)) = candidates.next() else {
        return Err(CompileError {
            stage,
            log: format!("no @{stage} entry point declared"),
        });
    };
    if candidates.next().is_some() {
        log::debug!("{stage} shader declares several entry points; using `{}`", entry.name);
    }
    let entry_point = entry.name.clone();

    log::debug!("compiled {stage} shader (entry point `{entry_point}`)");

    Ok(CompiledShader {
        stage,
        source: source.to_owned(),
        entry_point,
        entry_index,
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{FRAGMENT_SOURCE, VERTEX_SOURCE};

    #[test]
    fn bundled_sources_compile() {
        let vs = compile(ShaderStage::Vertex, VERTEX_SOURCE).unwrap();
        let fs = compile(ShaderStage::Fragment, FRAGMENT_SOURCE).unwrap();
        assert_eq!(vs.entry_point(), "vs_main");
        assert_eq!(fs.entry_point(), "fs_main");
        assert_eq!(vs.stage(), ShaderStage::Vertex);
        assert_eq!(fs.source(), FRAGMENT_SOURCE);
    }

    #[test]
    fn syntax_error_is_a_compile_error_with_log() {
        let broken = "@fragment fn fs_main( -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let err = compile(ShaderStage::Fragment, broken).unwrap_err();
        assert_eq!(err.stage, ShaderStage::Fragment);
        assert!(!err.log.is_empty());
    }

    #[test]
    fn type_error_is_a_compile_error() {
        let src = r#"
@vertex
fn vs_main() -> @builtin(position) vec4<f32> {
    let x: f32 = vec2<f32>(1.0, 2.0);
    return vec4<f32>(x, 0.0, 0.0, 1.0);
}
"#;
        let err = compile(ShaderStage::Vertex, src).unwrap_err();
        assert_eq!(err.stage, ShaderStage::Vertex);
        assert!(!err.log.is_empty());
    }

    #[test]
    fn source_without_stage_entry_point_is_rejected() {
        let err = compile(ShaderStage::Vertex, FRAGMENT_SOURCE).unwrap_err();
        assert!(err.log.contains("@vertex"));
    }
}
