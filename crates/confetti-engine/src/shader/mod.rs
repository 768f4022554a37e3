//! Shader program construction.
//!
//! A program is built in two steps, mirroring a classic compile/link flow:
//! - `compile`: parse + validate one WGSL source for one stage (naga)
//! - `link`: match the vertex/fragment interfaces and reflect the
//!   `position`/`color` attribute locations and the `resolution` uniform slot
//!
//! Both steps run on the CPU, before any GPU resource exists. The render
//! pipeline is created from a linked `Program` only.

mod compile;
mod error;
mod link;

pub use compile::{CompiledShader, compile};
pub use error::{CompileError, LinkError, ProgramError, ShaderStage};
pub use link::{
    COLOR_ATTRIBUTE, POSITION_ATTRIBUTE, ProgramBindings, RESOLUTION_UNIFORM, UniformBinding, link,
};

/// Vertex stage: pixel position + resolution uniform -> clip space, color passthrough.
pub const VERTEX_SOURCE: &str = include_str!("wgsl/rectangles.vert.wgsl");

/// Fragment stage: writes the interpolated color.
pub const FRAGMENT_SOURCE: &str = include_str!("wgsl/rectangles.frag.wgsl");

/// A linked vertex + fragment pair with its reflected bindings.
#[derive(Debug)]
pub struct Program {
    vertex: CompiledShader,
    fragment: CompiledShader,
    bindings: ProgramBindings,
}

impl Program {
    /// Compiles and links the bundled rectangle shaders.
    pub fn rectangles() -> Result<Self, ProgramError> {
        Self::build(VERTEX_SOURCE, FRAGMENT_SOURCE)
    }

    /// Compiles both sources and links them.
    ///
    /// Failures are logged at `error` level with the full diagnostic before
    /// being returned.
    pub fn build(vertex_source: &str, fragment_source: &str) -> Result<Self, ProgramError> {
        let result = Self::try_build(vertex_source, fragment_source);
        if let Err(err) = &result {
            log::error!("{err}");
        }
        result
    }

    fn try_build(vertex_source: &str, fragment_source: &str) -> Result<Self, ProgramError> {
        let vertex = compile(ShaderStage::Vertex, vertex_source)?;
        let fragment = compile(ShaderStage::Fragment, fragment_source)?;
        let bindings = link(&vertex, &fragment)?;
        Ok(Self { vertex, fragment, bindings })
    }

    #[inline]
    pub fn vertex(&self) -> &CompiledShader {
        &self.vertex
    }

    #[inline]
    pub fn fragment(&self) -> &CompiledShader {
        &self.fragment
    }

    #[inline]
    pub fn bindings(&self) -> ProgramBindings {
        self.bindings
    }
}
