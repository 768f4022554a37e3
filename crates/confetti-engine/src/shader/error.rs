use std::fmt;

/// Programmable stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader source rejected by the compiler.
///
/// `log` holds the rendered compiler diagnostic.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{stage} shader failed to compile:\n{log}")]
pub struct CompileError {
    pub stage: ShaderStage,
    pub log: String,
}

/// Compiled stages that cannot be combined into a program.
///
/// `log` lists one interface problem per line.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("program failed to link:\n{log}")]
pub struct LinkError {
    pub log: String,
}

/// Failure while building a program from vertex + fragment sources.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ProgramError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Link(#[from] LinkError),
}
