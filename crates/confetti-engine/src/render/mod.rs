//! GPU rendering of rectangle batches.
//!
//! Convention:
//! - CPU geometry is in canvas pixels (top-left origin, +Y down).
//! - The vertex shader converts to clip space using a resolution uniform.
//!
//! Flow: a linked `shader::Program` becomes a `RectanglePipeline`; a
//! `RectangleBatch` is uploaded once into a `PreparedScene`, which can then be
//! encoded into any number of render passes.

mod ctx;
mod layout;
mod pipeline;
mod scene;

pub use ctx::{RenderCtx, RenderTarget};
pub use layout::{RectangleLayouts, ResolutionUniform, VertexStreamLayout};
pub use pipeline::RectanglePipeline;
pub use scene::{DrawStats, PreparedScene, SceneConfig, ShaderSources, draw_generated_rectangles};
