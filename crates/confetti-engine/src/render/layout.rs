//! Immutable vertex/uniform layout descriptors.
//!
//! Layouts are plain values built from reflected program bindings and handed
//! to the pipeline descriptor in one go; nothing is configured through
//! bind-then-set state.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::shader::ProgramBindings;

/// Vertex buffer slot holding positions.
pub(crate) const POSITION_SLOT: u32 = 0;
/// Vertex buffer slot holding colors.
pub(crate) const COLOR_SLOT: u32 = 1;

/// One tightly packed, non-interleaved vertex stream feeding one attribute.
///
/// Offset is always 0 and the stride equals the attribute size. Float formats
/// are used as-is (no normalization).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexStreamLayout {
    attribute: wgpu::VertexAttribute,
}

impl VertexStreamLayout {
    #[inline]
    pub const fn new(shader_location: u32, format: wgpu::VertexFormat) -> Self {
        Self {
            attribute: wgpu::VertexAttribute {
                format,
                offset: 0,
                shader_location,
            },
        }
    }

    /// `vec2<f32>` pixel positions.
    #[inline]
    pub const fn position(shader_location: u32) -> Self {
        Self::new(shader_location, wgpu::VertexFormat::Float32x2)
    }

    /// `vec3<f32>` RGB colors.
    #[inline]
    pub const fn color(shader_location: u32) -> Self {
        Self::new(shader_location, wgpu::VertexFormat::Float32x3)
    }

    #[inline]
    pub fn shader_location(&self) -> u32 {
        self.attribute.shader_location
    }

    /// Bytes between consecutive vertices.
    #[inline]
    pub fn stride(&self) -> u64 {
        self.attribute.format.size()
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: std::slice::from_ref(&self.attribute),
        }
    }
}

/// The two streams a rectangle batch is drawn from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectangleLayouts {
    pub position: VertexStreamLayout,
    pub color: VertexStreamLayout,
}

impl RectangleLayouts {
    pub fn from_bindings(bindings: ProgramBindings) -> Self {
        Self {
            position: VertexStreamLayout::position(bindings.position),
            color: VertexStreamLayout::color(bindings.color),
        }
    }

    /// Buffer layouts in slot order (`POSITION_SLOT`, `COLOR_SLOT`).
    pub fn buffer_layouts(&self) -> [wgpu::VertexBufferLayout<'_>; 2] {
        [self.position.buffer_layout(), self.color.buffer_layout()]
    }
}

/// Resolution uniform as laid out in the vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ResolutionUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ResolutionUniform {
    pub const SIZE: u64 = std::mem::size_of::<ResolutionUniform>() as u64;

    /// Zero-sized canvases are clamped to 1 px to keep the shader division finite.
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            size: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}
