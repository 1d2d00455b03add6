//! Shared GPU types and utilities used by the shape renderers.

use bytemuck::{Pod, Zeroable};

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha blending.
///
/// Colors are carried with straight alpha throughout the pipeline, so source
/// color is weighted by source alpha at blend time.
pub(crate) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── dynamic uniform slots ─────────────────────────────────────────────────

/// Stride between dynamic uniform slots.
///
/// WebGPU requires dynamic offsets to be multiples of
/// `min_uniform_buffer_offset_alignment`; 256 is the portable upper bound.
pub(crate) const UNIFORM_SLOT_STRIDE: u64 = 256;

/// Byte size of a buffer holding `slots` dynamic uniform slots.
pub(crate) fn uniform_slots_size(slots: u64) -> u64 {
    slots.max(1) * UNIFORM_SLOT_STRIDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_slot_buffer_is_never_empty() {
        assert_eq!(uniform_slots_size(0), UNIFORM_SLOT_STRIDE);
        assert_eq!(uniform_slots_size(3), 3 * UNIFORM_SLOT_STRIDE);
    }
}
