use bytemuck::{Pod, Zeroable};

use super::params::ChromaParams;
use super::pass::{ScreenPass, ScreenPassDesc};
use super::targets::TARGET_FORMAT;

/// Chromatic aberration stage.
///
/// Samples the red and blue channels with opposite radial UV displacement
/// while green stays put; displacement grows toward the frame edges with a
/// `pow(d * 2, center_bias)` falloff so the center stays clean.
pub(super) struct ChromaPass {
    pass: ScreenPass,
}

impl ChromaPass {
    pub fn new(device: &wgpu::Device) -> Self {
        let pass = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent chroma",
            shader: include_str!("shaders/chroma.wgsl"),
            inputs: 1,
            uniform_size: Some(std::mem::size_of::<ChromaUniform>() as u64),
            slots: 1,
            blend: None,
            format: TARGET_FORMAT,
        });
        Self { pass }
    }

    pub fn encode(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        params: &ChromaParams,
        resolution: (u32, u32),
        src: &wgpu::TextureView,
        dst: &wgpu::TextureView,
    ) {
        self.pass.write_slot(
            queue,
            0,
            bytemuck::bytes_of(&ChromaUniform {
                u_resolution: [resolution.0 as f32, resolution.1 as f32],
                u_amount: params.amount,
                u_center_bias: params.center_bias,
            }),
        );
        self.pass.encode(
            device,
            encoder,
            "serpent chroma",
            &[src],
            0,
            dst,
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
        );
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ChromaUniform {
    u_resolution: [f32; 2],
    u_amount: f32,
    u_center_bias: f32,
}
