use bytemuck::{Pod, Zeroable};

use super::pass::{ScreenPass, ScreenPassDesc};
use super::targets::TARGET_FORMAT;

/// Vignette stage.
///
/// Pure blend pass: emits black with a radial alpha ramp and lets the blend
/// unit darken the existing target. Reads nothing, so it runs in place on
/// whatever slot currently holds the frame.
pub(super) struct VignettePass {
    pass: ScreenPass,
}

impl VignettePass {
    pub fn new(device: &wgpu::Device) -> Self {
        let pass = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent vignette",
            shader: include_str!("shaders/vignette.wgsl"),
            inputs: 0,
            uniform_size: Some(std::mem::size_of::<VignetteUniform>() as u64),
            slots: 1,
            blend: Some(crate::render::shapes::straight_alpha_blend()),
            format: TARGET_FORMAT,
        });
        Self { pass }
    }

    pub fn encode(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        intensity: f32,
        target: &wgpu::TextureView,
    ) {
        self.pass.write_slot(
            queue,
            0,
            bytemuck::bytes_of(&VignetteUniform {
                intensity,
                _pad: [0.0; 3],
            }),
        );
        self.pass.encode(
            device,
            encoder,
            "serpent vignette",
            &[],
            0,
            target,
            wgpu::LoadOp::Load,
        );
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct VignetteUniform {
    intensity: f32,
    _pad: [f32; 3],
}
