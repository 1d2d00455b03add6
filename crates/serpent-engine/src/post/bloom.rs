use bytemuck::{Pod, Zeroable};

use super::params::{BloomParams, BlurKind};
use super::pass::{ScreenPass, ScreenPassDesc};
use super::targets::{Targets, TARGET_FORMAT};

/// Diagonal sample offsets for the iterative blur, one per iteration.
const KAWASE_OFFSETS: [f32; 3] = [1.0, 2.0, 4.0];

/// Separable blur iterations; each widens the radius by 60%.
const GAUSSIAN_ITERATIONS: u32 = 3;

/// Bloom stage: bright-pass extraction at half resolution, blur (Kawase or
/// separable Gaussian, same input/output contract), then additive composite
/// of the blurred highlights over the scene with exposure and tonemapping.
pub(super) struct Bloom {
    brightpass: ScreenPass,
    kawase: ScreenPass,
    gaussian: ScreenPass,
    composite: ScreenPass,
}

impl Bloom {
    pub fn new(device: &wgpu::Device) -> Self {
        let brightpass = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent bloom brightpass",
            shader: include_str!("shaders/brightpass.wgsl"),
            inputs: 1,
            uniform_size: Some(std::mem::size_of::<BrightpassUniform>() as u64),
            slots: 1,
            blend: None,
            format: TARGET_FORMAT,
        });

        let kawase = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent bloom kawase",
            shader: include_str!("shaders/kawase.wgsl"),
            inputs: 1,
            uniform_size: Some(std::mem::size_of::<KawaseUniform>() as u64),
            slots: KAWASE_OFFSETS.len() as u32,
            blend: None,
            format: TARGET_FORMAT,
        });

        let gaussian = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent bloom gaussian",
            shader: include_str!("shaders/blur.wgsl"),
            inputs: 1,
            uniform_size: Some(std::mem::size_of::<BlurUniform>() as u64),
            slots: GAUSSIAN_ITERATIONS * 2,
            blend: None,
            format: TARGET_FORMAT,
        });

        let composite = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent bloom composite",
            shader: include_str!("shaders/composite.wgsl"),
            inputs: 2,
            uniform_size: Some(std::mem::size_of::<CompositeUniform>() as u64),
            slots: 1,
            blend: None,
            format: TARGET_FORMAT,
        });

        Self {
            brightpass,
            kawase,
            gaussian,
            composite,
        }
    }

    /// Encodes the full bloom chain: scene target in, `dst` written.
    pub fn encode(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &Targets,
        params: &BloomParams,
        dst: &wgpu::TextureView,
    ) {
        let clear = wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT);

        // 1. Bright-pass into the first half-res target.
        self.brightpass.write_slot(
            queue,
            0,
            bytemuck::bytes_of(&BrightpassUniform {
                threshold: params.threshold,
                _pad: [0.0; 3],
            }),
        );
        self.brightpass.encode(
            device,
            encoder,
            "serpent brightpass",
            &[&targets.scene.view],
            0,
            &targets.half[0].view,
            clear,
        );

        // 2. Blur, ping-ponging between the half-res targets.
        let blurred = match params.kind {
            BlurKind::Kawase => self.encode_kawase(device, queue, encoder, targets),
            BlurKind::Gaussian => self.encode_gaussian(device, queue, encoder, targets, params),
        };

        // 3. Composite scene + blurred highlights into the destination.
        self.composite.write_slot(
            queue,
            0,
            bytemuck::bytes_of(&CompositeUniform {
                strength: params.strength,
                exposure: params.exposure,
                _pad: [0.0; 2],
            }),
        );
        self.composite.encode(
            device,
            encoder,
            "serpent bloom composite",
            &[&targets.scene.view, &targets.half[blurred].view],
            0,
            dst,
            clear,
        );
    }

    /// Iterative blur with growing diagonal offsets. Returns the index of the
    /// half-res target holding the result.
    fn encode_kawase(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &Targets,
    ) -> usize {
        let texel = [
            1.0 / targets.half[0].width as f32,
            1.0 / targets.half[0].height as f32,
        ];

        let mut src = 0;
        for (i, offset) in KAWASE_OFFSETS.iter().enumerate() {
            let dst = src ^ 1;
            self.kawase.write_slot(
                queue,
                i as u32,
                bytemuck::bytes_of(&KawaseUniform {
                    texel,
                    offset: *offset,
                    _pad: 0.0,
                }),
            );
            self.kawase.encode(
                device,
                encoder,
                "serpent kawase blur",
                &[&targets.half[src].view],
                i as u32,
                &targets.half[dst].view,
                wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
            );
            src = dst;
        }

        src
    }

    /// Separable Gaussian: horizontal then vertical per iteration, the radius
    /// widening each round. Returns the result target index.
    fn encode_gaussian(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &Targets,
        params: &BloomParams,
    ) -> usize {
        let texel = [
            1.0 / targets.half[0].width as f32,
            1.0 / targets.half[0].height as f32,
        ];

        let mut src = 0;
        for i in 0..GAUSSIAN_ITERATIONS {
            let radius = params.radius * (1.0 + i as f32 * 0.6);

            for (pass, dir) in [[texel[0], 0.0], [0.0, texel[1]]].iter().enumerate() {
                let slot = i * 2 + pass as u32;
                let dst = src ^ 1;
                self.gaussian.write_slot(
                    queue,
                    slot,
                    bytemuck::bytes_of(&BlurUniform {
                        u_dir: *dir,
                        u_radius: radius,
                        _pad: 0.0,
                    }),
                );
                self.gaussian.encode(
                    device,
                    encoder,
                    "serpent gaussian blur",
                    &[&targets.half[src].view],
                    slot,
                    &targets.half[dst].view,
                    wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                );
                src = dst;
            }
        }

        src
    }
}

// ── uniform blocks ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BrightpassUniform {
    threshold: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct KawaseUniform {
    texel: [f32; 2],
    offset: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BlurUniform {
    u_dir: [f32; 2],
    u_radius: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CompositeUniform {
    strength: f32,
    exposure: f32,
    _pad: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kawase_chain_ends_on_the_odd_target() {
        // Three ping-pong hops starting from target 0.
        let mut src = 0;
        for _ in KAWASE_OFFSETS {
            src ^= 1;
        }
        assert_eq!(src, 1);
    }

    #[test]
    fn gaussian_chain_ends_where_it_started() {
        // Each iteration is two hops, so any iteration count returns to 0.
        let mut src = 0;
        for _ in 0..GAUSSIAN_ITERATIONS * 2 {
            src ^= 1;
        }
        assert_eq!(src, 0);
    }
}
