use super::bloom::Bloom;
use super::chroma::ChromaPass;
use super::params::EffectParams;
use super::pass::{ScreenPass, ScreenPassDesc};
use super::sequence::{self, Stage};
use super::targets::Targets;
use super::vignette::VignettePass;

/// Post-processing compositor.
///
/// Owns all offscreen targets and full-screen pipelines. Per frame:
/// the scene is drawn into [`scene_view`], then [`render`] plans the stage
/// sequence from the effect toggles, encodes the enabled stages over the
/// ping-pong working targets, and blits the final slot to the surface.
///
/// Pipelines are created once at startup; shader compilation failure there is
/// fatal since no frame can be produced without them. Resolution changes
/// recreate every target via [`resize`] before the next frame.
pub struct Compositor {
    targets: Targets,
    bloom: Bloom,
    chroma: ChromaPass,
    vignette: VignettePass,
    present: ScreenPass,
}

impl Compositor {
    /// Creates the compositor for the given surface format and initial size.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let present = ScreenPass::new(device, &ScreenPassDesc {
            label: "serpent present blit",
            shader: include_str!("shaders/blit.wgsl"),
            inputs: 1,
            uniform_size: None,
            slots: 0,
            blend: None,
            format: surface_format,
        });

        Self {
            targets: Targets::new(device, width, height),
            bloom: Bloom::new(device),
            chroma: ChromaPass::new(device),
            vignette: VignettePass::new(device),
            present,
        }
    }

    /// Recreates all offscreen targets for a new output resolution.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.targets.resize(device, width, height);
    }

    /// View of the scene target; primitive renderers draw into this.
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.targets.scene.view
    }

    /// Format of the offscreen targets; primitive pipelines must match it.
    pub fn scene_format(&self) -> wgpu::TextureFormat {
        super::targets::TARGET_FORMAT
    }

    /// Clears the scene target at the start of a frame.
    ///
    /// Every frame starts from a cleared scene so a skipped stage can never
    /// leak a previous frame's pixels.
    pub fn begin_scene(&self, encoder: &mut wgpu::CommandEncoder, clear: crate::paint::Color) {
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("serpent scene clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.targets.scene.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    /// Current target extent in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.targets.spec.width, self.targets.spec.height)
    }

    /// Target-set generation; bumped once per recreation in [`resize`].
    ///
    /// Callers caching bind groups against [`scene_view`] can compare this to
    /// detect that every target handle they held is stale.
    pub fn generation(&self) -> u64 {
        self.targets.spec.generation
    }

    /// Encodes the post-processing stack and the final blit to `surface`.
    ///
    /// Parameters are clamped, not validated: out-of-range values render the
    /// nearest valid frame. A disabled stage is skipped entirely and its
    /// input slot flows to the next stage by reassignment.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        surface: &wgpu::TextureView,
        params: &EffectParams,
    ) {
        let params = params.clamped();

        let plan = sequence::plan(
            params.bloom.enabled,
            params.chroma_active(),
            params.vignette_active(),
        );

        for stage in &plan.stages {
            match *stage {
                Stage::Bloom { dst } => {
                    self.bloom.encode(
                        device,
                        queue,
                        encoder,
                        &self.targets,
                        &params.bloom,
                        self.targets.view(dst),
                    );
                }
                Stage::Chroma { src, dst } => {
                    self.chroma.encode(
                        device,
                        queue,
                        encoder,
                        &params.chroma,
                        (self.targets.spec.width, self.targets.spec.height),
                        self.targets.view(src),
                        self.targets.view(dst),
                    );
                }
                Stage::Vignette { target } => {
                    self.vignette.encode(
                        device,
                        queue,
                        encoder,
                        params.vignette.intensity,
                        self.targets.view(target),
                    );
                }
            }
        }

        self.present.encode(
            device,
            encoder,
            "serpent present",
            &[self.targets.view(plan.present_src)],
            0,
            surface,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
        );
    }
}
