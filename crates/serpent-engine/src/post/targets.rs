use super::sequence::Slot;

/// Format of every offscreen target.
///
/// Half-float keeps bloom highlights above 1.0 intact until the composite
/// tonemaps them.
pub(super) const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Half-resolution extent for the bloom chain, never zero.
pub(super) fn half_extent(v: u32) -> u32 {
    (v / 2).max(1)
}

pub(super) struct OffscreenTarget {
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
    _texture: wgpu::Texture,
}

impl OffscreenTarget {
    fn new(device: &wgpu::Device, label: &str, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            view,
            width,
            height,
            _texture: texture,
        }
    }
}

/// Extent and generation bookkeeping for the target set.
///
/// Kept apart from the GPU resources so the invalidation rule is testable
/// without a device: `apply_resize` decides recreation and bumps the
/// generation, the caller rebuilds textures when it says so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TargetSpec {
    pub width: u32,
    pub height: u32,
    pub generation: u64,
}

impl TargetSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            generation: 0,
        }
    }

    /// Records a resize request. Returns `true` when the extent actually
    /// changed and the textures must be recreated; the generation is bumped
    /// exactly then.
    pub fn apply_resize(&mut self, width: u32, height: u32) -> bool {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return false;
        }

        self.width = width;
        self.height = height;
        self.generation = self.generation.wrapping_add(1);
        true
    }
}

/// All offscreen targets for one output resolution.
///
/// Resolution change is the only invalidation event; it tears down and
/// recreates the whole set before the next frame, bumping the spec's
/// generation so cached bindings elsewhere can notice. There is no
/// incremental resize path.
pub(super) struct Targets {
    pub scene: OffscreenTarget,
    pub work: [OffscreenTarget; 2],
    pub half: [OffscreenTarget; 2],
    pub spec: TargetSpec,
}

impl Targets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        Self::with_spec(device, TargetSpec::new(width, height))
    }

    fn with_spec(device: &wgpu::Device, spec: TargetSpec) -> Self {
        let (w, h) = (spec.width, spec.height);
        let (hw, hh) = (half_extent(w), half_extent(h));

        Self {
            scene: OffscreenTarget::new(device, "serpent scene target", w, h),
            work: [
                OffscreenTarget::new(device, "serpent work target 0", w, h),
                OffscreenTarget::new(device, "serpent work target 1", w, h),
            ],
            half: [
                OffscreenTarget::new(device, "serpent bloom half target 0", hw, hh),
                OffscreenTarget::new(device, "serpent bloom half target 1", hw, hh),
            ],
            spec,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let mut spec = self.spec;
        if !spec.apply_resize(width, height) {
            return;
        }

        *self = Self::with_spec(device, spec);

        log::debug!(
            "post targets recreated: {}x{} (gen {})",
            spec.width,
            spec.height,
            spec.generation
        );
    }

    pub fn view(&self, slot: Slot) -> &wgpu::TextureView {
        match slot {
            Slot::Scene => &self.scene.view,
            Slot::Work(i) => &self.work[i % 2].view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_extent_never_collapses_to_zero() {
        assert_eq!(half_extent(1), 1);
        assert_eq!(half_extent(2), 1);
        assert_eq!(half_extent(3), 1);
        assert_eq!(half_extent(960), 480);
        assert_eq!(half_extent(961), 480);
    }

    #[test]
    fn resize_bumps_generation_and_tracks_extent() {
        let mut spec = TargetSpec::new(960, 960);
        assert_eq!(spec.generation, 0);

        assert!(spec.apply_resize(1280, 720));
        assert_eq!((spec.width, spec.height), (1280, 720));
        assert_eq!(spec.generation, 1);

        assert!(spec.apply_resize(640, 480));
        assert_eq!(spec.generation, 2);
    }

    #[test]
    fn same_extent_resize_is_a_no_op() {
        let mut spec = TargetSpec::new(800, 600);
        assert!(!spec.apply_resize(800, 600));
        assert_eq!(spec.generation, 0);
    }

    #[test]
    fn zero_extent_clamps_to_one() {
        let spec = TargetSpec::new(0, 0);
        assert_eq!((spec.width, spec.height), (1, 1));

        // A minimized-window resize to 0x0 lands on the clamped extent too.
        let mut spec = TargetSpec::new(1, 1);
        assert!(!spec.apply_resize(0, 0));
        assert_eq!(spec.generation, 0);
    }
}
