/// Blur strategy used by the bloom stage.
///
/// Both variants honor the same contract (bright-pass image in, blurred image
/// out); `Kawase` is the cheaper iterative approximation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BlurKind {
    #[default]
    Kawase,
    Gaussian,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BloomParams {
    pub enabled: bool,
    /// Additive weight of the blurred bright-pass image.
    pub strength: f32,
    /// Luminance cutoff for the bright-pass extraction.
    pub threshold: f32,
    /// Base blur radius; the Gaussian strategy widens it per iteration.
    pub radius: f32,
    /// Exposure applied in the composite before tonemapping.
    pub exposure: f32,
    pub kind: BlurKind,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 0.8,
            threshold: 0.85,
            radius: 2.0,
            exposure: 1.0,
            kind: BlurKind::Kawase,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChromaParams {
    pub enabled: bool,
    /// Per-channel UV displacement scale.
    pub amount: f32,
    /// Exponent of the radial falloff; higher bias keeps the center clean.
    pub center_bias: f32,
}

impl Default for ChromaParams {
    fn default() -> Self {
        Self {
            enabled: true,
            amount: 0.0,
            center_bias: 1.5,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct VignetteParams {
    /// Darkening intensity in `[0, 1]`; zero disables the stage entirely.
    pub intensity: f32,
}

/// Per-frame effect parameters.
///
/// Supplied fresh each frame by the game layer and treated as immutable for
/// that frame. The compositor owns no decay or animation logic.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EffectParams {
    pub bloom: BloomParams,
    pub chroma: ChromaParams,
    pub vignette: VignetteParams,
}

impl EffectParams {
    /// Returns a copy with every value clamped to its valid range.
    ///
    /// Out-of-range inputs produce the nearest valid frame rather than an
    /// error; one visually-off frame beats a dropped one.
    pub fn clamped(&self) -> Self {
        Self {
            bloom: BloomParams {
                enabled: self.bloom.enabled,
                strength: self.bloom.strength.max(0.0),
                threshold: self.bloom.threshold.clamp(0.0, 1.0),
                radius: self.bloom.radius.max(0.0),
                exposure: self.bloom.exposure.max(0.0),
                kind: self.bloom.kind,
            },
            chroma: ChromaParams {
                enabled: self.chroma.enabled,
                amount: self.chroma.amount.max(0.0),
                center_bias: self.chroma.center_bias.max(0.0),
            },
            vignette: VignetteParams {
                intensity: self.vignette.intensity.clamp(0.0, 1.0),
            },
        }
    }

    /// Whether the chromatic aberration stage does any work this frame.
    pub fn chroma_active(&self) -> bool {
        self.chroma.enabled && self.chroma.amount > 0.0
    }

    /// Whether the vignette stage does any work this frame.
    pub fn vignette_active(&self) -> bool {
        self.vignette.intensity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_repairs_out_of_range_values() {
        let mut p = EffectParams::default();
        p.bloom.strength = -1.0;
        p.bloom.threshold = 3.0;
        p.bloom.radius = -0.5;
        p.chroma.amount = -0.1;
        p.vignette.intensity = 1.7;

        let c = p.clamped();
        assert_eq!(c.bloom.strength, 0.0);
        assert_eq!(c.bloom.threshold, 1.0);
        assert_eq!(c.bloom.radius, 0.0);
        assert_eq!(c.chroma.amount, 0.0);
        assert_eq!(c.vignette.intensity, 1.0);
    }

    #[test]
    fn clamping_in_range_values_is_identity() {
        let p = EffectParams::default();
        assert_eq!(p.clamped(), p);
    }

    #[test]
    fn zero_amount_deactivates_chroma() {
        let mut p = EffectParams::default();
        p.chroma.enabled = true;
        p.chroma.amount = 0.0;
        assert!(!p.chroma_active());

        p.chroma.amount = 0.05;
        assert!(p.chroma_active());

        p.chroma.enabled = false;
        assert!(!p.chroma_active());
    }

    #[test]
    fn zero_intensity_deactivates_vignette() {
        let mut p = EffectParams::default();
        p.vignette.intensity = 0.0;
        assert!(!p.vignette_active());
        p.vignette.intensity = 0.3;
        assert!(p.vignette_active());
    }
}
