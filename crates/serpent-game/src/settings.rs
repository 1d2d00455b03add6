use serpent_engine::post::{BloomParams, BlurKind, ChromaParams, EffectParams, VignetteParams};

use crate::theme::THEMES;

/// In-memory game settings, adjustable from the settings screen.
#[derive(Debug, Clone)]
pub struct Settings {
    pub vsync: bool,
    pub bloom: bool,
    pub use_kawase: bool,
    pub shake_on_death: bool,
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub exposure: f32,
    pub chroma_enabled: bool,
    pub chroma_amount: f32,
    pub chroma_bias: f32,
    /// Baseline vignette intensity during play.
    pub vignette: f32,
    pub theme_index: usize,
    /// Best score this session.
    pub high_score: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: true,
            bloom: true,
            use_kawase: false,
            shake_on_death: true,
            bloom_strength: 0.9,
            bloom_radius: 2.0,
            exposure: 1.0,
            chroma_enabled: true,
            chroma_amount: 0.02,
            chroma_bias: 1.0,
            vignette: 0.35,
            theme_index: 0,
            high_score: 0,
        }
    }
}

impl Settings {
    pub fn cycle_theme(&mut self, forward: bool) {
        let n = THEMES.len();
        self.theme_index = if forward {
            (self.theme_index + 1) % n
        } else {
            (self.theme_index + n - 1) % n
        };
    }

    /// Builds the frame's effect parameters.
    ///
    /// `chroma_amount` and `vignette_intensity` come from the caller because
    /// transient state (death spikes, menu overlay) modulates them per frame.
    pub fn effect_params(&self, chroma_amount: f32, vignette_intensity: f32) -> EffectParams {
        EffectParams {
            bloom: BloomParams {
                enabled: self.bloom,
                strength: self.bloom_strength,
                radius: self.bloom_radius,
                exposure: self.exposure,
                kind: if self.use_kawase {
                    BlurKind::Kawase
                } else {
                    BlurKind::Gaussian
                },
                ..BloomParams::default()
            },
            chroma: ChromaParams {
                enabled: self.chroma_enabled,
                amount: chroma_amount,
                center_bias: self.chroma_bias,
            },
            vignette: VignetteParams {
                intensity: vignette_intensity,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycling_wraps_both_ways() {
        let mut s = Settings::default();
        s.cycle_theme(false);
        assert_eq!(s.theme_index, THEMES.len() - 1);
        s.cycle_theme(true);
        assert_eq!(s.theme_index, 0);
    }

    #[test]
    fn effect_params_follow_settings() {
        let mut s = Settings::default();
        s.bloom = false;
        s.use_kawase = true;
        let p = s.effect_params(0.05, 0.5);
        assert!(!p.bloom.enabled);
        assert_eq!(p.bloom.kind, BlurKind::Kawase);
        assert_eq!(p.chroma.amount, 0.05);
        assert_eq!(p.vignette.intensity, 0.5);
    }
}
