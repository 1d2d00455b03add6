/// Length of the aberration spike after a death, in seconds.
const CHROMA_SPIKE_DURATION: f32 = 0.5;

/// Peak aberration amount at the start of a spike.
const MAX_CHROMA_SPIKE: f32 = 0.15;

/// Screen shake duration after a death, in seconds.
const SHAKE_DURATION: f32 = 0.6;

/// Peak shake amplitude, in cell units.
const SHAKE_AMPLITUDE: f32 = 0.2;

/// Transient visual-effect state owned by the game layer.
///
/// Timers spike on events and decay linearly; the renderer reads the mapped
/// per-frame values and owns no decay logic of its own.
#[derive(Debug, Default)]
pub struct EffectState {
    shake_timer: f32,
    chroma_timer: f32,
    /// Free-running phase for the menu highlight pulse.
    pub menu_anim: f32,
}

impl EffectState {
    /// Triggers the death effects: aberration spike and, optionally, shake.
    pub fn on_death(&mut self, shake_on_death: bool) {
        self.shake_timer = if shake_on_death { SHAKE_DURATION } else { 0.0 };
        self.chroma_timer = CHROMA_SPIKE_DURATION;
    }

    /// Clears all transient effects, e.g. on restart.
    pub fn reset(&mut self) {
        self.shake_timer = 0.0;
        self.chroma_timer = 0.0;
    }

    /// Advances timers by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.shake_timer = (self.shake_timer - dt).max(0.0);
        self.chroma_timer = (self.chroma_timer - dt).max(0.0);
        self.menu_anim += dt * 4.0;
    }

    /// Current shake offset in cell units, fading with the timer.
    pub fn shake_amount(&self) -> f32 {
        SHAKE_AMPLITUDE * (self.shake_timer / SHAKE_DURATION)
    }

    /// Aberration amount for this frame: the settings baseline, lifted toward
    /// the spike peak while the death timer runs.
    pub fn chroma_amount(&self, base: f32) -> f32 {
        if self.chroma_timer > 0.0 {
            let t = (self.chroma_timer / CHROMA_SPIKE_DURATION).clamp(0.0, 1.0);
            base + (MAX_CHROMA_SPIKE - base) * t
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_spike_starts_at_peak_and_decays_to_baseline() {
        let mut fx = EffectState::default();
        fx.on_death(true);

        assert!((fx.chroma_amount(0.02) - MAX_CHROMA_SPIKE).abs() < 1e-6);

        fx.update(CHROMA_SPIKE_DURATION / 2.0);
        let mid = fx.chroma_amount(0.02);
        assert!(mid > 0.02 && mid < MAX_CHROMA_SPIKE);

        fx.update(CHROMA_SPIKE_DURATION);
        assert_eq!(fx.chroma_amount(0.02), 0.02);
    }

    #[test]
    fn shake_fades_linearly_and_can_be_disabled() {
        let mut fx = EffectState::default();
        fx.on_death(true);
        assert!((fx.shake_amount() - SHAKE_AMPLITUDE).abs() < 1e-6);

        fx.update(SHAKE_DURATION);
        assert_eq!(fx.shake_amount(), 0.0);

        fx.on_death(false);
        assert_eq!(fx.shake_amount(), 0.0);
    }

    #[test]
    fn reset_clears_running_timers() {
        let mut fx = EffectState::default();
        fx.on_death(true);
        fx.reset();
        assert_eq!(fx.shake_amount(), 0.0);
        assert_eq!(fx.chroma_amount(0.0), 0.0);
    }
}
