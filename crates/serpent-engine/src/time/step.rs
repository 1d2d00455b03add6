/// Fixed-timestep accumulator.
///
/// Render frames arrive at an arbitrary rate; the simulation advances on a
/// fixed cadence. Each frame, feed the rendered delta into `advance` and step
/// the simulation once per returned tick.
///
/// The number of ticks per frame is capped so a long stall does not trigger a
/// burst of catch-up steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
}

impl FixedStep {
    /// Creates an accumulator with the given step length, in seconds.
    pub fn new(step: f32) -> Self {
        debug_assert!(step > 0.0);
        Self {
            step,
            accumulator: 0.0,
            max_ticks_per_frame: 4,
        }
    }

    /// Step length in seconds.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Changes the step length, keeping accumulated time.
    ///
    /// Takes effect on the next `advance` call, so a speed change mid-frame
    /// never produces a partial tick.
    pub fn set_step(&mut self, step: f32) {
        debug_assert!(step > 0.0);
        self.step = step;
    }

    /// Clears accumulated time.
    ///
    /// Call when the simulation is reset or unpaused so stale time does not
    /// produce an immediate tick.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Accumulates `dt` seconds and returns how many fixed ticks to run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Past the cap, drop the backlog instead of replaying it.
        if self.accumulator >= self.step {
            self.accumulator = self.accumulator % self.step;
        }

        ticks
    }

    /// Fraction of the current step already accumulated, in `[0, 1)`.
    ///
    /// Useful for interpolating render state between ticks.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_deltas_accumulate_into_one_tick() {
        let mut fs = FixedStep::new(0.16);
        assert_eq!(fs.advance(0.06), 0);
        assert_eq!(fs.advance(0.06), 0);
        assert_eq!(fs.advance(0.06), 1);
    }

    #[test]
    fn large_delta_yields_multiple_ticks() {
        let mut fs = FixedStep::new(0.1);
        assert_eq!(fs.advance(0.35), 3);
        // 0.05 remains in the accumulator.
        assert_eq!(fs.advance(0.05), 1);
    }

    #[test]
    fn tick_burst_is_capped() {
        let mut fs = FixedStep::new(0.01);
        // Ten steps' worth of time, but only four are replayed.
        assert_eq!(fs.advance(0.1), 4);
        // Backlog was dropped, so the next small delta does not tick.
        assert_eq!(fs.advance(0.005), 0);
    }

    #[test]
    fn reset_clears_accumulated_time() {
        let mut fs = FixedStep::new(0.16);
        fs.advance(0.15);
        fs.reset();
        assert_eq!(fs.advance(0.15), 0);
    }

    #[test]
    fn alpha_tracks_partial_progress() {
        let mut fs = FixedStep::new(0.2);
        fs.advance(0.1);
        assert!((fs.alpha() - 0.5).abs() < 1e-6);
    }
}
