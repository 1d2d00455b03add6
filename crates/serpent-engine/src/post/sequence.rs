//! Frame pass planning.
//!
//! Sequencing is decided once per frame from the effect toggles and expressed
//! as plain data. The plan is deterministic for a given set of toggles and
//! carries no state between frames, so a disabled stage leaves no trace: its
//! input slot simply flows to the next stage by reassignment, never by copy.

/// Offscreen target a stage reads from or writes to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Slot {
    /// The full-resolution scene target.
    Scene,
    /// One of the two full-resolution working targets.
    Work(usize),
}

/// One planned pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    /// Bright-pass + blur from `Scene`, composited with the scene into `dst`.
    Bloom { dst: Slot },
    /// Chromatic aberration displacement, `src` read, `dst` written.
    Chroma { src: Slot, dst: Slot },
    /// Vignette darkening blended in place over `target`.
    Vignette { target: Slot },
}

/// Planned pass sequence for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    pub stages: Vec<Stage>,
    /// Slot holding the finished image, blitted to the surface last.
    pub present_src: Slot,
}

/// Plans the frame's stage sequence from the effect toggles.
///
/// Fixed order: bloom, chroma, vignette, present. Write targets alternate
/// between the two working slots so no stage ever samples the slot it is
/// writing.
pub fn plan(bloom: bool, chroma: bool, vignette: bool) -> FramePlan {
    let mut stages = Vec::new();
    let mut cur = Slot::Scene;

    if bloom {
        let dst = Slot::Work(0);
        stages.push(Stage::Bloom { dst });
        cur = dst;
    }

    if chroma {
        let dst = match cur {
            Slot::Work(0) => Slot::Work(1),
            _ => Slot::Work(0),
        };
        stages.push(Stage::Chroma { src: cur, dst });
        cur = dst;
    }

    if vignette {
        // Blend pass: darkens `cur` in place, no ping-pong needed.
        stages.push(Stage::Vignette { target: cur });
    }

    FramePlan {
        stages,
        present_src: cur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_stages_off_presents_the_scene_directly() {
        let p = plan(false, false, false);
        assert!(p.stages.is_empty());
        assert_eq!(p.present_src, Slot::Scene);
    }

    #[test]
    fn full_stack_alternates_working_slots() {
        let p = plan(true, true, true);
        assert_eq!(
            p.stages,
            vec![
                Stage::Bloom { dst: Slot::Work(0) },
                Stage::Chroma { src: Slot::Work(0), dst: Slot::Work(1) },
                Stage::Vignette { target: Slot::Work(1) },
            ]
        );
        assert_eq!(p.present_src, Slot::Work(1));
    }

    #[test]
    fn chroma_without_bloom_reads_the_scene() {
        let p = plan(false, true, false);
        assert_eq!(
            p.stages,
            vec![Stage::Chroma { src: Slot::Scene, dst: Slot::Work(0) }]
        );
        assert_eq!(p.present_src, Slot::Work(0));
    }

    #[test]
    fn vignette_only_blends_over_the_scene() {
        let p = plan(false, false, true);
        assert_eq!(p.stages, vec![Stage::Vignette { target: Slot::Scene }]);
        assert_eq!(p.present_src, Slot::Scene);
    }

    #[test]
    fn no_stage_reads_its_own_write_target() {
        for bloom in [false, true] {
            for chroma in [false, true] {
                for vignette in [false, true] {
                    let p = plan(bloom, chroma, vignette);
                    for stage in &p.stages {
                        if let Stage::Chroma { src, dst } = stage {
                            assert_ne!(src, dst);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn planning_is_deterministic_across_frames() {
        // Same toggles, same plan — no hidden per-frame swap state.
        for _ in 0..3 {
            assert_eq!(plan(true, false, true), plan(true, false, true));
        }
    }
}
