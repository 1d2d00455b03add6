//! Post-processing compositor.
//!
//! The scene is rendered into an offscreen HDR target, then a fixed-order
//! stack of optional full-screen stages runs over ping-pong working targets:
//! bloom (bright-pass extract + blur + additive composite), chromatic
//! aberration, vignette. The final target is blitted to the visible surface.
//!
//! Stage sequencing is planned up front from the frame's effect toggles
//! (`sequence::plan`), so the pass order and target assignment are pure data
//! and testable without a GPU.

mod bloom;
mod chroma;
mod compositor;
mod params;
mod pass;
mod sequence;
mod targets;
mod vignette;

pub use compositor::Compositor;
pub use params::{BloomParams, BlurKind, ChromaParams, EffectParams, VignetteParams};
pub use sequence::{plan, FramePlan, Slot, Stage};
