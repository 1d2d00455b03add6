//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `FrameTime::dt` into a `FixedStep` when the simulation runs on a
//!   fixed cadence decoupled from the render rate

mod frame_clock;
mod step;

pub use frame_clock::{FrameClock, FrameTime};
pub use step::FixedStep;
