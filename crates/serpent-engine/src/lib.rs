//! Serpent engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the game layer: device and
//! surface management, the window runtime, input, frame timing, scene draw
//! lists, primitive renderers, and the post-processing compositor.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod text;
pub mod render;
pub mod post;
