//! Platform window runtime.
//!
//! Owns the winit event loop and the single game window, translates platform
//! events into engine input events, and drives `core::App` callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
