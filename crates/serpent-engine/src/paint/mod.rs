//! Paint model shared between the game layer and renderers.
//!
//! Scope: color representation only. Geometry types remain in `coords`.

mod color;

pub use color::Color;
