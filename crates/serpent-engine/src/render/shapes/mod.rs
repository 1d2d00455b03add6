//! Shape renderers.

mod common;

pub mod rect;
pub mod text;

pub use rect::RectRenderer;
pub use text::TextRenderer;

pub(crate) use common::{straight_alpha_blend, UNIFORM_SLOT_STRIDE};
