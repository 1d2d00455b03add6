//! Font loading and text measurement.

mod font_store;

pub use font_store::{FontLoadError, FontStore};
