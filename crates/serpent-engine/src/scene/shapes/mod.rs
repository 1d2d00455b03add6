pub mod rect;
pub mod text;

pub use rect::RectCmd;
pub use text::TextCmd;
