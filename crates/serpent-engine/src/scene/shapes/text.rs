use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Text draw payload.
///
/// `pos` is the top-left corner of the laid-out text in logical pixels;
/// `size` is the font size in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

impl TextCmd {
    #[inline]
    pub fn new(text: impl Into<String>, pos: Vec2, size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
            color,
        }
    }
}

impl DrawList {
    /// Records a text draw command.
    #[inline]
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        pos: Vec2,
        size: f32,
        color: Color,
    ) {
        self.push(z, DrawCmd::Text(TextCmd::new(text, pos, size, color)));
    }
}
