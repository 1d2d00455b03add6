use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Rectangle draw payload.
///
/// `radius` is the uniform corner radius in logical pixels. Zero means a flat
/// fill and takes the shader's fast path. The radius must stay within
/// `min(width, height) / 2` so the distance field stays well-formed;
/// [`DrawList::push_rect`] and the renderer both clamp it there.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub radius: f32,
    pub color: Color,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, radius: f32, color: Color) -> Self {
        Self { rect, radius, color }
    }
}

impl DrawList {
    /// Records a rectangle draw command with a corner radius.
    ///
    /// The radius is clamped into `[0, min(width, height) / 2]` at submission
    /// time; an oversized radius draws the nearest valid shape (a capsule)
    /// instead of degenerating.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, radius: f32, color: Color) {
        let max_radius = rect.size.x.abs().min(rect.size.y.abs()) * 0.5;
        let radius = radius.clamp(0.0, max_radius);
        self.push(z, DrawCmd::Rect(RectCmd::new(rect, radius, color)));
    }

    /// Records a flat (radius 0) rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_rect(z, rect, 0.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pushed_radius(rect: Rect, radius: f32) -> f32 {
        let mut list = DrawList::new();
        list.push_rect(ZIndex::new(0), rect, radius, Color::white());
        match &list.items()[0].cmd {
            DrawCmd::Rect(r) => r.radius,
            _ => panic!("expected rect"),
        }
    }

    #[test]
    fn negative_radius_clamps_to_zero() {
        let r = pushed_radius(Rect::new(0.0, 0.0, 10.0, 10.0), -5.0);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn oversized_radius_clamps_to_half_min_side() {
        let r = pushed_radius(Rect::new(0.0, 0.0, 10.0, 10.0), 100.0);
        assert_eq!(r, 5.0);

        // The shorter side governs the clamp.
        let r = pushed_radius(Rect::new(0.0, 0.0, 40.0, 8.0), 100.0);
        assert_eq!(r, 4.0);
    }

    #[test]
    fn in_range_radius_passes_through() {
        let r = pushed_radius(Rect::new(0.0, 0.0, 10.0, 10.0), 3.0);
        assert_eq!(r, 3.0);
    }
}
