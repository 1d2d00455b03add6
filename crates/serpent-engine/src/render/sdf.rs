//! CPU reference for the shader distance math.
//!
//! The WGSL in `shapes/shaders/rect.wgsl` and `post/shaders/vignette.wgsl`
//! implements the same formulas on the GPU. Keeping a CPU mirror makes the
//! coverage rules testable without a device, and documents the exact pixel
//! contract the shaders must honor.

use crate::coords::{Rect, Vec2};

/// GLSL-style smoothstep.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Rounded-box distance at point `p`, in pixels.
///
/// `dist <= radius` is inside the rounded rectangle; the boundary sits exactly
/// at `dist == radius`. Interior points report the negative axis distance to
/// the shrunk core box.
pub fn rounded_box_distance(p: Vec2, rect: Rect, radius: f32) -> f32 {
    let center = rect.center();
    let half = Vec2::new(rect.size.x * 0.5, rect.size.y * 0.5);

    let centered = Vec2::new((p.x - center.x).abs(), (p.y - center.y).abs());
    let q = Vec2::new(centered.x - half.x + radius, centered.y - half.y + radius);

    let outside = Vec2::new(q.x.max(0.0), q.y.max(0.0)).length();
    let inside = q.x.max(q.y).min(0.0);

    outside + inside
}

/// Alpha coverage for a rounded rect fragment, or `None` when the fragment is
/// discarded.
///
/// Fragments beyond one pixel past the boundary are discarded; the one-pixel
/// band between `radius` and `radius + 1` fades out for anti-aliasing.
/// Radii past half the shorter side clamp to `min(width, height) / 2`, the
/// same clamp the renderer applies before uploading the uniform.
pub fn rect_coverage(p: Vec2, rect: Rect, radius: f32) -> Option<f32> {
    if radius <= 0.0 {
        // Sharp-corner fast path: plain containment, no distance math.
        return rect.contains(p).then_some(1.0);
    }

    let radius = radius.min(rect.size.x.min(rect.size.y) * 0.5);
    let dist = rounded_box_distance(p, rect, radius);
    if dist > radius + 1.0 {
        return None;
    }

    Some(1.0 - smoothstep(radius, radius + 1.0, dist))
}

/// Vignette overlay alpha at normalized screen position `uv`.
///
/// Zero inside the center disc (distance below 0.4), ramping to `intensity`
/// toward the corners. `intensity == 0` yields zero everywhere.
pub fn vignette_alpha(uv: Vec2, intensity: f32) -> f32 {
    let d = Vec2::new(uv.x - 0.5, uv.y - 0.5).length();
    smoothstep(0.4, 0.85, d) * intensity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn interior_is_fully_opaque() {
        let alpha = rect_coverage(Vec2::new(200.0, 150.0), rect(), 20.0);
        assert_eq!(alpha, Some(1.0));
    }

    #[test]
    fn sharp_corner_survives_rounding_cut() {
        // The geometric corner sits sqrt(800) ~ 28.3px from the shrunk core,
        // past the 21px cut, so a 20px radius discards it.
        let alpha = rect_coverage(Vec2::new(100.0, 100.0), rect(), 20.0);
        assert_eq!(alpha, None);

        // With no rounding the same point is plain containment.
        let alpha = rect_coverage(Vec2::new(100.0, 100.0), rect(), 0.0);
        assert_eq!(alpha, Some(1.0));
    }

    #[test]
    fn point_inside_rounded_corner_is_kept() {
        let alpha = rect_coverage(Vec2::new(120.0, 120.0), rect(), 20.0);
        assert!(alpha.is_some());
        assert!(alpha.unwrap() > 0.99);
    }

    #[test]
    fn coverage_fades_across_one_pixel_band() {
        // Walk outward along the top edge midline: dist rises through the
        // radius..radius+1 band and alpha must fall monotonically.
        let r = rect();
        let mut last = f32::INFINITY;
        for i in 0..=10 {
            let y = 100.0 - 0.1 * i as f32 + 0.05;
            let dist = rounded_box_distance(Vec2::new(200.0, y), r, 20.0);
            let alpha = 1.0 - smoothstep(20.0, 21.0, dist);
            assert!(alpha <= last + 1e-6);
            last = alpha;
        }
    }

    #[test]
    fn oversized_radius_renders_a_capsule_not_nothing() {
        // radius > min(w, h) / 2 must clamp, not discard the whole primitive.
        let square = Rect::new(0.0, 0.0, 10.0, 10.0);
        let center = Vec2::new(5.0, 5.0);
        assert_eq!(rect_coverage(center, square, 100.0), Some(1.0));

        // Clamped behavior matches the largest valid radius exactly.
        let corner = Vec2::new(1.0, 1.0);
        assert_eq!(
            rect_coverage(corner, square, 100.0),
            rect_coverage(corner, square, 5.0),
        );
    }

    #[test]
    fn negative_radius_is_treated_as_sharp() {
        let alpha = rect_coverage(Vec2::new(100.5, 100.5), rect(), -5.0);
        assert_eq!(alpha, Some(1.0));
    }

    #[test]
    fn boundary_distance_is_radius() {
        // Midpoint of the left edge lies exactly on the boundary.
        let dist = rounded_box_distance(Vec2::new(100.0, 150.0), rect(), 20.0);
        assert!((dist - 20.0).abs() < 1e-4);
    }

    #[test]
    fn vignette_is_zero_in_center_disc() {
        assert_eq!(vignette_alpha(Vec2::new(0.5, 0.5), 1.0), 0.0);
        assert_eq!(vignette_alpha(Vec2::new(0.6, 0.55), 1.0), 0.0);
    }

    #[test]
    fn vignette_scales_with_intensity() {
        // The UV corner sits at d ~ 0.707, inside the 0.4..0.85 ramp.
        let corner = Vec2::new(0.0, 0.0);
        let full = vignette_alpha(corner, 1.0);
        let half = vignette_alpha(corner, 0.5);
        assert!(full > 0.7 && full < 0.8);
        assert!((half - full * 0.5).abs() < 1e-6);
    }

    #[test]
    fn vignette_plateaus_past_outer_edge() {
        // Beyond d = 0.85 the falloff saturates at exactly `intensity`.
        let at_edge = vignette_alpha(Vec2::new(-0.35, 0.5), 0.8);
        let beyond = vignette_alpha(Vec2::new(-0.7, 0.5), 0.8);
        assert!((at_edge - 0.8).abs() < 1e-6);
        assert_eq!(at_edge, beyond);
    }

    #[test]
    fn zero_intensity_vignette_is_a_no_op() {
        for uv in [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.5, 0.0),
        ] {
            assert_eq!(vignette_alpha(uv, 0.0), 0.0);
        }
    }
}
