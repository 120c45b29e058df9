use crate::geometry::{ClipPolygon, Vec2};

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + Send + Sync + 'static {
    /// Linear interpolation between two values.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`.
    /// t can exceed [0, 1] range for overshoot effects.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Vec2 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Vec2 {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
        }
    }
}

impl Animatable for ClipPolygon {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let mut vertices = from.0;
        for (v, target) in vertices.iter_mut().zip(to.0.iter()) {
            *v = Vec2::lerp(v, target, t);
        }
        ClipPolygon(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
        // Overshoot
        assert_eq!(f32::lerp(&0.0, &10.0, 1.5), 15.0);
    }

    #[test]
    fn test_vec2_lerp() {
        let mid = Vec2::lerp(&Vec2::new(0.0, 100.0), &Vec2::new(100.0, 0.0), 0.5);
        assert_eq!(mid, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_clip_polygon_lerp_hits_endpoints() {
        let from = ClipPolygon::COLLAPSED;
        let to = ClipPolygon::FULL_BLEED;
        assert_eq!(ClipPolygon::lerp(&from, &to, 0.0), from);
        assert_eq!(ClipPolygon::lerp(&from, &to, 1.0), to);
    }

    #[test]
    fn test_clip_polygon_lerp_is_vertex_wise() {
        let mid = ClipPolygon::lerp(&ClipPolygon::COLLAPSED, &ClipPolygon::FULL_BLEED, 0.5);
        // First vertex: (25, 75) -> (0, 0)
        assert_eq!(mid.0[0], Vec2::new(12.5, 37.5));
    }
}
