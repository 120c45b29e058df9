//! Value types for the animatable clip geometry of the overlay panel.
//!
//! Coordinates are percentages of the target's box, matching the convention
//! of CSS `clip-path: polygon(...)`, so `(100, 100)` is the bottom-right
//! corner regardless of the rendered size.

/// A 2D point in percent units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A four-vertex clip polygon.
///
/// The overlay wipe animates between [`ClipPolygon::COLLAPSED`] and
/// [`ClipPolygon::FULL_BLEED`]. Interpolation is vertex-wise, which is what
/// gives the wipe its expanding-quad look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPolygon(pub [Vec2; 4]);

impl ClipPolygon {
    /// Closed state: a degenerate quad sitting at 75% height. Zero visible
    /// area, but with vertices positioned so the wipe opens outward.
    pub const COLLAPSED: Self = Self([
        Vec2::new(25.0, 75.0),
        Vec2::new(75.0, 75.0),
        Vec2::new(75.0, 75.0),
        Vec2::new(25.0, 75.0),
    ]);

    /// Open state: the full box.
    pub const FULL_BLEED: Self = Self([
        Vec2::new(0.0, 0.0),
        Vec2::new(100.0, 0.0),
        Vec2::new(100.0, 100.0),
        Vec2::new(0.0, 100.0),
    ]);

    pub fn vertices(&self) -> &[Vec2; 4] {
        &self.0
    }
}
