//! Axis-aligned collision tests
//!
//! Everything in the world is a rectangle, so overlap is a four-way
//! comparison. The interesting part is deciding whether an overlap with a
//! platform counts as a landing.

use glam::Vec2;

/// Axis-aligned box, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Whether a falling body overlapping `platform` should come to rest on it.
///
/// Requires downward motion and the body's bottom edge on the previous
/// frame (`bottom - dy`) to have been at or above the platform's top, so
/// hitting a platform from below or from the side never snaps.
pub fn is_landing(body: &Aabb, dy: f32, platform: &Aabb) -> bool {
    if dy <= 0.0 || !body.overlaps(platform) {
        return false;
    }
    let previous_bottom = body.bottom() - dy;
    previous_bottom <= platform.top()
}
