use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction; a zero vector stays zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return Self::ZERO;
        }
        Self {
            x: self.x / len,
            y: self.y / len,
        }
    }
}

/// Pixel dimensions of one animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Integer rectangle in screen pixels. Also used for alive zones, where an
/// all-zero rectangle means "unbounded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const UNBOUNDED: IntRect = IntRect::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Half-open containment: `left <= x < left + width`, same for y.
    pub fn contains(&self, point: Vec2) -> bool {
        let x = point.x as f64;
        let y = point.y as f64;
        let left = self.left as f64;
        let top = self.top as f64;
        x >= left && x < left + self.width as f64 && y >= top && y < top + self.height as f64
    }

    /// Alive-zone test: the zero rectangle contains everything.
    pub fn contains_or_unbounded(&self, point: Vec2) -> bool {
        self.is_zero() || self.contains(point)
    }
}

/// Axis-aligned box built around an entity centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn centered(center: Vec2, size: Size) -> Self {
        let half_w = size.width as f32 * 0.5;
        let half_h = size.height as f32 * 0.5;
        Self {
            min: Vec2::new(center.x - half_w, center.y - half_h),
            max: Vec2::new(center.x + half_w, center.y + half_h),
        }
    }

    /// Strict intersection; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamp `center` so a box of `size` around it stays inside the viewport.
    /// A box larger than the viewport is pinned to the top-left edge.
    pub fn clamp_center(&self, center: Vec2, size: Size) -> Vec2 {
        let half_w = size.width as f32 * 0.5;
        let half_h = size.height as f32 * 0.5;
        let max_x = (self.width as f32 - half_w).max(half_w);
        let max_y = (self.height as f32 - half_h).max(half_h);
        Vec2 {
            x: center.x.clamp(half_w, max_x),
            y: center.y.clamp(half_h, max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_keeps_zero_vector_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        let unit = Vec2::new(3.0, 4.0).normalized();
        assert!((unit.x - 0.6).abs() < 1e-6);
        assert!((unit.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn zero_alive_zone_is_unbounded() {
        let zone = IntRect::UNBOUNDED;
        assert!(zone.contains_or_unbounded(Vec2::new(-1.0e6, 1.0e6)));
    }

    #[test]
    fn rect_containment_is_half_open() {
        let zone = IntRect::new(-10, -10, 820, 620);
        assert!(zone.contains(Vec2::new(-10.0, -10.0)));
        assert!(zone.contains(Vec2::new(809.9, 609.9)));
        assert!(!zone.contains(Vec2::new(810.0, 300.0)));
        assert!(!zone.contains(Vec2::new(300.0, -10.5)));
    }

    #[test]
    fn touching_bounds_do_not_overlap() {
        let a = Bounds::centered(Vec2::new(10.0, 10.0), Size::new(10, 10));
        let b = Bounds::centered(Vec2::new(20.0, 10.0), Size::new(10, 10));
        let c = Bounds::centered(Vec2::new(19.0, 14.0), Size::new(10, 10));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn clamp_center_keeps_box_on_screen() {
        let viewport = Viewport::new(800, 600);
        let clamped = viewport.clamp_center(Vec2::new(-50.0, 700.0), Size::new(80, 30));
        assert_eq!(clamped, Vec2::new(40.0, 585.0));
    }
}
