//! Pixel-space primitives used by the rendering pipeline.
//!
//! Canvas coordinates grow right and down, with the origin at the top-left
//! corner of the drawing surface.

/// A point in canvas space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f32,
    /// Y value in pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in canvas space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its origin and size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether this rectangle fully covers `other`.
    pub fn covers(&self, other: &ScreenRect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_origin_size_builds_corners() {
        let rect = ScreenRect::from_origin_size(2.0, 3.0, 10.0, 4.0);
        assert_eq!(rect.min, ScreenPoint::new(2.0, 3.0));
        assert_eq!(rect.max, ScreenPoint::new(12.0, 7.0));
        assert!(rect.is_valid());
    }

    #[test]
    fn covers_requires_full_containment() {
        let full = ScreenRect::from_origin_size(0.0, 0.0, 100.0, 50.0);
        let inner = ScreenRect::from_origin_size(10.0, 10.0, 5.0, 5.0);
        assert!(full.covers(&inner));
        assert!(!inner.covers(&full));
        assert!(full.covers(&full));
    }
}
