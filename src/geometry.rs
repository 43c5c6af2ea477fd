use std::ops::{Add, Sub};

/// Integer pixel coordinate on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds fractional pointer coordinates. Returns `None` for NaN or infinite input.
    pub fn from_pointer(x: f32, y: f32) -> Option<Self> {
        Some(Self {
            x: round_coordinate(x)?,
            y: round_coordinate(y)?,
        })
    }
}

/// Difference between two [`PixelPoint`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelOffset {
    pub dx: i32,
    pub dy: i32,
}

impl PixelOffset {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Sub for PixelPoint {
    type Output = PixelOffset;

    fn sub(self, rhs: PixelPoint) -> PixelOffset {
        PixelOffset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<PixelOffset> for PixelPoint {
    type Output = PixelPoint;

    fn sub(self, rhs: PixelOffset) -> PixelPoint {
        PixelPoint::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Add<PixelOffset> for PixelPoint {
    type Output = PixelPoint;

    fn add(self, rhs: PixelOffset) -> PixelPoint {
        PixelPoint::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Largest coordinate magnitude kept after rounding. `f32` has no integer precision
/// beyond it, and the headroom keeps offsets, sizes and margins within `i32`.
pub const COORDINATE_LIMIT: i32 = 1 << 24;

/// Rounds half toward positive infinity, so `-2.5` becomes `-2` and `2.5` becomes `3`.
/// The result is limited to `-COORDINATE_LIMIT..=COORDINATE_LIMIT`.
pub fn round_coordinate(value: f32) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let limit = COORDINATE_LIMIT as f32;
    Some((value + 0.5).floor().clamp(-limit, limit) as i32)
}

/// Limits `value` to `min..=max`. Unlike [`Ord::clamp`] this never panics if `min > max`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max)
}

/// Inclusive rectangle test: the right and bottom edges count as inside.
pub fn is_point_in_rect(
    px: i32,
    py: i32,
    rect_x: i32,
    rect_y: i32,
    rect_w: i32,
    rect_h: i32,
) -> bool {
    px >= rect_x && px <= rect_x + rect_w && py >= rect_y && py <= rect_y + rect_h
}

/// Axis aligned box that only ever grows while points are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Zero-area box collapsed onto `point`.
    pub fn from_point(point: PixelPoint) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Widens each axis independently so that `point` is enclosed.
    pub fn widen(&mut self, point: PixelPoint) {
        if point.x < self.min_x {
            self.min_x = point.x;
        }
        if point.y < self.min_y {
            self.min_y = point.y;
        }
        if point.x > self.max_x {
            self.max_x = point.x;
        }
        if point.y > self.max_y {
            self.max_y = point.y;
        }
    }

    pub fn min(&self) -> PixelPoint {
        PixelPoint::new(self.min_x, self.min_y)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        is_point_in_rect(
            point.x,
            point.y,
            self.min_x,
            self.min_y,
            self.width(),
            self.height(),
        )
    }

    /// Same size, moved so that the minimum corner lands on `origin`.
    pub fn placed_at(&self, origin: PixelPoint) -> Self {
        Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x + self.width(),
            max_y: origin.y + self.height(),
        }
    }

    pub fn grow(&self, margin: i32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_coordinate(2.5), Some(3));
        assert_eq!(round_coordinate(-2.5), Some(-2));
        assert_eq!(round_coordinate(1.49), Some(1));
        assert_eq!(round_coordinate(f32::NAN), None);
        assert_eq!(round_coordinate(f32::INFINITY), None);
        assert_eq!(PixelPoint::from_pointer(1.6, f32::NEG_INFINITY), None);
    }

    #[test]
    fn huge_coordinates_are_limited() {
        assert_eq!(round_coordinate(3.0e9), Some(COORDINATE_LIMIT));
        assert_eq!(round_coordinate(-3.0e9), Some(-COORDINATE_LIMIT));
        assert_eq!(round_coordinate(f32::MAX), Some(COORDINATE_LIMIT));

        let far = PixelPoint::from_pointer(-3.0e9, 3.0e9).unwrap();
        let mut bounds = BoundingBox::from_point(far);
        bounds.widen(PixelPoint::new(COORDINATE_LIMIT, -COORDINATE_LIMIT));
        assert_eq!(bounds.width(), 2 * COORDINATE_LIMIT);
        assert_eq!(bounds.grow(24).placed_at(far).max_x, COORDINATE_LIMIT + 48);
    }

    #[test]
    fn clamp_limits_both_sides() {
        assert_eq!(clamp(-4, 0, 100), 0);
        assert_eq!(clamp(104, 0, 100), 100);
        assert_eq!(clamp(50, 0, 100), 50);
    }

    #[test]
    fn rect_test_is_inclusive() {
        assert!(is_point_in_rect(15, 15, 5, 5, 10, 10));
        assert!(is_point_in_rect(5, 5, 5, 5, 10, 10));
        assert!(!is_point_in_rect(16, 10, 5, 5, 10, 10));
        assert!(!is_point_in_rect(10, 4, 5, 5, 10, 10));
    }

    #[test]
    fn widen_is_monotonic() {
        let mut bounds = BoundingBox::from_point(PixelPoint::new(5, 5));
        assert!(bounds.is_degenerate());
        bounds.widen(PixelPoint::new(15, 2));
        bounds.widen(PixelPoint::new(7, 7));
        assert_eq!(
            bounds,
            BoundingBox {
                min_x: 5,
                min_y: 2,
                max_x: 15,
                max_y: 7
            }
        );
    }

    #[test]
    fn placed_keeps_size() {
        let mut bounds = BoundingBox::from_point(PixelPoint::new(5, 5));
        bounds.widen(PixelPoint::new(15, 20));
        let placed = bounds.placed_at(PixelPoint::new(-3, 40));
        assert_eq!(placed.min(), PixelPoint::new(-3, 40));
        assert_eq!((placed.width(), placed.height()), (10, 15));
        assert_eq!(placed.grow(2).width(), 14);
    }
}
