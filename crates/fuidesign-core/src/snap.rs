//! Grid snapping for component positions.

use kurbo::Point;

/// Default grid size in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Check whether a grid size can be snapped to.
pub fn is_valid_grid_size(grid_size: f64) -> bool {
    grid_size.is_finite() && grid_size > 0.0
}

/// Snap a single coordinate to the nearest multiple of `grid_size`.
///
/// Half-way values round toward positive infinity, so `-15` on a grid of
/// `10` lands on `-10`.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size + 0.5).floor() * grid_size
}

/// Snap a point to the nearest grid intersection, each axis independently.
///
/// A zero, negative or non-finite grid size leaves the point unchanged.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    if !is_valid_grid_size(grid_size) {
        return SnapResult::none(point);
    }

    SnapResult {
        point: Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size)),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Snap a point if snapping is enabled.
pub fn snap_point(point: Point, enabled: bool, grid_size: f64) -> SnapResult {
    if enabled {
        snap_to_grid(point, grid_size)
    } else {
        SnapResult::none(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-9, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(13.0, 18.0), 10.0);
        assert_point(result.point, 10.0, 20.0);
        assert!(result.is_snapped());
    }

    #[test]
    fn test_snap_exact_multiple_unchanged() {
        let result = snap_to_grid(Point::new(40.0, -20.0), 10.0);
        assert_point(result.point, 40.0, -20.0);
    }

    #[test]
    fn test_snap_half_way_rounds_up() {
        assert!((snap_value(15.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((snap_value(-15.0, 10.0) - -10.0).abs() < 1e-9);
        assert!((snap_value(-16.0, 10.0) - -20.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_custom_grid() {
        let result = snap_to_grid(Point::new(37.0, 12.0), 25.0);
        assert_point(result.point, 25.0, 0.0);
    }

    #[test]
    fn test_invalid_grid_size_is_noop() {
        for size in [0.0, -10.0, f64::NAN] {
            let result = snap_to_grid(Point::new(13.0, 18.0), size);
            assert_point(result.point, 13.0, 18.0);
            assert!(!result.is_snapped());
        }
    }

    #[test]
    fn test_snap_point_disabled() {
        let result = snap_point(Point::new(13.0, 18.0), false, 10.0);
        assert_point(result.point, 13.0, 18.0);
        assert!(!result.is_snapped());
    }
}
