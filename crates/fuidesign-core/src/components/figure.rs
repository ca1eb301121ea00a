//! Filled geometric components: basic shapes, regular polygons and stars.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Primitive outline of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

/// A basic filled shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub shape_type: ShapeType,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Shape {
    pub fn new(shape_type: ShapeType) -> Self {
        Self {
            shape_type,
            fill: "#ffffff".to_string(),
            stroke: "#000000".to_string(),
            stroke_width: 1.0,
        }
    }
}

/// A regular polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Number of sides, always within [`Polygon::MIN_SIDES`]..=[`Polygon::MAX_SIDES`].
    pub sides: u32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Polygon {
    pub const MIN_SIDES: u32 = 3;
    pub const MAX_SIDES: u32 = 12;

    /// Create a polygon, clamping `sides` into the supported range.
    pub fn new(center: Point, radius: f64, sides: u32) -> Self {
        Self {
            center_x: center.x,
            center_y: center.y,
            radius,
            sides: sides.clamp(Self::MIN_SIDES, Self::MAX_SIDES),
            fill: "#ffffff".to_string(),
            stroke: "#000000".to_string(),
            stroke_width: 1.0,
        }
    }

    /// Vertices in drawing order, starting at the top.
    pub fn vertices(&self) -> Vec<Point> {
        let step = std::f64::consts::TAU / self.sides as f64;
        (0..self.sides)
            .map(|i| {
                let angle = i as f64 * step - std::f64::consts::FRAC_PI_2;
                Point::new(
                    self.center_x + self.radius * angle.cos(),
                    self.center_y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// A star with alternating outer and inner points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub num_rays: u32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Star {
    pub const MIN_RAYS: u32 = 3;
    pub const MAX_RAYS: u32 = 20;

    /// Create a star, clamping `num_rays` into the supported range.
    pub fn new(center: Point, outer_radius: f64, inner_radius: f64, num_rays: u32) -> Self {
        Self {
            center_x: center.x,
            center_y: center.y,
            outer_radius,
            inner_radius,
            num_rays: num_rays.clamp(Self::MIN_RAYS, Self::MAX_RAYS),
            fill: "#ffffff".to_string(),
            stroke: "#000000".to_string(),
            stroke_width: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_sides_clamped() {
        assert_eq!(Polygon::new(Point::ZERO, 10.0, 1).sides, 3);
        assert_eq!(Polygon::new(Point::ZERO, 10.0, 6).sides, 6);
        assert_eq!(Polygon::new(Point::ZERO, 10.0, 40).sides, 12);
    }

    #[test]
    fn test_polygon_vertices() {
        let poly = Polygon::new(Point::new(50.0, 50.0), 10.0, 4);
        let verts = poly.vertices();
        assert_eq!(verts.len(), 4);
        // First vertex at the top
        assert!((verts[0].x - 50.0).abs() < 1e-9);
        assert!((verts[0].y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_rays_clamped() {
        assert_eq!(Star::new(Point::ZERO, 10.0, 5.0, 0).num_rays, 3);
        assert_eq!(Star::new(Point::ZERO, 10.0, 5.0, 25).num_rays, 20);
    }
}
