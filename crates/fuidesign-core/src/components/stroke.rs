//! Stroke-based components: freehand drawings, lines, pencil strokes and SVG paths.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One stroke of a [`Drawing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingPath {
    pub points: Vec<Point>,
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
}

/// A multi-stroke drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawing {
    pub paths: Vec<DrawingPath>,
}

/// A straight line segment, `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub points: [f64; 4],
    pub stroke: String,
    pub stroke_width: f64,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            points: [start.x, start.y, end.x, end.y],
            stroke: "#000000".to_string(),
            stroke_width: 1.0,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.points[0], self.points[1])
    }

    pub fn end(&self) -> Point {
        Point::new(self.points[2], self.points[3])
    }
}

/// A freehand pencil stroke stored as a flat `[x1, y1, x2, y2, ...]` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pencil {
    pub points: Vec<f64>,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default)]
    pub smoothing: bool,
}

impl Pencil {
    /// Build from points, flattening them into coordinate pairs.
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            points: points.iter().flat_map(|p| [p.x, p.y]).collect(),
            stroke: "#000000".to_string(),
            stroke_width: 2.0,
            smoothing: false,
        }
    }

    /// Iterate the stroke's points. A trailing odd coordinate is ignored.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.chunks_exact(2).map(|c| Point::new(c[0], c[1]))
    }
}

/// SVG fill rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    Nonzero,
    Evenodd,
}

/// An arbitrary SVG path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// SVG path data (`d` attribute).
    pub path_data: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_rule: Option<FillRule>,
}
