//! Drawable component definitions for the designer canvas.

mod figure;
mod media;
mod stroke;

pub use figure::{Polygon, Shape, ShapeType, Star};
pub use media::{Gradient, GradientStop, GradientType, Image, ImageFilters, Text, TextAlign};
pub use stroke::{Drawing, DrawingPath, FillRule, Line, Path, Pencil};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a component.
pub type ComponentId = String;

/// Generate a fresh component or layer id.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn unit_scale() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

fn default_true() -> bool {
    true
}

/// Variant-specific geometry and style of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentKind {
    Drawing(Drawing),
    Text(Text),
    Shape(Shape),
    Line(Line),
    Polygon(Polygon),
    Star(Star),
    Pencil(Pencil),
    Image(Image),
    Gradient(Gradient),
    Path(Path),
}

impl ComponentKind {
    /// The variant name as used in the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Drawing(_) => "drawing",
            ComponentKind::Text(_) => "text",
            ComponentKind::Shape(_) => "shape",
            ComponentKind::Line(_) => "line",
            ComponentKind::Polygon(_) => "polygon",
            ComponentKind::Star(_) => "star",
            ComponentKind::Pencil(_) => "pencil",
            ComponentKind::Image(_) => "image",
            ComponentKind::Gradient(_) => "gradient",
            ComponentKind::Path(_) => "path",
        }
    }
}

/// A drawable component.
///
/// The id is fixed at construction; everything else is freely mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub(crate) id: ComponentId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale: Vec2,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl Component {
    /// Create a new component with a generated id.
    pub fn new(kind: ComponentKind, position: Point, width: f64, height: f64) -> Self {
        Self::with_id(generate_id(), kind, position, width, height)
    }

    /// Create a component with a caller-chosen id.
    pub fn with_id(
        id: impl Into<ComponentId>,
        kind: ComponentKind,
        position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            width,
            height,
            rotation: 0.0,
            scale: unit_scale(),
            selected: false,
            visible: true,
            locked: false,
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Axis-aligned bounds with scale applied (rotation ignored).
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width * self.scale.x,
            self.position.y + self.height * self.scale.y,
        )
    }
}
