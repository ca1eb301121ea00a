//! Component selection and its bounding box.

use crate::components::{Component, ComponentId};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Axis-aligned box enclosing the selected components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.x1 - rect.x0,
            height: rect.y1 - rect.y0,
        }
    }
}

/// Selected component ids plus the cached bounding box.
///
/// Ids keep insertion order for display; membership never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub(crate) components: Vec<ComponentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) bounding_box: Option<BoundingBox>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[ComponentId] {
        &self.components
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.iter().any(|c| c == id)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// The cached bounding box (as of the last recompute).
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    /// Add an id if not already present. Returns true if it was added.
    pub(crate) fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.components.push(id.to_string());
        true
    }

    /// Remove an id. Returns true if it was present.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c != id);
        self.components.len() != before
    }

    /// Replace the selection with a single id.
    pub(crate) fn replace(&mut self, id: &str) {
        self.components.clear();
        self.components.push(id.to_string());
    }

    /// Empty the selection and drop the cached box.
    pub(crate) fn clear(&mut self) {
        self.components.clear();
        self.bounding_box = None;
    }
}

/// Compute the bounding box of the components whose ids are in `selected`.
///
/// Uses each component's position and scaled size; rotation is ignored.
/// Returns `None` when nothing selected exists in `components`.
pub fn compute_bounding_box(
    components: &[Component],
    selected: &[ComponentId],
) -> Option<BoundingBox> {
    if selected.is_empty() {
        return None;
    }

    let mut result: Option<Rect> = None;
    for component in components.iter().filter(|c| selected.iter().any(|id| *id == c.id)) {
        let bounds = component.bounds();
        result = Some(match result {
            Some(r) => r.union(bounds),
            None => bounds,
        });
    }
    result.map(BoundingBox::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, Shape, ShapeType};
    use kurbo::{Point, Vec2};

    fn component(id: &str, x: f64, y: f64, w: f64, h: f64) -> Component {
        Component::with_id(
            id,
            ComponentKind::Shape(Shape::new(ShapeType::Rectangle)),
            Point::new(x, y),
            w,
            h,
        )
    }

    #[test]
    fn test_empty_selection_has_no_box() {
        let components = vec![component("a", 0.0, 0.0, 10.0, 10.0)];
        assert_eq!(compute_bounding_box(&components, &[]), None);
    }

    #[test]
    fn test_single_component_box() {
        let components = vec![component("a", 5.0, 10.0, 20.0, 30.0)];
        let bbox = compute_bounding_box(&components, &["a".to_string()]).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x: 5.0,
                y: 10.0,
                width: 20.0,
                height: 30.0
            }
        );
    }

    #[test]
    fn test_box_spans_selected_only() {
        let mut scaled = component("b", 50.0, 50.0, 10.0, 10.0);
        scaled.scale = Vec2::new(3.0, 2.0);
        let components = vec![
            component("a", 0.0, 10.0, 10.0, 10.0),
            scaled,
            component("c", -100.0, -100.0, 1.0, 1.0),
        ];

        let bbox =
            compute_bounding_box(&components, &["a".to_string(), "b".to_string()]).unwrap();
        assert!((bbox.x - 0.0).abs() < f64::EPSILON);
        assert!((bbox.y - 10.0).abs() < f64::EPSILON);
        assert!((bbox.width - 80.0).abs() < f64::EPSILON);
        assert!((bbox.height - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let components = vec![component("a", 0.0, 0.0, 10.0, 10.0)];
        assert_eq!(compute_bounding_box(&components, &["gone".to_string()]), None);
    }

    #[test]
    fn test_selection_membership() {
        let mut selection = Selection::new();
        assert!(selection.insert("a"));
        assert!(!selection.insert("a"));
        assert!(selection.insert("b"));
        assert_eq!(selection.ids(), &["a".to_string(), "b".to_string()]);

        assert!(selection.remove("a"));
        assert!(!selection.remove("a"));
        assert_eq!(selection.len(), 1);

        selection.replace("c");
        assert_eq!(selection.ids(), &["c".to_string()]);

        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.bounding_box().is_none());
    }

    #[test]
    fn test_bounding_box_rect_conversion() {
        let rect = Rect::new(1.0, 2.0, 4.0, 8.0);
        let bbox = BoundingBox::from(rect);
        assert!((bbox.width - 3.0).abs() < f64::EPSILON);
        assert!((bbox.height - 6.0).abs() < f64::EPSILON);
        assert_eq!(bbox.to_rect(), rect);
    }
}
