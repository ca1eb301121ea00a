//! Drawable components, their selection, and per-move undo/redo.
//!
//! This store is independent of the layer document: it backs drag-and-drop
//! on free components and only records position changes.

use crate::components::{Component, ComponentId};
use crate::config::GridConfig;
use crate::selection::{BoundingBox, Selection, compute_bounding_box};
use crate::snap::{is_valid_grid_size, snap_point};
use chrono::Utc;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A single recorded position change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOperation {
    pub component_id: ComponentId,
    pub start_position: Point,
    pub end_position: Point,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Component list, selection, move history and grid settings.
#[derive(Debug, Clone)]
pub struct ComponentStore {
    /// Components in paint order.
    components: Vec<Component>,
    selection: Selection,
    /// Undo stack of moves (most recent last).
    move_history: Vec<MoveOperation>,
    /// Redo stack of undone moves (most recent last).
    redo_stack: Vec<MoveOperation>,
    is_dragging: bool,
    grid_size: f64,
    snap_to_grid: bool,
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentStore {
    /// Create an empty store with default grid settings (size 10, snapping off).
    pub fn new() -> Self {
        Self::with_grid(GridConfig::default())
    }

    /// Create an empty store with the given grid settings.
    pub fn with_grid(grid: GridConfig) -> Self {
        Self {
            components: Vec::new(),
            selection: Selection::new(),
            move_history: Vec::new(),
            redo_stack: Vec::new(),
            is_dragging: false,
            grid_size: grid.size,
            snap_to_grid: grid.snap,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    fn component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected components in paint order.
    pub fn selected_components(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| self.selection.contains(&c.id))
    }

    /// The cached selection bounding box.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.selection.bounding_box
    }

    /// Compute the selection bounding box from current positions.
    pub fn compute_bounding_box(&self) -> Option<BoundingBox> {
        compute_bounding_box(&self.components, &self.selection.components)
    }

    fn update_bounding_box(&mut self) {
        self.selection.bounding_box = self.compute_bounding_box();
    }

    fn sync_selected_flags(&mut self) {
        for component in &mut self.components {
            component.selected = self.selection.contains(&component.id);
        }
    }

    /// Append a component.
    ///
    /// The caller guarantees the id is not already present.
    pub fn add_component(&mut self, component: Component) {
        log::debug!("Component added: {} ({})", component.id, component.kind.name());
        self.components.push(component);
    }

    /// Remove a component and drop it from the selection.
    pub fn remove_component(&mut self, id: &str) -> Option<Component> {
        let index = self.components.iter().position(|c| c.id == id)?;
        let removed = self.components.remove(index);
        self.deselect_component(id);
        log::debug!("Component removed: {}", id);
        Some(removed)
    }

    /// Select a component, replacing the selection unless `multi_select`.
    pub fn select_component(&mut self, id: &str, multi_select: bool) {
        if multi_select {
            self.selection.insert(id);
        } else {
            self.selection.replace(id);
        }
        self.sync_selected_flags();
        self.update_bounding_box();
    }

    pub fn deselect_component(&mut self, id: &str) {
        self.selection.remove(id);
        if let Some(component) = self.component_mut(id) {
            component.selected = false;
        }
        self.update_bounding_box();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.sync_selected_flags();
    }

    /// Move a component to `new_position`, snapping to the grid when enabled.
    ///
    /// Records the move for undo and discards the redo stack.
    /// Returns false if no component has this id.
    pub fn move_component(&mut self, id: &str, new_position: Point) -> bool {
        let target = snap_point(new_position, self.snap_to_grid, self.grid_size).point;

        let Some(component) = self.component_mut(id) else {
            log::warn!("Component not found for move: {}", id);
            return false;
        };

        let operation = MoveOperation {
            component_id: id.to_string(),
            start_position: component.position,
            end_position: target,
            timestamp: Utc::now().timestamp_millis(),
        };
        self.move_history.push(operation);
        self.redo_stack.clear();

        if let Some(component) = self.component_mut(id) {
            component.position = target;
        }
        if self.selection.contains(id) {
            self.update_bounding_box();
        }

        log::debug!("Component {} moved to ({}, {})", id, target.x, target.y);
        true
    }

    /// Move every selected component by `delta`.
    ///
    /// Each component records its own [`MoveOperation`], so a multi-select
    /// drag takes one undo step per component.
    pub fn move_selected_components(&mut self, delta: Vec2) {
        let targets: Vec<(ComponentId, Point)> = self
            .selected_components()
            .map(|c| (c.id.clone(), c.position + delta))
            .collect();

        for (id, position) in targets {
            self.move_component(&id, position);
        }
    }

    /// Undo the most recent move.
    ///
    /// Returns false if there is nothing to undo. A move whose component has
    /// since been removed still transfers to the redo stack, with no effect.
    pub fn undo_move(&mut self) -> bool {
        let Some(operation) = self.move_history.pop() else {
            return false;
        };

        let start = operation.start_position;
        if let Some(component) = self.component_mut(&operation.component_id) {
            component.position = start;
        } else {
            log::debug!("Undo move skipped, component gone: {}", operation.component_id);
        }

        let touched_selection = self.selection.contains(&operation.component_id);
        self.redo_stack.push(operation);
        if touched_selection {
            self.update_bounding_box();
        }
        true
    }

    /// Redo the most recently undone move.
    ///
    /// Returns false if there is nothing to redo.
    pub fn redo_move(&mut self) -> bool {
        let Some(operation) = self.redo_stack.pop() else {
            return false;
        };

        let end = operation.end_position;
        if let Some(component) = self.component_mut(&operation.component_id) {
            component.position = end;
        } else {
            log::debug!("Redo move skipped, component gone: {}", operation.component_id);
        }

        let touched_selection = self.selection.contains(&operation.component_id);
        self.move_history.push(operation);
        if touched_selection {
            self.update_bounding_box();
        }
        true
    }

    pub fn can_undo_move(&self) -> bool {
        !self.move_history.is_empty()
    }

    pub fn can_redo_move(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn move_history(&self) -> &[MoveOperation] {
        &self.move_history
    }

    pub fn redo_stack(&self) -> &[MoveOperation] {
        &self.redo_stack
    }

    pub fn toggle_snap_to_grid(&mut self) {
        self.snap_to_grid = !self.snap_to_grid;
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    /// Set the grid size. Any value is accepted; snapping is skipped while
    /// the size is not a positive finite number.
    pub fn set_grid_size(&mut self, size: f64) {
        if !is_valid_grid_size(size) {
            log::warn!("Grid size {} disables snapping", size);
        }
        self.grid_size = size;
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }
}
