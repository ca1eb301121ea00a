//! Undo/redo over tagged document edits.
//!
//! Callers capture a [`Snapshot`] of the target before mutating it and push
//! it as a [`HistoryState`]. Undo re-applies the snapshot through the
//! document store's mutators and keeps what it overwrote for redo.

use crate::config::StoreConfig;
use crate::document::{Canvas, DocumentStore, Layer, LayerId};
use crate::storage::Storage;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default bound on each of the undo and redo stacks.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// The kind of edit a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryAction {
    UpdateLayer,
    UpdateWorkspace,
    AddLayer,
    RemoveLayer,
    MultipleAction,
    CanvasUpdate,
}

/// One step of a [`Snapshot::Batch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAction {
    #[serde(rename = "type")]
    pub action: HistoryAction,
    pub state: Snapshot,
}

/// Deep copy of the state an entry restores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Snapshot {
    /// A full layer record, written back over the layer with the same id.
    Layer(Layer),
    /// A full canvas record.
    Canvas(Canvas),
    /// A layer to re-insert into a canvas.
    #[serde(rename_all = "camelCase")]
    AddLayer { canvas_id: String, layer: Layer },
    /// A layer to delete.
    #[serde(rename_all = "camelCase")]
    RemoveLayer { layer_id: LayerId },
    /// The complete layer list of a canvas.
    #[serde(rename_all = "camelCase")]
    Layers { canvas_id: String, layers: Vec<Layer> },
    /// Several edits applied in order as one history step.
    Batch {
        actions: Vec<SubAction>,
        /// State handed to the opposite stack when this batch is applied.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current: Option<Box<Snapshot>>,
    },
    #[default]
    None,
}

/// An entry on the undo or redo stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    #[serde(rename = "actionType")]
    pub action: HistoryAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<LayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    pub previous_state: Snapshot,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryState {
    pub fn new(action: HistoryAction, previous_state: Snapshot) -> Self {
        Self {
            action,
            layer_id: None,
            workspace_id: None,
            previous_state,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn layer(mut self, layer_id: impl Into<LayerId>) -> Self {
        self.layer_id = Some(layer_id.into());
        self
    }

    pub fn workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }
}

/// Linear undo/redo timeline. Any push discards the redo branch.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    undo_stack: Vec<HistoryState>,
    redo_stack: Vec<HistoryState>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// Create a store keeping at most `capacity` entries per stack.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_capacity(config.max_history)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_stack(&self) -> &[HistoryState] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[HistoryState] {
        &self.redo_stack
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn push_bounded(stack: &mut Vec<HistoryState>, entry: HistoryState, capacity: usize) {
        stack.push(entry);
        while stack.len() > capacity {
            stack.remove(0);
        }
    }

    /// Record an edit. Clears the redo stack.
    pub fn push_history(&mut self, entry: HistoryState) {
        Self::push_bounded(&mut self.undo_stack, entry, self.capacity);
        self.redo_stack.clear();
    }

    /// Record a copy of the whole canvas. Returns false without a canvas.
    pub fn add_state<S: Storage>(&mut self, document: &DocumentStore<S>) -> bool {
        let Some(canvas) = document.canvas() else {
            return false;
        };

        let entry = HistoryState::new(
            HistoryAction::CanvasUpdate,
            Snapshot::Canvas(canvas.clone()),
        )
        .workspace(canvas.id.clone());
        self.push_history(entry);
        true
    }

    /// Undo the most recent entry. Returns false if there is nothing to undo.
    pub fn undo<S: Storage>(&mut self, document: &mut DocumentStore<S>) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("Undo {:?}", entry.action);

        let reverse = Self::swap_state(entry, document);
        Self::push_bounded(&mut self.redo_stack, reverse, self.capacity);
        true
    }

    /// Redo the most recently undone entry. Returns false if there is nothing to redo.
    pub fn redo<S: Storage>(&mut self, document: &mut DocumentStore<S>) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("Redo {:?}", entry.action);

        let reverse = Self::swap_state(entry, document);
        Self::push_bounded(&mut self.undo_stack, reverse, self.capacity);
        true
    }

    /// Apply `entry` and return it carrying the state it replaced.
    fn swap_state<S: Storage>(
        entry: HistoryState,
        document: &mut DocumentStore<S>,
    ) -> HistoryState {
        let current = current_state(&entry, document);
        let HistoryState {
            action,
            layer_id,
            workspace_id,
            previous_state,
            timestamp,
        } = entry;

        apply_state(document, action, previous_state);

        HistoryState {
            action,
            layer_id,
            workspace_id,
            previous_state: current,
            timestamp,
        }
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Capture the live state `entry` is about to overwrite.
pub fn current_state<S: Storage>(entry: &HistoryState, document: &DocumentStore<S>) -> Snapshot {
    match entry.action {
        HistoryAction::UpdateLayer => entry
            .layer_id
            .as_deref()
            .and_then(|id| document.get_layer_by_id(id))
            .map(|layer| Snapshot::Layer(layer.clone()))
            .unwrap_or_default(),
        HistoryAction::UpdateWorkspace => entry
            .workspace_id
            .as_deref()
            .and_then(|id| document.canvas_by_id(id))
            .map(|canvas| Snapshot::Canvas(canvas.clone()))
            .unwrap_or_default(),
        HistoryAction::AddLayer | HistoryAction::RemoveLayer => entry
            .workspace_id
            .as_deref()
            .and_then(|id| {
                document.layers_for_canvas(id).map(|layers| Snapshot::Layers {
                    canvas_id: id.to_string(),
                    layers,
                })
            })
            .unwrap_or_default(),
        HistoryAction::MultipleAction => match &entry.previous_state {
            Snapshot::Batch {
                current: Some(current),
                ..
            } => (**current).clone(),
            _ => Snapshot::None,
        },
        HistoryAction::CanvasUpdate => document
            .canvas()
            .map(|canvas| Snapshot::Canvas(canvas.clone()))
            .unwrap_or_default(),
    }
}

/// Write `state` back into the document using the mutator for `action`.
///
/// A snapshot that does not fit the action is ignored.
pub fn apply_state<S: Storage>(
    document: &mut DocumentStore<S>,
    action: HistoryAction,
    state: Snapshot,
) {
    match (action, state) {
        (HistoryAction::UpdateLayer, Snapshot::Layer(layer)) => {
            let id = layer.id.clone();
            document.update_layer(&id, layer.into());
        }
        (HistoryAction::UpdateWorkspace, Snapshot::Canvas(canvas)) => {
            let id = canvas.id.clone();
            document.update_canvas(&id, canvas.into());
        }
        (HistoryAction::CanvasUpdate, Snapshot::Canvas(canvas)) => {
            document.restore_canvas(canvas);
        }
        (HistoryAction::AddLayer, Snapshot::AddLayer { canvas_id, layer }) => {
            document.add_layer_to_canvas(layer, &canvas_id);
        }
        (HistoryAction::RemoveLayer, Snapshot::RemoveLayer { layer_id }) => {
            document.delete_layer(&layer_id);
        }
        (
            HistoryAction::AddLayer | HistoryAction::RemoveLayer,
            Snapshot::Layers { canvas_id, layers },
        ) => {
            document.replace_layers(&canvas_id, layers);
        }
        (HistoryAction::MultipleAction, Snapshot::Batch { actions, .. }) => {
            for sub in actions {
                apply_state(document, sub.action, sub.state);
            }
        }
        (_, Snapshot::None) => {}
        (action, state) => {
            log::debug!("Ignoring {:?} snapshot for {:?}", state, action);
        }
    }
}
