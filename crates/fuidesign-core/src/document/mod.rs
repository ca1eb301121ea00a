//! The project document: one canvas, its layers, and local persistence.
//!
//! Every mutator finishes by reporting the change to the store's
//! [`AutoSave`] tracker, which decides whether to write the document blob
//! to storage right away. Storage faults are logged and never reach the
//! caller; only a missing canvas or project is an error.

mod layer;
mod project;

pub use layer::{
    DEFAULT_LAYER_SIZE, ImageProperties, Layer, LayerId, LayerOptions, LayerProperties,
    LayerType, LayerUpdate, LineProperties, StyleProperties, TextProperties,
};
pub use project::{Canvas, CanvasUpdate, MAIN_CANVAS_NAME, Project, ProjectInit};

use crate::components::generate_id;
use crate::config::StoreConfig;
use crate::error::{DocumentError, DocumentResult};
use crate::storage::{AutoSave, Storage, StorageError, StorageResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The persisted blob. Absent fields leave the live state untouched on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredDocument {
    pub current_project: Option<Project>,
    pub canvas: Option<Canvas>,
    pub selected_layer: Option<LayerId>,
    /// Milliseconds since the Unix epoch at save time.
    pub timestamp: i64,
}

/// Owns the current project, its canvas and the layer selection.
pub struct DocumentStore<S: Storage> {
    storage: Arc<S>,
    storage_key: String,
    autosave: AutoSave,
    current_project: Option<Project>,
    canvas: Option<Canvas>,
    selected_layer: Option<LayerId>,
    /// Unsaved changes relative to the remote project.
    is_dirty: bool,
}

impl<S: Storage> DocumentStore<S> {
    /// Create an empty store. Nothing is read from storage.
    pub fn new(storage: Arc<S>, config: &StoreConfig) -> Self {
        Self {
            storage,
            storage_key: config.storage_key.clone(),
            autosave: AutoSave::new(config.autosave),
            current_project: None,
            canvas: None,
            selected_layer: None,
            is_dirty: false,
        }
    }

    /// Create a store and restore any previously saved document.
    pub fn open(storage: Arc<S>, config: &StoreConfig) -> Self {
        let mut store = Self::new(storage, config);
        store.load_from_storage();
        store
    }

    // --- State access ---

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Layers of the canvas in paint order; empty without a canvas.
    pub fn current_layers(&self) -> &[Layer] {
        self.canvas.as_ref().map(|c| c.layers.as_slice()).unwrap_or(&[])
    }

    pub fn selected_layer(&self) -> Option<&str> {
        self.selected_layer.as_deref()
    }

    /// The selected layer's record, if the selection points at a live layer.
    pub fn selected_layer_data(&self) -> Option<&Layer> {
        let id = self.selected_layer.as_deref()?;
        self.canvas.as_ref()?.layer(id)
    }

    pub fn has_project(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn autosave(&self) -> &AutoSave {
        &self.autosave
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Look up a layer by id.
    pub fn get_layer_by_id(&self, id: &str) -> Option<&Layer> {
        let layer = self.canvas.as_ref()?.layer(id);
        if layer.is_none() {
            log::debug!("Layer not found with id: {}", id);
        }
        layer
    }

    /// The canvas, if its id is `canvas_id`.
    pub fn canvas_by_id(&self, canvas_id: &str) -> Option<&Canvas> {
        self.canvas.as_ref().filter(|c| c.id == canvas_id)
    }

    /// Copy of the layer list of the canvas with id `canvas_id`.
    pub fn layers_for_canvas(&self, canvas_id: &str) -> Option<Vec<Layer>> {
        self.canvas_by_id(canvas_id).map(|c| c.layers.clone())
    }

    // --- Change notification ---

    /// Report a completed mutation; saves if the autosave policy says so.
    fn changed(&mut self) {
        self.autosave.mark_pending();
        if self.autosave.should_save() {
            self.save_to_storage();
        }
    }

    /// Mutation that also dirties the remote project.
    fn edited(&mut self) {
        self.is_dirty = true;
        self.changed();
    }

    /// Save now if any completed mutation has not been persisted.
    /// Returns true if a save succeeded.
    pub fn flush(&mut self) -> bool {
        self.autosave.is_pending() && self.save_to_storage()
    }

    /// Periodic hook for interval autosave. Returns true if a save succeeded.
    pub fn tick(&mut self) -> bool {
        self.autosave.should_save() && self.save_to_storage()
    }

    // --- Project operations ---

    /// Start a fresh project with an empty canvas.
    pub fn initialize_project(&mut self, init: ProjectInit) {
        log::info!("Initializing new project: {}", init.name);

        let canvas = Canvas {
            id: generate_id(),
            name: MAIN_CANVAS_NAME.to_string(),
            width: init.width,
            height: init.height,
            background_color: init.background_color,
            layers: Vec::new(),
        };

        let now = Utc::now();
        self.current_project = Some(Project {
            id: generate_id(),
            name: init.name,
            canvas_id: Some(canvas.id.clone()),
            created_at: now,
            updated_at: now,
        });
        self.canvas = Some(canvas);
        self.selected_layer = None;
        self.is_dirty = false;
        self.changed();
    }

    /// Push the project to the remote API (placeholder: clears the dirty flag).
    pub fn save_project(&mut self) -> DocumentResult<()> {
        let Some(project) = self.current_project.as_mut() else {
            log::warn!("save_project called without a project");
            return Err(DocumentError::NoProject);
        };

        log::info!("Saving project: {}", project.name);
        project.updated_at = Utc::now();
        self.is_dirty = false;
        self.changed();
        Ok(())
    }

    /// Fetch a project from the remote API (placeholder: clears the dirty flag).
    pub fn load_project(&mut self, project_id: &str) {
        log::info!("Loading project: {}", project_id);
        self.is_dirty = false;
    }

    pub fn update_canvas_size(&mut self, width: f64, height: f64) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.width = width;
        canvas.height = height;
        self.edited();
    }

    pub fn update_canvas_background(&mut self, color: impl Into<String>) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.background_color = color.into();
        self.edited();
    }

    /// Apply a partial update to the canvas if its id is `canvas_id`.
    pub fn update_canvas(&mut self, canvas_id: &str, update: CanvasUpdate) -> bool {
        let Some(canvas) = self.canvas.as_mut().filter(|c| c.id == canvas_id) else {
            log::warn!("Canvas not found for update: {}", canvas_id);
            return false;
        };
        update.apply_to(canvas);
        self.drop_missing_selection();
        self.edited();
        true
    }

    /// Replace the whole canvas, keeping the selection only if it still exists.
    pub fn restore_canvas(&mut self, canvas: Canvas) {
        if let Some(project) = self.current_project.as_mut() {
            project.canvas_id = Some(canvas.id.clone());
        }
        self.canvas = Some(canvas);
        self.drop_missing_selection();
        self.edited();
    }

    /// Clear the selection if it names a layer the canvas no longer has.
    fn drop_missing_selection(&mut self) {
        if self.selected_layer.is_some() && self.selected_layer_data().is_none() {
            log::debug!("Selected layer no longer exists, clearing selection");
            self.selected_layer = None;
        }
    }

    // --- Layer operations ---

    /// Create a layer of `layer_type` with a generated id and a type-derived name.
    ///
    /// Fails with [`DocumentError::CanvasNotInitialized`] when there is no canvas.
    pub fn create_layer(
        &mut self,
        layer_type: LayerType,
        options: LayerOptions,
    ) -> DocumentResult<Layer> {
        let Some(canvas) = self.canvas.as_mut() else {
            log::warn!("create_layer called before a canvas exists");
            return Err(DocumentError::CanvasNotInitialized);
        };

        let name = layer_type.default_layer_name();
        let layer = options.into_layer(generate_id(), layer_type, name, canvas.id.clone());
        canvas.layers.push(layer.clone());

        log::debug!("Layer created: {}", layer.name);
        self.edited();
        Ok(layer)
    }

    /// Append a layer, keeping a caller-supplied id and name when given.
    ///
    /// Returns `None` and changes nothing when there is no canvas.
    pub fn add_layer(&mut self, layer_type: LayerType, options: LayerOptions) -> Option<Layer> {
        let Some(canvas) = self.canvas.as_mut() else {
            log::warn!("No canvas, layer not added");
            return None;
        };

        let id = options.id.clone().unwrap_or_else(generate_id);
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| layer_type.as_str().to_string());
        let layer = options.into_layer(id, layer_type, name, canvas.id.clone());
        canvas.layers.push(layer.clone());

        log::debug!("Layer added: {}", layer.name);
        self.edited();
        Some(layer)
    }

    /// Re-add a full layer record to the canvas with id `canvas_id`.
    ///
    /// The record is inserted as-is apart from its canvas link.
    pub fn add_layer_to_canvas(&mut self, mut layer: Layer, canvas_id: &str) -> Option<Layer> {
        let Some(canvas) = self.canvas.as_mut().filter(|c| c.id == canvas_id) else {
            log::warn!("Canvas not found for layer insert: {}", canvas_id);
            return None;
        };
        layer.canvas_id = canvas.id.clone();
        canvas.layers.push(layer.clone());

        log::debug!("Layer re-added: {}", layer.name);
        self.edited();
        Some(layer)
    }

    /// Replace the layer list of the canvas with id `canvas_id`.
    pub fn replace_layers(&mut self, canvas_id: &str, layers: Vec<Layer>) -> bool {
        let Some(canvas) = self.canvas.as_mut().filter(|c| c.id == canvas_id) else {
            log::warn!("Canvas not found for layer replace: {}", canvas_id);
            return false;
        };
        canvas.layers = layers;
        self.drop_missing_selection();
        self.edited();
        true
    }

    /// Update a layer. A properties map in `updates` is merged key by key
    /// into the existing properties. Returns false if the layer was not found.
    pub fn update_layer(&mut self, id: &str, updates: LayerUpdate) -> bool {
        let Some(layer) = self.canvas.as_mut().and_then(|c| c.layer_mut(id)) else {
            log::warn!("Layer not found for update: {}", id);
            return false;
        };
        updates.apply_to(layer);

        log::debug!("Layer updated: {}", id);
        self.edited();
        true
    }

    /// Delete a layer, clearing the selection if it pointed at it.
    pub fn delete_layer(&mut self, id: &str) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let Some(index) = canvas.layer_index(id) else {
            log::warn!("Layer not found for deletion: {}", id);
            return false;
        };
        let removed = canvas.layers.remove(index);

        if self.selected_layer.as_deref() == Some(id) {
            self.selected_layer = None;
        }

        log::debug!("Layer deleted: {}", removed.name);
        self.edited();
        true
    }

    /// Swap a layer with the one painted after it.
    /// Returns false if it is already last or not found.
    pub fn move_layer_up(&mut self, id: &str) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        match canvas.layer_index(id) {
            Some(index) if index + 1 < canvas.layers.len() => {
                canvas.layers.swap(index, index + 1);
                self.edited();
                true
            }
            _ => false,
        }
    }

    /// Swap a layer with the one painted before it.
    /// Returns false if it is already first or not found.
    pub fn move_layer_down(&mut self, id: &str) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        match canvas.layer_index(id) {
            Some(index) if index > 0 => {
                canvas.layers.swap(index, index - 1);
                self.edited();
                true
            }
            _ => false,
        }
    }

    /// Move a layer to `new_index` in paint order.
    /// Returns false if the layer is missing or the index is out of bounds.
    pub fn move_layer(&mut self, id: &str, new_index: usize) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let Some(current) = canvas.layer_index(id) else {
            return false;
        };
        if new_index >= canvas.layers.len() {
            return false;
        }

        let layer = canvas.layers.remove(current);
        log::debug!("Layer moved: {} -> {}", layer.name, new_index);
        canvas.layers.insert(new_index, layer);
        self.edited();
        true
    }

    pub fn toggle_layer_visibility(&mut self, id: &str) -> bool {
        let Some(layer) = self.canvas.as_mut().and_then(|c| c.layer_mut(id)) else {
            return false;
        };
        layer.visible = !layer.visible;

        log::debug!("Layer {} visibility toggled to {}", layer.name, layer.visible);
        self.edited();
        true
    }

    // --- Selection ---

    pub fn select_layer(&mut self, id: Option<&str>) {
        self.selected_layer = id.map(str::to_string);
        log::debug!("Layer selected: {:?}", id);
        self.changed();
    }

    pub fn deselect_layer(&mut self) {
        self.selected_layer = None;
        log::debug!("Layer deselected");
        self.changed();
    }

    // --- Persistence ---

    fn write_blob(&self) -> StorageResult<()> {
        let blob = StoredDocument {
            current_project: self.current_project.clone(),
            canvas: self.canvas.clone(),
            selected_layer: self.selected_layer.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };
        let json = serde_json::to_string(&blob)?;
        self.storage.set(&self.storage_key, &json)
    }

    fn read_blob(&self) -> StorageResult<Option<StoredDocument>> {
        match self.storage.get(&self.storage_key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Write the document blob. Failures are logged and reported as false.
    pub fn save_to_storage(&mut self) -> bool {
        match self.write_blob() {
            Ok(()) => {
                self.autosave.saved();
                log::debug!("Project saved to storage");
                true
            }
            Err(e) => {
                log::error!("Error saving project to storage: {}", e);
                false
            }
        }
    }

    /// Restore state from the stored blob. Fields missing from the blob are
    /// left as they are. Returns true if a blob was found and read.
    pub fn load_from_storage(&mut self) -> bool {
        let blob = match self.read_blob() {
            Ok(Some(blob)) => blob,
            Ok(None) => return false,
            Err(e) => {
                log::error!("Error loading project from storage: {}", e);
                return false;
            }
        };

        if let Some(project) = blob.current_project {
            self.current_project = Some(project);
        }
        if let Some(canvas) = blob.canvas {
            self.canvas = Some(canvas);
        }
        if let Some(selected) = blob.selected_layer {
            self.selected_layer = Some(selected);
        }

        log::info!("Project loaded from storage");
        true
    }

    /// Remove the stored blob and reset the project, canvas and selection.
    pub fn clear_storage(&mut self) {
        if let Err(e) = self.storage.remove(&self.storage_key) {
            log::error!("Error clearing storage: {}", e);
        }
        self.current_project = None;
        self.canvas = None;
        self.selected_layer = None;
        self.autosave.discard();
        log::info!("Project cleared from storage");
    }

    /// Check for a stored blob without loading it.
    pub fn has_stored_data(&self) -> bool {
        self.storage
            .contains(&self.storage_key)
            .unwrap_or_else(|e: StorageError| {
                log::error!("Error checking storage: {}", e);
                false
            })
    }
}
