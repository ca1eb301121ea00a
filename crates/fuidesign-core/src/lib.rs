//! FUI Designer Core Library
//!
//! Platform-agnostic state for the FUI designer: the layer document with
//! local persistence, free components with move undo, and generic history.

pub mod component_store;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod selection;
pub mod snap;
pub mod storage;

pub use component_store::{ComponentStore, MoveOperation};
pub use components::{Component, ComponentId, ComponentKind};
pub use config::{DEFAULT_STORAGE_KEY, GridConfig, StoreConfig};
pub use document::{
    Canvas, CanvasUpdate, DocumentStore, Layer, LayerId, LayerOptions, LayerProperties,
    LayerType, LayerUpdate, Project, ProjectInit,
};
pub use error::{DocumentError, DocumentResult};
pub use history::{HistoryAction, HistoryState, HistoryStore, Snapshot, SubAction};
pub use selection::{BoundingBox, Selection};
pub use snap::{DEFAULT_GRID_SIZE, SnapResult, snap_point, snap_to_grid};
pub use storage::{AutoSave, MemoryStorage, SaveMode, Storage, StorageError, StorageResult};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
