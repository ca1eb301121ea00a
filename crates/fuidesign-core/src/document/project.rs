//! Project and canvas records.

use super::layer::{Layer, LayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name given to the single canvas of a new project.
pub const MAIN_CANVAS_NAME: &str = "Main Canvas";

/// The single drawing surface of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Layers in paint order (first is painted first, i.e. bottom-most).
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Canvas {
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id.clone()).collect()
    }
}

/// A partial update to the canvas record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasUpdate {
    pub name: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
    pub layers: Option<Vec<Layer>>,
}

impl CanvasUpdate {
    pub(crate) fn apply_to(self, canvas: &mut Canvas) {
        if let Some(name) = self.name {
            canvas.name = name;
        }
        if let Some(width) = self.width {
            canvas.width = width;
        }
        if let Some(height) = self.height {
            canvas.height = height;
        }
        if let Some(background_color) = self.background_color {
            canvas.background_color = background_color;
        }
        if let Some(layers) = self.layers {
            canvas.layers = layers;
        }
    }
}

impl From<Canvas> for CanvasUpdate {
    fn from(canvas: Canvas) -> Self {
        Self {
            name: Some(canvas.name),
            width: Some(canvas.width),
            height: Some(canvas.height),
            background_color: Some(canvas.background_color),
            layers: Some(canvas.layers),
        }
    }
}

/// Project metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// The project's canvas, if one has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for a new project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInit {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Free-form project kind chosen in the UI (e.g. "mobile", "web").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

impl ProjectInit {
    pub fn new(
        name: impl Into<String>,
        width: f64,
        height: f64,
        background_color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background_color: background_color.into(),
            project_type: None,
        }
    }
}
