//! Layers and their property bag.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a layer.
pub type LayerId = String;

/// Default width and height for new layers.
pub const DEFAULT_LAYER_SIZE: f64 = 100.0;

fn default_true() -> bool {
    true
}

/// The kind of element a layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Rectangle,
    Circle,
    Text,
    Line,
    Image,
    Polygon,
    Star,
}

impl LayerType {
    /// Lowercase name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Rectangle => "rectangle",
            LayerType::Circle => "circle",
            LayerType::Text => "text",
            LayerType::Line => "line",
            LayerType::Image => "image",
            LayerType::Polygon => "polygon",
            LayerType::Star => "star",
        }
    }

    /// Default name for a layer created from this type, e.g. "Rectangle Layer".
    pub fn default_layer_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Layer", first.to_uppercase(), chars.as_str()),
            None => "Layer".to_string(),
        }
    }
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fill and stroke properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineProperties {
    /// Flat `[x1, y1, x2, y2, ...]` coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_cap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_join: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Free-form, string-keyed layer properties.
///
/// The well-known groups are available as typed views ([`style`](Self::style),
/// [`text`](Self::text), [`line`](Self::line), [`image`](Self::image)); any
/// other key is kept as-is. Updates merge key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerProperties(Map<String, Value>);

impl LayerProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any serializable property group. `None` fields are omitted.
    pub fn from_group<T: Serialize>(group: &T) -> Self {
        match serde_json::to_value(group) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: every key in `updates` overwrites the same key here.
    pub fn merge(&mut self, updates: LayerProperties) {
        for (key, value) in updates.0 {
            self.0.insert(key, value);
        }
    }

    /// Decode a typed view. Keys of the wrong type make the whole view default.
    fn view<T: DeserializeOwned + Default>(&self) -> T {
        serde_json::from_value(Value::Object(self.0.clone())).unwrap_or_default()
    }

    pub fn style(&self) -> StyleProperties {
        self.view()
    }

    pub fn text(&self) -> TextProperties {
        self.view()
    }

    pub fn line(&self) -> LineProperties {
        self.view()
    }

    pub fn image(&self) -> ImageProperties {
        self.view()
    }
}

impl From<Map<String, Value>> for LayerProperties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A drawable layer on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub name: String,
    /// Id of the canvas that owns this layer.
    #[serde(alias = "workspaceId")]
    pub canvas_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub properties: LayerProperties,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

/// Optional fields for a new layer; anything unset gets a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerOptions {
    pub id: Option<LayerId>,
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub properties: Option<LayerProperties>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

impl LayerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<LayerId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn properties(mut self, properties: LayerProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Build a layer, filling geometry and flag defaults.
    pub(crate) fn into_layer(
        self,
        id: LayerId,
        layer_type: LayerType,
        name: String,
        canvas_id: String,
    ) -> Layer {
        Layer {
            id,
            layer_type,
            name,
            canvas_id,
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
            width: self.width.unwrap_or(DEFAULT_LAYER_SIZE),
            height: self.height.unwrap_or(DEFAULT_LAYER_SIZE),
            rotation: Some(self.rotation.unwrap_or(0.0)),
            properties: self.properties.unwrap_or_default(),
            visible: self.visible.unwrap_or(true),
            locked: self.locked.unwrap_or(false),
        }
    }
}

/// A partial update to an existing layer. The id is never changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerUpdate {
    #[serde(rename = "type")]
    pub layer_type: Option<LayerType>,
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub properties: Option<LayerProperties>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

impl LayerUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn properties(mut self, properties: LayerProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Apply to a layer: properties merge into the existing bag, then every
    /// other set field overwrites.
    pub fn apply_to(self, layer: &mut Layer) {
        if let Some(properties) = self.properties {
            layer.properties.merge(properties);
        }
        if let Some(layer_type) = self.layer_type {
            layer.layer_type = layer_type;
        }
        if let Some(name) = self.name {
            layer.name = name;
        }
        if let Some(x) = self.x {
            layer.x = x;
        }
        if let Some(y) = self.y {
            layer.y = y;
        }
        if let Some(width) = self.width {
            layer.width = width;
        }
        if let Some(height) = self.height {
            layer.height = height;
        }
        if let Some(rotation) = self.rotation {
            layer.rotation = Some(rotation);
        }
        if let Some(visible) = self.visible {
            layer.visible = visible;
        }
        if let Some(locked) = self.locked {
            layer.locked = locked;
        }
    }
}

impl From<Layer> for LayerUpdate {
    /// An update that rewrites every field of the target with `layer`'s values.
    fn from(layer: Layer) -> Self {
        Self {
            layer_type: Some(layer.layer_type),
            name: Some(layer.name),
            x: Some(layer.x),
            y: Some(layer.y),
            width: Some(layer.width),
            height: Some(layer.height),
            rotation: layer.rotation,
            properties: Some(layer.properties),
            visible: Some(layer.visible),
            locked: Some(layer.locked),
        }
    }
}
