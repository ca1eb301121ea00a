//! Text, image and gradient components.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub content: String,
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
    #[serde(default)]
    pub alignment: TextAlign,
}

impl Text {
    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: "Arial".to_string(),
            color: "#000000".to_string(),
            alignment: TextAlign::default(),
        }
    }
}

/// Optional image adjustments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
}

/// A placed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image source URL or data URI.
    pub src: String,
    /// Natural size of the source image.
    pub image_width: f64,
    pub image_height: f64,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ImageFilters>,
}

impl Image {
    pub fn new(src: impl Into<String>, image_width: f64, image_height: f64) -> Self {
        Self {
            src: src.into(),
            image_width,
            image_height,
            opacity: 1.0,
            filters: None,
        }
    }

    /// Natural aspect ratio (width / height), if the height is non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.image_height != 0.0).then(|| self.image_width / self.image_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
}

/// A color stop at `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

/// A gradient fill region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub gradient_type: GradientType,
    pub start_color: String,
    pub end_color: String,
    pub start_point: Point,
    pub end_point: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<GradientStop>>,
}

impl Gradient {
    /// All stops including the implicit start and end colors, sorted by offset.
    pub fn resolved_stops(&self) -> Vec<GradientStop> {
        let mut stops = vec![GradientStop {
            offset: 0.0,
            color: self.start_color.clone(),
        }];
        if let Some(extra) = &self.stops {
            stops.extend(extra.iter().cloned());
        }
        stops.push(GradientStop {
            offset: 1.0,
            color: self.end_color.clone(),
        });
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        stops
    }
}
