//! Annotation records as served by the plot backend.
//!
//! `objectInfo` arrives either as a JSON object or as a string holding one;
//! numeric fields are sometimes sent as strings. Both are accepted.

use std::fmt;

use foundation::math::{GeoPosition, max_finite};
use geometry::{close_ring, polygon_centroid};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotId(pub u64);

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    Point,
    Polyline,
    Polygon,
    Text,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorValue {
    #[serde(default)]
    pub hex: Option<String>,
    /// `#rrggbbaa`.
    #[serde(default)]
    pub hex8: Option<String>,
}

/// One segment of a drawn polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubLine {
    pub start: GeoPosition,
    pub end: GeoPosition,
    pub center_point: GeoPosition,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    #[serde(default)]
    pub drawing_mode: Option<DrawingMode>,
    #[serde(default)]
    pub active_shape_points: Vec<GeoPosition>,
    #[serde(default)]
    pub vertices_position: Option<Vec<GeoPosition>>,
    #[serde(default)]
    pub center_point: Option<GeoPosition>,
    #[serde(default)]
    pub color_value: Option<ColorValue>,
    #[serde(default)]
    pub label_font: Option<String>,
    #[serde(default)]
    pub fire_point: bool,
    #[serde(default)]
    pub plot_class: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub plot_class_value: Option<i64>,
    /// Total length (m) for polylines, area (m²) for polygons.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub active_shape_computed: Option<f64>,
    #[serde(default)]
    pub active_sub_line: Vec<SubLine>,
    #[serde(default)]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotRecord {
    pub id: PlotId,
    #[serde(default)]
    pub tower_name: String,
    #[serde(default, deserialize_with = "object_info_or_string")]
    pub object_info: ObjectInfo,
}

pub const SCENIC_SPOT_CLASS: &str = "scenicSpot";

impl PlotRecord {
    pub fn new(id: u64, name: impl Into<String>, object_info: ObjectInfo) -> Self {
        Self {
            id: PlotId(id),
            tower_name: name.into(),
            object_info,
        }
    }

    pub fn mode(&self) -> DrawingMode {
        self.object_info.drawing_mode.unwrap_or(DrawingMode::Unknown)
    }

    /// Ring or path vertices: `verticesPosition`, else `activeShapePoints`.
    pub fn vertices(&self) -> &[GeoPosition] {
        match &self.object_info.vertices_position {
            Some(v) if !v.is_empty() => v,
            _ => &self.object_info.active_shape_points,
        }
    }

    /// Label anchor: `centerPoint`, else the ring centroid, else the first
    /// vertex.
    pub fn center(&self) -> Option<GeoPosition> {
        if let Some(c) = self.object_info.center_point {
            return Some(c);
        }
        let vertices = self.vertices();
        if self.mode() == DrawingMode::Polygon
            && let Some(c) = polygon_centroid(&close_ring(vertices))
        {
            return Some(c);
        }
        vertices.first().copied()
    }

    pub fn max_altitude(&self) -> Option<f64> {
        max_finite(self.vertices().iter().map(|p| p.altitude))
    }

    pub fn color_hex8(&self) -> Option<&str> {
        self.object_info
            .color_value
            .as_ref()
            .and_then(|c| c.hex8.as_deref())
    }

    pub fn is_scenic_spot(&self) -> bool {
        self.object_info.plot_class.as_deref() == Some(SCENIC_SPOT_CLASS)
    }

    pub fn has_class_value(&self, value: i64) -> bool {
        self.object_info.plot_class_value == Some(value)
    }

    pub fn is_visible(&self) -> bool {
        self.object_info.visible.unwrap_or(true)
    }
}

fn object_info_or_string<'de, D>(deserializer: D) -> Result<ObjectInfo, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(ObjectInfo::default()),
        serde_json::Value::String(s) => serde_json::from_str(&s).map_err(D::Error::custom),
        other => serde_json::from_value(other).map_err(D::Error::custom),
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.filter(|v| v.is_finite()))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64))
}
