//! Layout configuration — TOML description of the controls on a surface.
//!
//! ```toml
//! [[slider]]
//! id = "red"
//! min = 0
//! max = 255
//! value = 128
//!
//! [[dual]]
//! id = "price"
//! max = 400
//! low = 100
//! high = 250
//! value_prefix = "$"
//!
//! [color]
//! red = "red"
//! green = "green"
//! blue = "blue"
//! ```
//!
//! Bound attributes accept integers, floats or strings. Floats are truncated,
//! strings are read like declared markup attributes (`"300px"` → 300); missing
//! or unreadable ones fall back to the defaults rather than failing. Geometry
//! must be finite.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::attributes::{parse_leading_int, DeclaredRange, ValueText};
use crate::geometry::{Bounds, TrackGeometry};

/// Errors from loading or validating a layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("control id '{0}' must be non-empty and must not contain '.'")]
    InvalidId(String),

    #[error("duplicate control id '{0}'")]
    DuplicateId(String),

    #[error("control '{id}': track length must be positive (got {value})")]
    TrackLength { id: String, value: f64 },

    #[error("control '{id}': thumb size must be non-negative (got {value})")]
    ThumbSize { id: String, value: f64 },

    #[error("control '{id}': {field} must be finite (got {value})")]
    NotFinite {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("colour channel {channel} references unknown slider '{id}'")]
    UnknownChannel { channel: &'static str, id: String },
}

/// A declared bound: an integer, a float (truncated), markup-style text, or
/// anything else TOML allows (always falls back to the default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
    Other(toml::Value),
}

impl AttrValue {
    fn resolve(value: &Option<AttrValue>, id: &str, name: &str) -> Option<i64> {
        match value {
            None => None,
            Some(AttrValue::Int(v)) => Some(*v),
            Some(AttrValue::Float(v)) if v.is_finite() => Some(v.trunc() as i64),
            Some(AttrValue::Float(v)) => {
                warn!(id, attribute = name, value = %v, "non-finite attribute, using default");
                None
            }
            Some(AttrValue::Other(raw)) => {
                warn!(id, attribute = name, %raw, "unreadable attribute, using default");
                None
            }
            Some(AttrValue::Text(raw)) => {
                let parsed = parse_leading_int(raw);
                if parsed.is_none() {
                    warn!(id, attribute = name, %raw, "malformed attribute, using default");
                }
                parsed
            }
        }
    }
}

fn default_track_length() -> f64 {
    200.0
}

/// Pixel geometry shared by both control kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    #[serde(default = "default_track_length")]
    pub track_length: f64,
    #[serde(default)]
    pub thumb_size: f64,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default)]
    pub origin: f64,
}

impl GeometrySpec {
    pub fn geometry(&self) -> TrackGeometry {
        TrackGeometry::new(self.track_length)
            .with_thumb(self.thumb_size, self.border_width)
            .at_origin(self.origin)
    }

    fn validate(&self, id: &str) -> Result<(), ConfigError> {
        let fields = [
            ("track_length", self.track_length),
            ("thumb_size", self.thumb_size),
            ("border_width", self.border_width),
            ("origin", self.origin),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite {
                id: id.to_string(),
                field,
                value,
            });
        }
        if self.track_length <= 0.0 {
            return Err(ConfigError::TrackLength {
                id: id.to_string(),
                value: self.track_length,
            });
        }
        if self.thumb_size < 0.0 {
            return Err(ConfigError::ThumbSize {
                id: id.to_string(),
                value: self.thumb_size,
            });
        }
        Ok(())
    }
}

impl Default for GeometrySpec {
    fn default() -> Self {
        Self {
            track_length: default_track_length(),
            thumb_size: 0.0,
            border_width: 0.0,
            origin: 0.0,
        }
    }
}

/// One single-thumb slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttrValue>,
    #[serde(flatten)]
    pub geometry: GeometrySpec,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value_prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value_suffix: String,
}

impl SliderSpec {
    /// Bounds and value with `0 / 100 / 50` defaults.
    pub fn declared(&self) -> DeclaredRange {
        DeclaredRange::resolve(
            AttrValue::resolve(&self.min, &self.id, "min"),
            AttrValue::resolve(&self.max, &self.id, "max"),
            AttrValue::resolve(&self.value, &self.id, "value"),
        )
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn value_text(&self) -> ValueText {
        ValueText {
            prefix: self.value_prefix.clone(),
            suffix: self.value_suffix.clone(),
        }
    }
}

/// One two-thumb range selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<AttrValue>,
    #[serde(flatten)]
    pub geometry: GeometrySpec,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value_prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value_suffix: String,
}

impl DualSpec {
    /// Rail bounds (defaults `0 / 100`).
    pub fn rail(&self) -> Bounds {
        DeclaredRange::resolve(
            AttrValue::resolve(&self.min, &self.id, "min"),
            AttrValue::resolve(&self.max, &self.id, "max"),
            None,
        )
        .bounds
    }

    /// Initial thumb values. A missing low sits at the rail minimum and a
    /// missing high at the rail maximum.
    pub fn thumbs(&self) -> (i64, i64) {
        let rail = self.rail();
        let low = AttrValue::resolve(&self.low, &self.id, "low").unwrap_or(rail.min);
        let high = AttrValue::resolve(&self.high, &self.id, "high").unwrap_or(rail.max);
        (low, high)
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn value_text(&self) -> ValueText {
        ValueText {
            prefix: self.value_prefix.clone(),
            suffix: self.value_suffix.clone(),
        }
    }
}

/// Three slider ids aggregated into a colour readout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub red: String,
    pub green: String,
    pub blue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default, rename = "slider", skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<SliderSpec>,
    #[serde(default, rename = "dual", skip_serializing_if = "Vec::is_empty")]
    pub duals: Vec<DualSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
}

impl LayoutConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a layout file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Structural checks only. Bounds are never rejected; they are defaulted
    /// and normalised when controls are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        let ids = self
            .sliders
            .iter()
            .map(|s| (&s.id, &s.geometry))
            .chain(self.duals.iter().map(|d| (&d.id, &d.geometry)));
        for (id, geometry) in ids {
            if id.is_empty() || id.contains('.') {
                return Err(ConfigError::InvalidId(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateId(id.clone()));
            }
            geometry.validate(id)?;
        }

        if let Some(color) = &self.color {
            let slider_ids: HashSet<&str> = self.sliders.iter().map(|s| s.id.as_str()).collect();
            let channels = [("red", &color.red), ("green", &color.green), ("blue", &color.blue)];
            for (channel, id) in channels {
                if !slider_ids.contains(id.as_str()) {
                    return Err(ConfigError::UnknownChannel {
                        channel,
                        id: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Built-in demo layout: an RGB colour mixer and a price range selector.
    pub fn demo() -> Self {
        let channel = |id: &str, label: &str, value: i64| SliderSpec {
            id: id.to_string(),
            label: Some(label.to_string()),
            min: Some(AttrValue::Int(0)),
            max: Some(AttrValue::Int(255)),
            value: Some(AttrValue::Int(value)),
            geometry: GeometrySpec {
                track_length: 256.0,
                ..GeometrySpec::default()
            },
            value_prefix: String::new(),
            value_suffix: String::new(),
        };
        Self {
            sliders: vec![
                channel("red", "Red", 128),
                channel("green", "Green", 64),
                channel("blue", "Blue", 192),
            ],
            duals: vec![DualSpec {
                id: "price".to_string(),
                label: Some("Hotel price".to_string()),
                min: Some(AttrValue::Int(0)),
                max: Some(AttrValue::Int(400)),
                low: Some(AttrValue::Int(100)),
                high: Some(AttrValue::Int(250)),
                geometry: GeometrySpec {
                    track_length: 300.0,
                    thumb_size: 20.0,
                    border_width: 1.0,
                    origin: 0.0,
                },
                value_prefix: "$".to_string(),
                value_suffix: String::new(),
            }],
            color: Some(ColorSpec {
                red: "red".to_string(),
                green: "green".to_string(),
                blue: "blue".to_string(),
            }),
        }
    }
}
