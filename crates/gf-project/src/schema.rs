//! Network exchange format.
//!
//! Units: length km, diameter mm, pressure MPa (absolute), temperature °C,
//! injection and flows std m³/s, volumes std m³.

use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDef {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    #[serde(default)]
    pub injection: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub pressure_fixed: bool,
    /// Display-only split of the node volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_segments: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDef {
    pub id: String,
    pub source: String,
    pub target: String,
    pub length: f64,
    pub diameter: f64,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub h1: f64,
    #[serde(default)]
    pub h2: f64,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_segments: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_segments: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_segments: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_segments: Option<Vec<f64>>,
}

impl NodeDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            injection: 0.0,
            pressure: 0.0,
            pressure_fixed: false,
            volume_segments: None,
        }
    }
}

impl EdgeDef {
    /// A pipe with default efficiency and temperature and no stored state.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        length: f64,
        diameter: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            length,
            diameter,
            efficiency: default_efficiency(),
            temperature: default_temperature(),
            h1: 0.0,
            h2: 0.0,
            disabled: false,
            volume_segments: None,
            pressure_segments: None,
            flow_segments: None,
            z_segments: None,
        }
    }
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

fn default_efficiency() -> f64 {
    0.95
}

fn default_temperature() -> f64 {
    15.0
}
