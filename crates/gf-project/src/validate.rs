//! Network file validation.

use crate::schema::{EdgeDef, FORMAT_VERSION, NetworkDef};
use gf_network::segment_count;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Edge {edge}: {field} has {actual} entries, expected {expected}")]
    WrongLength {
        edge: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_network(def: &NetworkDef) -> Result<(), ValidationError> {
    if def.version > FORMAT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: def.version,
        });
    }

    let mut node_ids = HashSet::new();
    for node in &def.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        finite(&format!("node {} injection", node.id), node.injection)?;
        finite(&format!("node {} pressure", node.id), node.pressure)?;
        if let Some(slots) = &node.volume_segments {
            for v in slots {
                finite(&format!("node {} volume_segments", node.id), *v)?;
            }
        }
    }

    let mut edge_ids = HashSet::new();
    for edge in &def.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: edge.id.clone(),
                context: "edges".to_string(),
            });
        }
        for (end, node) in [("source", &edge.source), ("target", &edge.target)] {
            if !node_ids.contains(node.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: node.clone(),
                    context: format!("edge {} {}", edge.id, end),
                });
            }
        }
        if edge.source == edge.target {
            return Err(ValidationError::InvalidValue {
                field: format!("edge {} target", edge.id),
                value: edge.target.clone(),
                reason: "source and target must differ".to_string(),
            });
        }
        validate_edge(edge)?;
    }

    Ok(())
}

fn validate_edge(edge: &EdgeDef) -> Result<(), ValidationError> {
    let scalars = [
        ("length", edge.length),
        ("diameter", edge.diameter),
        ("efficiency", edge.efficiency),
        ("temperature", edge.temperature),
        ("h1", edge.h1),
        ("h2", edge.h2),
    ];
    for (name, value) in scalars {
        finite(&format!("edge {} {}", edge.id, name), value)?;
    }

    let n = segment_count(edge.length);
    let arrays = [
        ("volume_segments", &edge.volume_segments, n),
        ("pressure_segments", &edge.pressure_segments, n),
        ("z_segments", &edge.z_segments, n),
        ("flow_segments", &edge.flow_segments, n - 1),
    ];
    for (field, values, expected) in arrays {
        let Some(values) = values else { continue };
        if values.len() != expected {
            return Err(ValidationError::WrongLength {
                edge: edge.id.clone(),
                field,
                expected,
                actual: values.len(),
            });
        }
        for v in values {
            finite(&format!("edge {} {}", edge.id, field), *v)?;
        }
    }

    if let Some(volumes) = &edge.volume_segments
        && let Some(v) = volumes.iter().find(|v| **v < 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: format!("edge {} volume_segments", edge.id),
            value: v.to_string(),
            reason: "stored volume cannot be negative".to_string(),
        });
    }

    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}
