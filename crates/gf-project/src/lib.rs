//! gf-project: network file format, validation and loading.

pub mod convert;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use schema::*;
pub use validate::{ValidationError, validate_network};

use gf_network::{Network, NetworkError};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Unknown file format: {path} (expected .json, .yaml or .yml)")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            _ => Err(ProjectError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn parse(content: &str, format: FileFormat) -> ProjectResult<NetworkDef> {
    let def: NetworkDef = match format {
        FileFormat::Json => serde_json::from_str(content)?,
        FileFormat::Yaml => serde_yaml::from_str(content)?,
    };
    validate_network(&def)?;
    Ok(def)
}

pub fn render(def: &NetworkDef, format: FileFormat) -> ProjectResult<String> {
    validate_network(def)?;
    Ok(match format {
        FileFormat::Json => serde_json::to_string_pretty(def)?,
        FileFormat::Yaml => serde_yaml::to_string(def)?,
    })
}

/// Load and validate a network file (JSON or YAML by extension).
pub fn load(path: &Path) -> ProjectResult<NetworkDef> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse(&content, format)
}

pub fn save(path: &Path, def: &NetworkDef) -> ProjectResult<()> {
    let content = render(def, FileFormat::from_path(path)?)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a file straight into a live network.
pub fn load_network(path: &Path) -> ProjectResult<Network> {
    load(path)?.to_network()
}

/// Snapshot a live network to a file.
pub fn save_network(path: &Path, network: &Network) -> ProjectResult<()> {
    save(path, &NetworkDef::from_network(network))
}
