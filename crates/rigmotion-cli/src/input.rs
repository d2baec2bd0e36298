//! Loading configs, scenarios and hierarchies from JSON or YAML files.
//!
//! The format is picked by file extension. Every load also returns a BLAKE3
//! hash of the raw file content for provenance in reports.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Recognized YAML extensions.
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Source format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Json,
    Yaml,
}

impl SourceKind {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase());
        match extension.as_deref() {
            Some(ext) if JSON_EXTENSIONS.contains(&ext) => Ok(SourceKind::Json),
            Some(ext) if YAML_EXTENSIONS.contains(&ext) => Ok(SourceKind::Yaml),
            _ => Err(InputError::UnknownExtension { extension }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Json => "json",
            SourceKind::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed document with provenance.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub source_kind: SourceKind,
    /// BLAKE3 hash of the file content (hex).
    pub source_hash: String,
}

/// Errors that can occur while loading an input file.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// Content did not parse.
    Parse {
        kind: SourceKind,
        message: String,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(
                    f,
                    "unknown file extension '.{}' (expected .json, .yaml or .yml)",
                    ext
                ),
                None => write!(f, "file has no extension (expected .json, .yaml or .yml)"),
            },
            InputError::Parse { kind, message } => {
                write!(f, "{} parse error: {}", kind.as_str().to_uppercase(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads and parses any serde document, dispatching on extension.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, InputError> {
    let source_kind = SourceKind::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value = parse(&content, source_kind)?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    debug!(path = %path.display(), kind = %source_kind, hash = %source_hash, "loaded input");
    Ok(Loaded {
        value,
        source_kind,
        source_hash,
    })
}

/// Parses a document of a known format.
pub fn parse<T: DeserializeOwned>(content: &str, kind: SourceKind) -> Result<T, InputError> {
    match kind {
        SourceKind::Json => serde_json::from_str(content).map_err(|e| InputError::Parse {
            kind,
            message: e.to_string(),
        }),
        SourceKind::Yaml => serde_yaml::from_str(content).map_err(|e| InputError::Parse {
            kind,
            message: e.to_string(),
        }),
    }
}
