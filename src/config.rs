//! Marker configuration
//!
//! The annotation markers recognised by the segment extractor and header
//! cleaner. Defaults match the UMR release format; a YAML file may override
//! any subset of them:
//!
//! ```yaml
//! sentence_header: "# ::snt"
//! document_graph: "# document level annotation:"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or validating marker configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("marker `{0}` must not be empty")]
    EmptyMarker(&'static str),

    #[error("failed to build pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Marker strings delimiting the regions of an annotation document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Opens a sentence block; the header runs from here to the graph marker
    pub sentence_header: String,
    /// Introduces a sentence-level graph
    pub sentence_graph: String,
    /// Introduces a document-level graph
    pub document_graph: String,
    /// Prefix of token-index lines (`#tk 1 2 3`)
    pub token_index: String,
    /// Prefix of every annotation-internal marker; also ends a graph region
    pub marker_char: char,
    /// List-item prefix at the start of a line; also ends a graph region
    pub list_item: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            sentence_header: "# :: snt".to_string(),
            sentence_graph: "# sentence level graph:".to_string(),
            document_graph: "# document level graph:".to_string(),
            token_index: "#tk".to_string(),
            marker_char: '#',
            list_item: "-".to_string(),
        }
    }
}

impl MarkerConfig {
    /// Parse from YAML; absent fields keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Reject markers that would match everywhere
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("sentence_header", &self.sentence_header),
            ("sentence_graph", &self.sentence_graph),
            ("document_graph", &self.document_graph),
            ("token_index", &self.token_index),
            ("list_item", &self.list_item),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyMarker(name));
            }
        }
        if self.marker_char.is_whitespace() {
            return Err(ConfigError::EmptyMarker("marker_char"));
        }
        Ok(())
    }
}
