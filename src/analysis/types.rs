//! Core types for the document indexing pipeline

use super::cache::TooltipCache;
use super::gloss::{AlignmentError, GlossColumns};
use crate::config::MarkerConfig;
use crate::graph::{DecodeError, GraphError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A sentence block: header text and the graph that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSegment<'a> {
    /// Raw text between the header marker and the graph marker
    pub header: &'a str,
    /// Trimmed graph notation
    pub graph_text: &'a str,
}

/// Which pass a graph came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphLevel {
    Sentence,
    Document,
}

impl fmt::Display for GraphLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphLevel::Sentence => write!(f, "sentence"),
            GraphLevel::Document => write!(f, "document"),
        }
    }
}

/// Context recorded for an identifier first seen in a sentence graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossEntry {
    /// Sentence text and the line after it
    pub first_lines: Vec<String>,
    /// Aligned gloss block
    pub columns: GlossColumns,
    /// Final header line; empty when the header ends with a newline
    pub last_line: String,
    /// The sentence graph the identifier was bound in
    pub graph_text: String,
}

/// One cache value
///
/// Serializes as a gloss record object or, for the document-level
/// fallback, as the bare graph string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TooltipEntry {
    Gloss(GlossEntry),
    Graph(String),
}

impl TooltipEntry {
    /// Graph text regardless of entry kind
    pub fn graph_text(&self) -> &str {
        match self {
            TooltipEntry::Gloss(entry) => &entry.graph_text,
            TooltipEntry::Graph(text) => text,
        }
    }

    pub fn as_gloss(&self) -> Option<&GlossEntry> {
        match self {
            TooltipEntry::Gloss(entry) => Some(entry),
            TooltipEntry::Graph(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TooltipEntry::Graph(_))
    }
}

/// Configuration for an indexing run
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Record gloss context for sentence graphs; plain mode stores the graph text
    pub with_gloss: bool,
    /// Decode segments on the rayon pool before merging
    pub parallel: bool,
    /// Markers delimiting document regions
    pub markers: MarkerConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            with_gloss: true,
            parallel: false,
            markers: MarkerConfig::default(),
        }
    }
}

impl IndexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentence entries hold only the graph text
    pub fn plain() -> Self {
        Self {
            with_gloss: false,
            ..Self::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }
}

/// A non-fatal problem met while indexing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexWarning {
    #[error("{level} graph {segment} skipped: {error}")]
    Decode {
        level: GraphLevel,
        segment: usize,
        error: DecodeError,
    },

    #[error("sentence graph {segment} has unaligned gloss: {error}")]
    Alignment { segment: usize, error: AlignmentError },
}

/// Fatal indexing errors
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("{level} graph {segment}: {source}")]
    Decoder {
        level: GraphLevel,
        segment: usize,
        #[source]
        source: GraphError,
    },
}

/// Result of indexing one document
#[derive(Debug, Clone, Default)]
pub struct IndexReport {
    pub cache: TooltipCache,
    /// Segments skipped or degraded, in processing order
    pub warnings: Vec<IndexWarning>,
    pub sentence_segments: usize,
    pub document_segments: usize,
}

impl IndexReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: IndexWarning) {
        self.warnings.push(warning);
    }

    /// Number of segments whose graph failed to decode
    pub fn skipped_segments(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, IndexWarning::Decode { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gloss_entry() -> GlossEntry {
        GlossEntry {
            first_lines: vec!["1".into(), "Gloss line one".into()],
            columns: GlossColumns::empty(),
            last_line: String::new(),
            graph_text: "(d / dog)".into(),
        }
    }

    #[test]
    fn test_gloss_entry_serializes_camel_case() {
        let value = serde_json::to_value(TooltipEntry::Gloss(gloss_entry())).unwrap();
        assert_eq!(
            value,
            json!({
                "firstLines": ["1", "Gloss line one"],
                "columns": { "tokens": [], "widths": [] },
                "lastLine": "",
                "graphText": "(d / dog)"
            })
        );
    }

    #[test]
    fn test_fallback_serializes_as_string() {
        let value = serde_json::to_value(TooltipEntry::Graph("(s / sentence)".into())).unwrap();
        assert_eq!(value, json!("(s / sentence)"));
    }

    #[test]
    fn test_entry_deserializes_both_shapes() {
        let gloss: TooltipEntry = serde_json::from_value(json!({
            "firstLines": [],
            "columns": { "tokens": [["a"]], "widths": [1] },
            "lastLine": "",
            "graphText": "(a / a)"
        }))
        .unwrap();
        assert!(!gloss.is_fallback());
        assert_eq!(gloss.as_gloss().unwrap().columns.widths, vec![1]);

        let fallback: TooltipEntry = serde_json::from_value(json!("(b / b)")).unwrap();
        assert!(fallback.is_fallback());
        assert_eq!(fallback.graph_text(), "(b / b)");
    }

    #[test]
    fn test_config_modes() {
        assert!(IndexerConfig::default().with_gloss);
        assert!(!IndexerConfig::plain().with_gloss);
        assert!(IndexerConfig::new().with_parallel(true).parallel);
    }

    #[test]
    fn test_warning_messages() {
        let warning = IndexWarning::Decode {
            level: GraphLevel::Document,
            segment: 2,
            error: DecodeError::Empty,
        };
        assert_eq!(warning.to_string(), "document graph 2 skipped: graph text is empty");

        let mut report = IndexReport::new();
        report.add_warning(warning);
        report.add_warning(IndexWarning::Alignment {
            segment: 0,
            error: AlignmentError {
                line: 1,
                expected: 2,
                found: 1,
            },
        });
        assert_eq!(report.skipped_segments(), 1);
    }
}
