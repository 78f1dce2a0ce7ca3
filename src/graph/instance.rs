//! Node instances produced by decoding a graph

use serde::{Deserialize, Serialize};

/// A variable bound to a concept at its first mention in one graph
///
/// Identifiers are unique within a single decoded graph but routinely repeat
/// across the graphs of a document (`s1p` in sentence 1 and again in the
/// document-level graph).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeInstance {
    /// Variable name, e.g. `s1t`
    pub identifier: String,
    /// Concept label, e.g. `taste-01`
    pub concept: String,
}

impl NodeInstance {
    pub fn new(identifier: impl Into<String>, concept: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            concept: concept.into(),
        }
    }
}

impl std::fmt::Display for NodeInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} / {})", self.identifier, self.concept)
    }
}
