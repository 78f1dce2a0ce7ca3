//! Decoder trait defining the graph-notation interface

use super::instance::NodeInstance;
use thiserror::Error;

/// Malformed graph notation
///
/// Always local to one graph: the indexer skips the segment and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("graph text is empty")]
    Empty,

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected {found} at offset {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        offset: usize,
        expected: &'static str,
    },

    #[error("node at offset {offset} has no variable")]
    MissingVariable { offset: usize },

    #[error("node `{variable}` at offset {offset} has no concept")]
    MissingConcept { variable: String, offset: usize },

    #[error("role `{role}` at offset {offset} has no target")]
    MissingTarget { role: String, offset: usize },

    #[error("variable `{0}` is bound more than once")]
    DuplicateVariable(String),

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("unexpected input after the top node at offset {0}")]
    TrailingInput(usize),

    #[error("nesting exceeds {0} levels")]
    TooDeep(usize),
}

/// Errors a decoder can report
#[derive(Debug, Error)]
pub enum GraphError {
    /// The notation itself is malformed
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The decoder failed for a reason unrelated to the input text
    #[error("decoder backend failure: {0}")]
    Backend(String),
}

/// Trait for graph-notation decoders
///
/// # Example
///
/// ```
/// use umr_tooltips::graph::{GraphDecoder, PenmanDecoder};
///
/// let instances = PenmanDecoder::new().decode("(d / dog :mod (b / big))").unwrap();
/// assert_eq!(instances[0].identifier, "d");
/// assert_eq!(instances[1].concept, "big");
/// ```
pub trait GraphDecoder: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Decode one graph into its instances, in first-mention order
    fn decode(&self, graph_text: &str) -> Result<Vec<NodeInstance>, GraphError>;
}

impl<D: GraphDecoder + ?Sized> GraphDecoder for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decode(&self, graph_text: &str) -> Result<Vec<NodeInstance>, GraphError> {
        (**self).decode(graph_text)
    }
}
