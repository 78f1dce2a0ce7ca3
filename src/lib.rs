//! UMR Tooltips: hover context for UMR annotation documents
//!
//! Builds a lookup from every node identifier in a UMR document to the context
//! it was first introduced in, so an editor can show that context on hover.
//!
//! # Core Concepts
//!
//! - **Sentence blocks**: a `# :: snt` header (sentence text, gloss lines)
//!   followed by a sentence-level PENMAN graph
//! - **Document graphs**: document-level graphs, used as a fallback for
//!   identifiers no sentence graph binds
//! - **Tooltip cache**: identifier → first-occurrence context, written once
//!
//! # Example
//!
//! ```
//! use umr_tooltips::{render_identifier, DocumentIndexer, IndexerConfig};
//!
//! let document = "# :: snt 1\nThe dog\n# sentence level graph:\n(d / dog)\n";
//! let cache = DocumentIndexer::new(IndexerConfig::default())
//!     .unwrap()
//!     .build(document)
//!     .unwrap();
//!
//! assert!(cache.contains("d"));
//! assert!(render_identifier(&cache, "d").unwrap().contains("(**d** / dog)"));
//! ```

pub mod analysis;
pub mod config;
pub mod graph;
pub mod render;

pub use analysis::{
    DocumentIndexer, GlossEntry, IndexError, IndexReport, IndexWarning, IndexerConfig,
    TooltipCache, TooltipEntry,
};
pub use config::{ConfigError, MarkerConfig};
pub use graph::{DecodeError, GraphDecoder, GraphError, NodeInstance, PenmanDecoder};
pub use render::{align_columns, render_identifier, render_tooltip};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
