//! Document indexing pipeline
//!
//! Turns a UMR annotation document into a node tooltip cache.
//!
//! # Architecture
//!
//! - **SegmentExtractor**: finds sentence blocks (header + graph) and
//!   document-level graphs by their markers
//! - **HeaderCleaner**: strips token-index lines and marker tokens from
//!   sentence headers
//! - **build_columns**: tokenizes the gloss block and computes column widths
//! - **DocumentIndexer**: decodes every graph and merges instances into the
//!   first-occurrence [`TooltipCache`]
//!
//! # Example
//!
//! ```
//! use umr_tooltips::analysis::{DocumentIndexer, IndexerConfig};
//!
//! let document = "# :: snt 1\nGloss line one\n#tk 1 2 3\n# sentence level graph:\n(d / dog)\n";
//!
//! let indexer = DocumentIndexer::new(IndexerConfig::default()).unwrap();
//! let cache = indexer.build(document).unwrap();
//!
//! let entry = cache.get("d").unwrap().as_gloss().unwrap();
//! assert_eq!(entry.first_lines, vec!["1", "Gloss line one"]);
//! assert_eq!(entry.graph_text, "(d / dog)");
//! ```

mod cache;
mod gloss;
mod header;
mod indexer;
mod segments;
mod types;

pub use cache::TooltipCache;
pub use gloss::{build_columns, AlignmentError, GlossColumns};
pub use header::{HeaderCleaner, HeaderLayout};
pub use indexer::DocumentIndexer;
pub use segments::SegmentExtractor;
pub use types::{
    GlossEntry, GraphLevel, IndexError, IndexReport, IndexWarning, IndexerConfig,
    SentenceSegment, TooltipEntry,
};

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SENTENCES: &str = "\
# :: snt 1
Words: Edmund Pope
Gloss: Edmund Pope
#tk 1 2
# sentence level graph:
(s1p / person
    :name (s1n / name :op1 \"Edmund\" :op2 \"Pope\"))

# :: snt 2
Words: he left
Gloss: 3SG leave.PST
#tk 1 2
# sentence level graph:
(s2l / leave-11
    :ARG0 (s1p / person))

# document level graph:
(s2s0 / sentence
    :coref (s1p / person))
";

    #[test]
    fn test_first_occurrence_across_sentences() {
        let indexer = DocumentIndexer::new(IndexerConfig::default()).unwrap();
        let cache = indexer.build(TWO_SENTENCES).unwrap();

        // s1p is rebound in sentence 2 and in the document graph
        let entry = cache.get("s1p").unwrap().as_gloss().unwrap();
        assert_eq!(entry.first_lines, vec!["1", "Words: Edmund Pope"]);
        assert!(entry.graph_text.starts_with("(s1p / person"));

        assert_eq!(
            cache.identifiers().collect::<Vec<_>>(),
            vec!["s1p", "s1n", "s2l", "s2s0"]
        );
        assert!(cache.get("s2s0").unwrap().is_fallback());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = DocumentIndexer::new(IndexerConfig::default())
            .unwrap()
            .build(TWO_SENTENCES)
            .unwrap();
        let parallel = DocumentIndexer::new(IndexerConfig::default().with_parallel(true))
            .unwrap()
            .build(TWO_SENTENCES)
            .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(
            serde_json::to_string(&sequential).unwrap(),
            serde_json::to_string(&parallel).unwrap()
        );
    }
}
