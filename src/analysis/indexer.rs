//! Document indexer
//!
//! Extracts segments, decodes each graph and merges the instances into a
//! [`TooltipCache`]. Merging always runs in document order, sentence graphs
//! before document graphs, so with or without parallel decoding the first
//! occurrence of an identifier wins.

use super::cache::TooltipCache;
use super::gloss::{build_columns, AlignmentError, GlossColumns};
use super::header::{HeaderCleaner, HeaderLayout};
use super::segments::SegmentExtractor;
use super::types::{
    GlossEntry, GraphLevel, IndexError, IndexReport, IndexWarning, IndexerConfig,
    SentenceSegment, TooltipEntry,
};
use crate::config::ConfigError;
use crate::graph::{GraphDecoder, GraphError, NodeInstance, PenmanDecoder};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Builds tooltip caches from annotation documents
pub struct DocumentIndexer<D = PenmanDecoder> {
    decoder: D,
    extractor: SegmentExtractor,
    cleaner: HeaderCleaner,
    config: IndexerConfig,
}

impl DocumentIndexer<PenmanDecoder> {
    /// Create an indexer using the built-in PENMAN decoder
    pub fn new(config: IndexerConfig) -> Result<Self, ConfigError> {
        Self::with_decoder(PenmanDecoder::new(), config)
    }
}

/// A segment after decoding, waiting to be merged
struct SegmentOutcome {
    level: GraphLevel,
    ordinal: usize,
    decoded: Result<DecodedSegment, GraphError>,
}

struct DecodedSegment {
    instances: Vec<NodeInstance>,
    entry: TooltipEntry,
    alignment: Option<AlignmentError>,
}

impl<D: GraphDecoder> DocumentIndexer<D> {
    pub fn with_decoder(decoder: D, config: IndexerConfig) -> Result<Self, ConfigError> {
        let extractor = SegmentExtractor::new(&config.markers)?;
        let cleaner = HeaderCleaner::new(&config.markers)?;
        Ok(Self {
            decoder,
            extractor,
            cleaner,
            config,
        })
    }

    /// Build the cache for one document
    pub fn build(&self, document: &str) -> Result<TooltipCache, IndexError> {
        self.build_report(document).map(|report| report.cache)
    }

    /// Build the cache and collect the warnings of the run
    ///
    /// Malformed graphs and unaligned gloss blocks are recorded as warnings.
    /// Any other decoder failure aborts the run.
    pub fn build_report(&self, document: &str) -> Result<IndexReport, IndexError> {
        let sentences = self.extractor.sentence_segments(document);
        let documents = self.extractor.document_segments(document);
        debug!(
            sentence = sentences.len(),
            document = documents.len(),
            decoder = self.decoder.name(),
            "extracted graph segments"
        );

        let mut report = IndexReport {
            sentence_segments: sentences.len(),
            document_segments: documents.len(),
            ..IndexReport::new()
        };

        let sentence_outcomes = self.map_segments(&sentences, |ordinal, segment| {
            self.decode_sentence(ordinal, segment)
        });
        let document_outcomes = self.map_segments(&documents, |ordinal, graph_text| {
            self.decode_document(ordinal, graph_text)
        });

        for outcome in sentence_outcomes.into_iter().chain(document_outcomes) {
            self.merge(outcome, &mut report)?;
        }

        info!(
            entries = report.cache.len(),
            fallback = report.cache.fallback_count(),
            skipped = report.skipped_segments(),
            "indexed document"
        );
        Ok(report)
    }

    /// Apply `f` to every segment, on the rayon pool when configured
    ///
    /// Output order always matches input order.
    fn map_segments<T, F>(&self, segments: &[T], f: F) -> Vec<SegmentOutcome>
    where
        T: Sync,
        F: Fn(usize, &T) -> SegmentOutcome + Sync + Send,
    {
        if self.config.parallel {
            segments
                .par_iter()
                .enumerate()
                .map(|(ordinal, segment)| f(ordinal, segment))
                .collect()
        } else {
            segments
                .iter()
                .enumerate()
                .map(|(ordinal, segment)| f(ordinal, segment))
                .collect()
        }
    }

    fn decode_sentence(&self, ordinal: usize, segment: &SentenceSegment<'_>) -> SegmentOutcome {
        let decoded = self.decoder.decode(segment.graph_text).map(|instances| {
            if self.config.with_gloss {
                let (entry, alignment) = self.gloss_entry(segment);
                DecodedSegment {
                    instances,
                    entry: TooltipEntry::Gloss(entry),
                    alignment,
                }
            } else {
                DecodedSegment {
                    instances,
                    entry: TooltipEntry::Graph(segment.graph_text.to_string()),
                    alignment: None,
                }
            }
        });

        SegmentOutcome {
            level: GraphLevel::Sentence,
            ordinal,
            decoded,
        }
    }

    fn decode_document(&self, ordinal: usize, graph_text: &&str) -> SegmentOutcome {
        let decoded = self
            .decoder
            .decode(graph_text)
            .map(|instances| DecodedSegment {
                instances,
                entry: TooltipEntry::Graph(graph_text.to_string()),
                alignment: None,
            });

        SegmentOutcome {
            level: GraphLevel::Document,
            ordinal,
            decoded,
        }
    }

    /// Clean and slice the header into a gloss entry
    ///
    /// An unaligned gloss block degrades to the empty column table.
    fn gloss_entry(&self, segment: &SentenceSegment<'_>) -> (GlossEntry, Option<AlignmentError>) {
        let cleaned = self
            .cleaner
            .collapse_blank_lines(&self.cleaner.clean(segment.header));
        let layout = HeaderLayout::from_cleaned(&cleaned);

        let (columns, alignment) = match build_columns(&layout.middle) {
            Ok(columns) => (columns, None),
            Err(error) => (GlossColumns::empty(), Some(error)),
        };

        let entry = GlossEntry {
            first_lines: layout.first_lines.iter().map(|l| l.to_string()).collect(),
            columns,
            last_line: layout.last_line.to_string(),
            graph_text: segment.graph_text.to_string(),
        };
        (entry, alignment)
    }

    fn merge(&self, outcome: SegmentOutcome, report: &mut IndexReport) -> Result<(), IndexError> {
        let SegmentOutcome {
            level,
            ordinal,
            decoded,
        } = outcome;

        let segment = match decoded {
            Ok(segment) => segment,
            Err(GraphError::Decode(error)) => {
                warn!(%level, segment = ordinal, %error, "skipping malformed graph");
                report.add_warning(IndexWarning::Decode {
                    level,
                    segment: ordinal,
                    error,
                });
                return Ok(());
            }
            Err(source) => {
                return Err(IndexError::Decoder {
                    level,
                    segment: ordinal,
                    source,
                })
            }
        };

        let mut written = 0;
        for instance in segment.instances {
            if report
                .cache
                .insert_first_with(instance.identifier, || segment.entry.clone())
            {
                written += 1;
            }
        }
        debug!(%level, segment = ordinal, written, "merged graph");

        if let (Some(error), true) = (segment.alignment, written > 0) {
            warn!(segment = ordinal, %error, "gloss block not aligned");
            report.add_warning(IndexWarning::Alignment {
                segment: ordinal,
                error,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexer() -> DocumentIndexer {
        DocumentIndexer::new(IndexerConfig::default()).unwrap()
    }

    /// Fails every graph mentioning `boom` with a backend error
    struct FlakyDecoder;

    impl GraphDecoder for FlakyDecoder {
        fn name(&self) -> &str {
            "flaky"
        }

        fn decode(&self, graph_text: &str) -> Result<Vec<NodeInstance>, GraphError> {
            if graph_text.contains("boom") {
                return Err(GraphError::Backend("decoder crashed".into()));
            }
            PenmanDecoder::new().decode(graph_text)
        }
    }

    #[test]
    fn test_empty_document() {
        let report = indexer().build_report("").unwrap();
        assert!(report.cache.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.sentence_segments, 0);
    }

    #[test]
    fn test_single_sentence_entry() {
        let doc = "# :: snt 1\nGloss line one\n#tk 1 2 3\n# sentence level graph:\n(d / dog)\n";
        let cache = indexer().build(doc).unwrap();

        let entry = cache.get("d").unwrap().as_gloss().unwrap();
        assert_eq!(entry.first_lines, vec!["1", "Gloss line one"]);
        assert_eq!(entry.columns, GlossColumns::empty());
        assert_eq!(entry.last_line, "");
        assert_eq!(entry.graph_text, "(d / dog)");
    }

    #[test]
    fn test_gloss_block_columns() {
        let doc = "\
# :: snt 1 Perro grande
Index: 1 2
Words: perro grande
Gloss: dog big
# sentence level graph:
(p / perro :mod (g / grande))";
        let cache = indexer().build(doc).unwrap();

        let entry = cache.get("g").unwrap().as_gloss().unwrap();
        assert_eq!(entry.first_lines, vec!["1 Perro grande", "Index: 1 2"]);
        assert_eq!(
            entry.columns.tokens,
            vec![vec!["Words:", "perro", "grande"], vec!["Gloss:", "dog", "big"]]
        );
        assert_eq!(entry.columns.widths, vec![6, 5, 6]);
        // the header ends with the newline before the graph marker
        assert_eq!(entry.last_line, "");
    }

    #[test]
    fn test_unaligned_gloss_degrades_with_warning() {
        let doc = "\
# :: snt 1
first
a b c
d e
# sentence level graph:
(x / thing)";
        let report = indexer().build_report(doc).unwrap();

        let entry = report.cache.get("x").unwrap().as_gloss().unwrap();
        assert!(entry.columns.is_empty());
        assert_eq!(entry.first_lines, vec!["1", "first"]);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            IndexWarning::Alignment { segment: 0, .. }
        ));
    }

    #[test]
    fn test_marker_only_line_keeps_gloss_block() {
        let doc = "\
# :: snt 1
A dog barks.
Words: perro ladra
#note
Gloss: dog bark
# sentence level graph:
(l / ladrar-01 :ARG0 (p / perro))";
        let report = indexer().build_report(doc).unwrap();

        let entry = report.cache.get("p").unwrap().as_gloss().unwrap();
        assert_eq!(entry.first_lines, vec!["1", "A dog barks."]);
        assert_eq!(
            entry.columns.tokens,
            vec![vec!["Words:", "perro", "ladra"], vec!["Gloss:", "dog", "bark"]]
        );
        assert_eq!(entry.columns.widths, vec![6, 5, 5]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_plain_mode_stores_graph_text() {
        let doc = "# :: snt 1\nGloss\n# sentence level graph:\n(d / dog)";
        let indexer = DocumentIndexer::new(IndexerConfig::plain()).unwrap();
        let cache = indexer.build(doc).unwrap();

        assert_eq!(cache.get("d"), Some(&TooltipEntry::Graph("(d / dog)".into())));
    }

    #[test]
    fn test_decode_failure_is_segment_local() {
        let doc = "\
# :: snt 1
one
# sentence level graph:
(d / dog)
# :: snt 2
two
# sentence level graph:
(c / cat";
        let report = indexer().build_report(doc).unwrap();

        assert_eq!(report.cache.identifiers().collect::<Vec<_>>(), vec!["d"]);
        assert_eq!(report.skipped_segments(), 1);
        assert!(matches!(
            report.warnings[0],
            IndexWarning::Decode {
                level: GraphLevel::Sentence,
                segment: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_backend_failure_propagates() {
        let doc = "# :: snt 1\nx\n# sentence level graph:\n(b / boom)";
        let indexer = DocumentIndexer::with_decoder(FlakyDecoder, IndexerConfig::default()).unwrap();

        let err = indexer.build(doc).unwrap_err();
        assert!(matches!(
            err,
            IndexError::Decoder {
                level: GraphLevel::Sentence,
                segment: 0,
                source: GraphError::Backend(_),
            }
        ));
    }

    #[test]
    fn test_alignment_warning_only_when_entries_written() {
        let doc = "\
# :: snt 1
a
b
# sentence level graph:
(x / thing)
# :: snt 2
first
a b c
d e
# sentence level graph:
(x / other)";
        let report = indexer().build_report(doc).unwrap();
        assert!(report.warnings.is_empty());
    }
}
