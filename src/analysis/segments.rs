//! Segment extraction
//!
//! Locates the graph regions of an annotation document. A sentence block
//! looks like:
//!
//! ```text
//! # :: snt 1   Edmund Pope tasted freedom today
//! Words: Edmund Pope tasted freedom today
//! #tk 1 2 3 4 5
//! # sentence level graph:
//! (s1t / taste-01 ...)
//! ```
//!
//! A graph region runs from its marker to the next marker character, the
//! next list item at the start of a line, or the end of the document.

use super::types::SentenceSegment;
use crate::config::{ConfigError, MarkerConfig};
use regex::Regex;

/// Finds sentence-level and document-level graph regions
#[derive(Debug, Clone)]
pub struct SegmentExtractor {
    /// Header marker, lazily everything up to the sentence-graph marker
    sentence: Regex,
    /// Document-graph marker
    document: Regex,
    /// Where a graph region stops
    boundary: Regex,
}

impl SegmentExtractor {
    pub fn new(markers: &MarkerConfig) -> Result<Self, ConfigError> {
        markers.validate()?;

        let sentence = Regex::new(&format!(
            "(?s){}(.*?){}",
            regex::escape(&markers.sentence_header),
            regex::escape(&markers.sentence_graph),
        ))?;
        let document = Regex::new(&regex::escape(&markers.document_graph))?;
        let boundary = Regex::new(&format!(
            "{}|\n{}",
            regex::escape(&markers.marker_char.to_string()),
            regex::escape(&markers.list_item),
        ))?;

        Ok(Self {
            sentence,
            document,
            boundary,
        })
    }

    /// All `(header, graph)` pairs, in document order
    ///
    /// The header is the raw text between the header marker and the graph
    /// marker, untrimmed. The graph text is trimmed.
    pub fn sentence_segments<'a>(&self, document: &'a str) -> Vec<SentenceSegment<'a>> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.sentence.captures_at(document, pos) {
            let (Some(marker), Some(header)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let end = self.region_end(document, marker.end());
            segments.push(SentenceSegment {
                header: header.as_str(),
                graph_text: document[marker.end()..end].trim(),
            });
            pos = end;
        }

        segments
    }

    /// All document-level graph texts, in document order
    pub fn document_segments<'a>(&self, document: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while let Some(marker) = self.document.find_at(document, pos) {
            let end = self.region_end(document, marker.end());
            segments.push(document[marker.end()..end].trim());
            pos = end;
        }

        segments
    }

    /// Byte offset where the region starting at `start` stops
    fn region_end(&self, document: &str, start: usize) -> usize {
        self.boundary
            .find_at(document, start)
            .map_or(document.len(), |m| m.start())
    }
}
