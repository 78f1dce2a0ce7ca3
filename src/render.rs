//! Hover tooltip rendering
//!
//! Turns a cache entry into the markdown shown when hovering a node
//! identifier: the sentence lines, the gloss block in a monospace fence, and
//! the graph with its indentation preserved.

use crate::analysis::{GlossColumns, TooltipCache, TooltipEntry};
use regex::{NoExpand, Regex};

const TAB: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";
const SOFT_BREAK: &str = "  \n";

/// Pad every token to its column width
///
/// Tokens are joined by one space and rows by a newline. A token whose
/// column has no width is left as is.
pub fn align_columns(columns: &GlossColumns) -> String {
    columns
        .tokens
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(column, token)| {
                    let width = columns.widths.get(column).copied().unwrap_or(0);
                    format!("{:<width$}", token, width = width)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the tooltip markdown for an entry, bolding `word`
pub fn render_tooltip(entry: &TooltipEntry, word: &str) -> String {
    let text = match entry {
        TooltipEntry::Gloss(gloss) => {
            let mut text = gloss.first_lines.join("\n");
            text.push('\n');
            if !gloss.columns.is_empty() {
                text.push_str("```plaintext\n");
                text.push_str(&align_columns(&gloss.columns));
                text.push_str("\n```\n");
            }
            text.push_str(&gloss.last_line);
            text.push_str("\n\n");
            text.push_str(&indent_markup(&gloss.graph_text));
            text
        }
        TooltipEntry::Graph(graph_text) => indent_markup(graph_text),
    };

    let bold = word_pattern(word);
    text.split('\n')
        .map(|line| match &bold {
            Some(pattern) => pattern
                .replace_all(line, NoExpand(&format!("**{}**", word)))
                .into_owned(),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join(SOFT_BREAK)
}

/// Look up `identifier` and render its tooltip
pub fn render_identifier(cache: &TooltipCache, identifier: &str) -> Option<String> {
    cache
        .get(identifier)
        .map(|entry| render_tooltip(entry, identifier))
}

/// Keep graph indentation visible in markdown
fn indent_markup(graph_text: &str) -> String {
    graph_text
        .replace('\t', TAB)
        .split('\n')
        .map(|line| {
            let body = line.trim_start_matches(' ');
            let indent = line.len() - body.len();
            format!("{}{}", "&nbsp;".repeat(indent), body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn word_pattern(word: &str) -> Option<Regex> {
    if word.is_empty() {
        return None;
    }
    Regex::new(&format!(r"\b{}\b", regex::escape(word))).ok()
}
