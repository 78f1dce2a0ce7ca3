//! Shared fixtures for integration tests
//!
//! Small UMR documents in the release layout: sentence blocks with an
//! interlinear gloss, followed by document-level graphs.

#![allow(dead_code)]

use umr_tooltips::{DocumentIndexer, IndexerConfig, TooltipCache};

/// Two sentences and a document graph; `s1p` is rebound in every graph
pub const EDMUND_POPE: &str = r#"# :: snt 1
Edmund Pope tasted freedom today.
Index: 1 2 3 4
Words: Edmund Pope tasted freedom
Gloss: Edmund Pope taste.PST freedom
#tk 1 2 3 4
# sentence level graph:
(s1t / taste-01
    :ARG0 (s1p / person
        :name (s1n / name :op1 "Edmund" :op2 "Pope"))
    :ARG1 (s1f / free-04
        :ARG1 s1p)
    :temporal (s1t2 / today)
    :aspect performance)

# :: snt 2
He left.
Words: He left
Gloss: 3SG leave.PST
#tk 1 2
# sentence level graph:
(s2l / leave-11
    :ARG0 (s1p / person)
    :aspect performance)

# document level graph:
(s2s0 / sentence
    :coref (s1p / person))
"#;

/// The smallest complete document
pub const SINGLE_DOG: &str = "# :: snt 1\nGloss line one\n#tk 1 2 3\n# sentence level graph:\n(d / dog)\n";

/// Second sentence graph is missing its closing paren
pub const BROKEN_SECOND: &str = "\
# :: snt 1
A dog.
# sentence level graph:
(d / dog)
# :: snt 2
A cat.
# sentence level graph:
(c / cat
";

/// Document graph in the bare-triple form real releases use
pub const TRIPLE_LIST_DOCUMENT: &str = "\
# :: snt 1
A dog barked.
# sentence level graph:
(b / bark-01 :ARG0 (d / dog))

# document level graph:
(s1s0 / sentence
    :temporal ((document-creation-time :before b))
    :modal ((author :full-affirmative b)))
";

pub fn build(document: &str) -> TooltipCache {
    build_with(IndexerConfig::default(), document)
}

pub fn build_with(config: IndexerConfig, document: &str) -> TooltipCache {
    DocumentIndexer::new(config)
        .expect("default markers are valid")
        .build(document)
        .expect("penman decoder never fails fatally")
}
