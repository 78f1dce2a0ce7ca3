//! PENMAN notation decoder
//!
//! Reads the bracketed graph notation used by UMR annotation files:
//!
//! ```text
//! (s1t / taste-01
//!     :ARG0 (s1p / person :name (s1n / name :op1 "Edmund" :op2 "Pope"))
//!     :ARG1 (s1f / freedom)
//!     :aspect performance)
//! ```
//!
//! Only the instance structure matters here: every `(variable / concept)`
//! binding becomes a [`NodeInstance`], in the order it is first written.
//! Role names and attribute values are checked for shape but not interpreted.

use super::decoder::{DecodeError, GraphDecoder, GraphError};
use super::instance::NodeInstance;
use std::collections::HashSet;

/// Nesting limit for nodes. Real annotations stay far below this.
const MAX_DEPTH: usize = 256;

/// Characters that end a symbol or role
const DELIMITERS: &[char] = &['(', ')', '/', ':', '~', '"'];

/// Decoder for PENMAN-serialized graphs
#[derive(Debug, Clone, Default)]
pub struct PenmanDecoder {
    max_depth: Option<usize>,
}

impl PenmanDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Decode without the trait's error wrapper
    pub fn decode_instances(&self, graph_text: &str) -> Result<Vec<NodeInstance>, DecodeError> {
        let tokens = lex(graph_text)?;
        if tokens.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            max_depth: self.max_depth.unwrap_or(MAX_DEPTH),
            instances: Vec::new(),
            seen: HashSet::new(),
        };
        parser.parse_node(0)?;

        if let Some(token) = parser.peek() {
            return Err(DecodeError::TrailingInput(token.offset));
        }

        Ok(parser.instances)
    }
}

impl GraphDecoder for PenmanDecoder {
    fn name(&self) -> &str {
        "penman"
    }

    fn decode(&self, graph_text: &str) -> Result<Vec<NodeInstance>, GraphError> {
        Ok(self.decode_instances(graph_text)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind<'a> {
    LParen,
    RParen,
    Slash,
    Role(&'a str),
    Symbol(&'a str),
    Str(&'a str),
}

impl TokenKind<'_> {
    fn describe(&self) -> String {
        match self {
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Slash => "`/`".to_string(),
            TokenKind::Role(role) => format!("role `{}`", role),
            TokenKind::Symbol(symbol) => format!("symbol `{}`", symbol),
            TokenKind::Str(s) => format!("string {}", s),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    kind: TokenKind<'a>,
    offset: usize,
}

fn lex(text: &str) -> Result<Vec<Token<'_>>, DecodeError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        let offset = pos;
        let kind = match c {
            c if c.is_whitespace() => {
                pos += c.len_utf8();
                continue;
            }
            '(' => {
                pos += 1;
                TokenKind::LParen
            }
            ')' => {
                pos += 1;
                TokenKind::RParen
            }
            '/' => {
                pos += 1;
                TokenKind::Slash
            }
            '"' => {
                pos = string_end(text, offset)?;
                TokenKind::Str(&text[offset..pos])
            }
            '~' => {
                // surface alignment such as ~e.2 or ~3,4
                pos = alignment_end(text, offset + 1);
                continue;
            }
            ':' => {
                pos = atom_end(text, offset + 1);
                TokenKind::Role(&text[offset..pos])
            }
            _ => {
                pos = atom_end(text, offset);
                TokenKind::Symbol(&text[offset..pos])
            }
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

fn atom_end(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace() || DELIMITERS.contains(c))
        .map_or(text.len(), |(i, _)| start + i)
}

fn alignment_end(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '.' || *c == ','))
        .map_or(text.len(), |(i, _)| start + i)
}

/// Byte offset just past the closing quote of the string opening at `start`
fn string_end(text: &str, start: usize) -> Result<usize, DecodeError> {
    let mut escaped = false;
    for (i, c) in text[start + 1..].char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok(start + 1 + i + 1);
        }
    }
    Err(DecodeError::UnterminatedString(start))
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    max_depth: usize,
    instances: Vec<NodeInstance>,
    seen: HashSet<&'a str>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_node(&mut self, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::TooDeep(self.max_depth));
        }

        match self.next() {
            Some(Token {
                kind: TokenKind::LParen,
                ..
            }) => {}
            Some(token) => {
                return Err(DecodeError::UnexpectedToken {
                    found: token.kind.describe(),
                    offset: token.offset,
                    expected: "`(`",
                })
            }
            None => return Err(DecodeError::UnexpectedEnd { expected: "`(`" }),
        }

        let (variable, offset) = match self.next() {
            Some(Token {
                kind: TokenKind::Symbol(variable),
                offset,
            }) => (variable, offset),
            Some(token) => {
                return Err(DecodeError::MissingVariable {
                    offset: token.offset,
                })
            }
            None => return Err(DecodeError::UnexpectedEnd { expected: "a variable" }),
        };

        match self.next() {
            Some(Token {
                kind: TokenKind::Slash,
                ..
            }) => {}
            Some(_) => {
                return Err(DecodeError::MissingConcept {
                    variable: variable.to_string(),
                    offset,
                })
            }
            None => return Err(DecodeError::UnexpectedEnd { expected: "`/`" }),
        }

        let concept = match self.next() {
            Some(Token {
                kind: TokenKind::Symbol(concept) | TokenKind::Str(concept),
                ..
            }) => concept,
            Some(_) => {
                return Err(DecodeError::MissingConcept {
                    variable: variable.to_string(),
                    offset,
                })
            }
            None => return Err(DecodeError::UnexpectedEnd { expected: "a concept" }),
        };

        if !self.seen.insert(variable) {
            return Err(DecodeError::DuplicateVariable(variable.to_string()));
        }
        self.instances.push(NodeInstance::new(variable, concept));

        loop {
            match self.next() {
                Some(Token {
                    kind: TokenKind::RParen,
                    ..
                }) => return Ok(()),
                Some(Token {
                    kind: TokenKind::Role(role),
                    offset,
                }) => match self.peek().map(|t| t.kind) {
                    Some(TokenKind::LParen) => self.parse_node(depth + 1)?,
                    Some(TokenKind::Symbol(_) | TokenKind::Str(_)) => self.pos += 1,
                    Some(_) => {
                        return Err(DecodeError::MissingTarget {
                            role: role.to_string(),
                            offset,
                        })
                    }
                    None => {
                        return Err(DecodeError::UnexpectedEnd {
                            expected: "a role target",
                        })
                    }
                },
                Some(token) => {
                    return Err(DecodeError::UnexpectedToken {
                        found: token.kind.describe(),
                        offset: token.offset,
                        expected: "a role or `)`",
                    })
                }
                None => return Err(DecodeError::UnexpectedEnd { expected: "`)`" }),
            }
        }
    }
}
