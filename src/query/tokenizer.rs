use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A balanced quoted run, or a run of non-whitespace, non-quote characters.
/// A stray `"` matches neither alternative and is skipped by the scan.
const TOKEN_PATTERN: &str = r#""([^"]*)"|([^\s"]+)"#;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// One unit of a search query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchToken {
    /// Token text with the surrounding quotes removed
    pub term: String,
    /// Quoted tokens always match exactly
    pub in_quotes: bool,
}

impl SearchToken {
    pub fn new(term: impl Into<String>, in_quotes: bool) -> Self {
        Self {
            term: term.into(),
            in_quotes,
        }
    }

    pub fn bare(term: impl Into<String>) -> Self {
        Self::new(term, false)
    }

    pub fn quoted(term: impl Into<String>) -> Self {
        Self::new(term, true)
    }

    /// Check whether this is an unquoted `and`/`or` keyword
    pub fn operator(&self) -> Option<Operator> {
        if self.in_quotes {
            return None;
        }
        match self.term.to_lowercase().as_str() {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            _ => None,
        }
    }
}

/// Boolean operator joining two adjacent match terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    And,
    Or,
}

/// Split a raw query string into search tokens.
///
/// Whitespace separates tokens except inside a balanced pair of double
/// quotes. Quotes always delimit tokens, so `"John Smith"Jack` yields two
/// tokens. An unterminated quote is dropped and the remainder is read as bare
/// words. Tokens that are blank after stripping are discarded, so empty input
/// yields an empty sequence.
pub fn tokenize(query: &str) -> Vec<SearchToken> {
    token_regex()
        .captures_iter(query)
        .filter_map(|caps| {
            if let Some(quoted) = caps.get(1) {
                let term = quoted.as_str();
                if term.trim().is_empty() {
                    None
                } else {
                    Some(SearchToken::quoted(term))
                }
            } else {
                caps.get(2).map(|bare| SearchToken::bare(bare.as_str()))
            }
        })
        .collect()
}
