// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning cell values into typed, positioned tokens.
//!
//! Two pipelines, one per kind of cell:
//!
//! | Analyzer           | Input                       | Token type |
//! |--------------------|-----------------------------|------------|
//! | [`LiteralAnalyzer`]| free text (`"Renaud Delbru"`)| `Literal`  |
//! | [`UriAnalyzer`]    | URIs (`<http://x.org/a_b>`)  | `Uri`      |
//!
//! The traversal core never looks at token types. They are recorded per
//! position in the index so type-aware query front ends can read them back.
//!
//! Everything configurable (stop words, length limits, URI normalisation)
//! lives in one immutable [`AnalyzerConfig`] handed to the analyzers at
//! construction. There is no process-wide stop-word state.

mod literal;
mod uri;

pub use literal::LiteralAnalyzer;
pub use uri::{UriAnalyzer, UriNormalisation};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::types::Position;

/// What kind of value a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Literal,
    Uri,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Literal => "literal",
            TokenType::Uri => "uri",
        }
    }
}

/// One analysed token. Positions are relative to the analysed value and
/// keep gaps where filters removed tokens, so stop words still break phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub token_type: TokenType,
    pub position: Position,
}

/// Common interface of the analysis pipelines.
pub trait Analyzer {
    fn analyze(&self, input: &str) -> Vec<Token>;
}

/// English stop words, the same list classic Lucene analyzers ship.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default minimum token length (in chars) for URI tokens.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Default maximum token length (in chars) for every token.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 256;

/// Immutable analysis settings.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "stopWords": ["the", "of"], "uriNormalisation": "localname" }
/// ```
///
/// An unknown `uriNormalisation` value fails deserialization instead of
/// silently falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub stop_words: BTreeSet<String>,
    pub uri_normalisation: UriNormalisation,
    pub min_token_len: usize,
    pub max_token_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            stop_words: ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            uri_normalisation: UriNormalisation::None,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        AnalyzerConfig::from_json(&json)
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_uri_normalisation(mut self, mode: UriNormalisation) -> Self {
        self.uri_normalisation = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_token_len > self.max_token_len {
            return Err(crate::error::Error::invalid_arg(
                "minTokenLen",
                format!("{} exceeds maxTokenLen {}", self.min_token_len, self.max_token_len),
            ));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}
