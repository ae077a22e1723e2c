// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! URI analysis.
//!
//! Pipeline per whitespace-separated input token:
//!
//! ```text
//! <http://xmlns.com/foaf/0.1/givenName/>
//!   → strip <…>          http://xmlns.com/foaf/0.1/givenName/
//!   → percent-decode
//!   → normalise          (mode-dependent, see UriNormalisation)
//!   → strip mailto:
//!   → lowercase, stop words, length filter
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Analyzer, AnalyzerConfig, Token, TokenType};
use crate::error::Error;
use crate::types::Position;
use crate::utils::{is_word_boundary, percent_decode};

/// How much of a URI's structure gets indexed as extra tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UriNormalisation {
    /// The URI only, trailing slash removed.
    #[default]
    None,
    /// The URI plus the words of its localname (`givenName` → `given`, `name`).
    Localname,
    /// The URI plus every alphanumeric part of it.
    Full,
}

impl UriNormalisation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UriNormalisation::None => "none",
            UriNormalisation::Localname => "localname",
            UriNormalisation::Full => "full",
        }
    }
}

impl FromStr for UriNormalisation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(UriNormalisation::None),
            "localname" => Ok(UriNormalisation::Localname),
            "full" => Ok(UriNormalisation::Full),
            _ => Err(Error::UnknownNormalisation(s.to_string())),
        }
    }
}

impl TryFrom<String> for UriNormalisation {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for UriNormalisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyzer for URI-valued cells.
#[derive(Debug, Clone)]
pub struct UriAnalyzer {
    config: AnalyzerConfig,
}

impl UriAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        UriAnalyzer { config }
    }

    pub fn normalisation(&self) -> UriNormalisation {
        self.config.uri_normalisation
    }

    /// Raw (pre-filter) token texts for one URI, in emission order.
    fn expand(&self, raw: &str) -> Vec<String> {
        let unwrapped = raw
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(raw);
        let decoded = percent_decode(unwrapped);
        let uri = strip_trailing_slash(&decoded);

        let mut out = vec![uri.to_string()];
        match self.config.uri_normalisation {
            UriNormalisation::None => {}
            UriNormalisation::Localname => {
                if let Some(localname) = localname(uri) {
                    out.extend(localname_words(localname));
                }
            }
            UriNormalisation::Full => {
                out.extend(
                    uri.split(is_word_boundary)
                        .filter(|part| !part.is_empty())
                        .map(str::to_string),
                );
            }
        }
        out
    }

    fn accepts(&self, text: &str) -> bool {
        let len = text.chars().count();
        len >= self.config.min_token_len
            && len <= self.config.max_token_len
            && !self.config.is_stop_word(text)
    }
}

impl Default for UriAnalyzer {
    fn default() -> Self {
        UriAnalyzer::new(AnalyzerConfig::default())
    }
}

impl Analyzer for UriAnalyzer {
    fn analyze(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position: Position = 0;

        for raw in input.split_whitespace() {
            for text in self.expand(raw) {
                let text = text.strip_prefix("mailto:").unwrap_or(&text).to_lowercase();
                if self.accepts(&text) {
                    tokens.push(Token {
                        text,
                        token_type: TokenType::Uri,
                        position,
                    });
                }
                position += 1;
            }
        }

        tokens
    }
}

fn strip_trailing_slash(uri: &str) -> &str {
    match uri.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => uri,
    }
}

/// The part after the last `/` or `#`, if the URI has such a separator.
fn localname(uri: &str) -> Option<&str> {
    let cut = uri.rfind(&['/', '#'][..])?;
    let name = &uri[cut + 1..];
    (!name.is_empty()).then_some(name)
}

/// Split a localname on punctuation and camelCase humps.
fn localname_words(localname: &str) -> Vec<String> {
    let mut words = Vec::new();
    for part in localname.split(is_word_boundary).filter(|p| !p.is_empty()) {
        let mut current = String::new();
        let mut prev_lower = false;
        for c in part.chars() {
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}
