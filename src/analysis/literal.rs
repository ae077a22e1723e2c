// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Free-text analysis.

use super::{Analyzer, AnalyzerConfig, Token, TokenType};
use crate::types::Position;
use crate::utils::{is_word_boundary, normalize};

/// Splits on anything non-alphanumeric, folds case and diacritics, drops stop
/// words and over-long tokens.
#[derive(Debug, Clone)]
pub struct LiteralAnalyzer {
    config: AnalyzerConfig,
}

impl LiteralAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        LiteralAnalyzer { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for LiteralAnalyzer {
    fn default() -> Self {
        LiteralAnalyzer::new(AnalyzerConfig::default())
    }
}

impl Analyzer for LiteralAnalyzer {
    fn analyze(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position: Position = 0;

        for word in input.split(is_word_boundary).filter(|w| !w.is_empty()) {
            let text = normalize(word);
            let keep = !text.is_empty()
                && !self.config.is_stop_word(&text)
                && text.chars().count() <= self.config.max_token_len;
            if keep {
                tokens.push(Token {
                    text,
                    token_type: TokenType::Literal,
                    position,
                });
            }
            position += 1;
        }

        tokens
    }
}
