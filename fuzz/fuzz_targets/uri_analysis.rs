// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! URI and literal analysis of arbitrary text.
//!
//! Percent escapes, multi-byte characters and stray brackets all come from
//! untrusted records. Analysis must never panic, and the token stream it
//! produces must stay indexable.

#![no_main]

use arbor::{Analyzer, AnalyzerConfig, LiteralAnalyzer, UriAnalyzer, UriNormalisation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, &str)| {
    let (mode, text) = data;
    let normalisation = match mode % 3 {
        0 => UriNormalisation::None,
        1 => UriNormalisation::Localname,
        _ => UriNormalisation::Full,
    };
    let config = AnalyzerConfig::default().with_uri_normalisation(normalisation);

    for tokens in [
        UriAnalyzer::new(config.clone()).analyze(text),
        LiteralAnalyzer::new(config.clone()).analyze(text),
    ] {
        // INVARIANT: positions never go backward
        assert!(tokens.windows(2).all(|w| w[0].position <= w[1].position));

        // INVARIANT: filters applied
        for token in &tokens {
            assert!(!token.text.is_empty());
            assert!(token.text.chars().count() <= config.max_token_len);
            assert!(!config.stop_words.contains(&token.text));
        }
    }
});
