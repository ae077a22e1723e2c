// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Constrained enumeration over arbitrary postings.
//!
//! The decorator is a pure filter: every emitted node is accepted by the
//! range, node paths stay strictly increasing, and no accepted node of the
//! inner stream goes missing.

#![no_main]

use arbitrary::Arbitrary;
use arbor::testing::{drain_docs, postings, Triple};
use arbor::{ConstrainedNodes, NodePath, NodeRange};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    triples: Vec<(u8, Vec<u8>, Vec<u8>)>,
    lower: Vec<u8>,
    upper: Vec<u8>,
    level: Option<u8>,
}

fn ids(raw: &[u8]) -> Vec<u32> {
    raw.iter().take(4).map(|&id| u32::from(id % 4)).collect()
}

fuzz_target!(|input: Input| {
    let triples: Vec<Triple> = input
        .triples
        .iter()
        .filter(|(_, node, positions)| !node.is_empty() && !positions.is_empty())
        .map(|(doc, node, positions)| {
            let positions = positions.iter().map(|&p| u32::from(p)).collect();
            (u32::from(*doc % 32), ids(node), positions)
        })
        .collect();

    let level = input.level.map(|l| usize::from(l % 5));
    let Ok(range) = NodeRange::new(
        NodePath::from(ids(&input.lower)),
        NodePath::from(ids(&input.upper)),
        level,
    ) else {
        return;
    };

    let unfiltered = drain_docs(&mut postings(triples.clone())).expect("in-memory postings");
    let mut constrained = ConstrainedNodes::new(postings(triples), range.clone());
    let filtered = drain_docs(&mut constrained).expect("in-memory postings");

    // INVARIANT: same candidate documents
    assert_eq!(unfiltered.len(), filtered.len());

    for ((doc, all), (same_doc, kept)) in unfiltered.iter().zip(&filtered) {
        assert_eq!(doc, same_doc);

        // INVARIANT: strictly increasing, all accepted
        assert!(kept.windows(2).all(|w| w[0] < w[1]));
        assert!(kept.iter().all(|n| range.contains(n)));

        // INVARIANT: nothing accepted is dropped
        let expected: Vec<&NodePath> = all.iter().filter(|n| range.contains(n)).collect();
        assert_eq!(expected, kept.iter().collect::<Vec<_>>());
    }
});
