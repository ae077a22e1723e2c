// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Range construction and evaluation under arbitrary bounds.
//!
//! Construction either rejects the bounds or yields a range whose accepted
//! set, over paths at least as deep as both bounds, is one contiguous run in
//! dewey order.

#![no_main]

use arbitrary::Arbitrary;
use arbor::{NodePath, NodeRange};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    lower: Vec<u8>,
    upper: Vec<u8>,
    level: Option<u8>,
    paths: Vec<Vec<u8>>,
}

fn path(ids: &[u8]) -> NodePath {
    NodePath::from(ids.iter().take(6).map(|&id| u32::from(id % 8)).collect::<Vec<u32>>())
}

fuzz_target!(|input: Input| {
    let lower = path(&input.lower);
    let upper = path(&input.upper);
    let level = input.level.map(|l| usize::from(l % 8));

    let Ok(range) = NodeRange::new(lower.clone(), upper.clone(), level) else {
        return;
    };

    let min_depth = lower.depth().max(upper.depth());
    let mut paths: Vec<NodePath> = input
        .paths
        .iter()
        .map(|ids| path(ids))
        .filter(|p| p.depth() >= min_depth && level.map_or(true, |l| p.depth() == l))
        .collect();
    paths.sort();
    paths.dedup();

    // INVARIANT: no rejected path between two accepted ones
    let accepted: Vec<bool> = paths.iter().map(|p| range.contains(p)).collect();
    if let (Some(first), Some(last)) = (
        accepted.iter().position(|a| *a),
        accepted.iter().rposition(|a| *a),
    ) {
        assert!(
            accepted[first..=last].iter().all(|a| *a),
            "range {} accepts a non-contiguous set",
            range
        );
    }

    // INVARIANT: depth rule
    for p in &paths {
        if range.contains(p) {
            assert!(p.depth() >= min_depth);
        }
    }
});
