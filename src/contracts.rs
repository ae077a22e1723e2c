// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the enumeration protocol.
//!
//! Debug-mode assertions that verify the ordering guarantees every
//! [`DocsNodesAndPositions`](crate::index::DocsNodesAndPositions) source
//! promises. They are zero-cost in release builds (`debug_assert!`).
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Guarantee                                  |
//! |------------------------------|--------------------------------------------|
//! | `check_strictly_increasing`  | stored docs / nodes / positions are sorted |
//! | `check_doc_advance`          | DOCS_INCREASING across advances            |
//! | `check_node_advance`         | NODES_INCREASING within a document         |
//! | `check_position_advance`     | POSITIONS_INCREASING within a node         |
//! | `check_score_finite`         | scorers never emit NaN or infinities       |
//!
//! The combinators merge child streams without re-sorting, so a single
//! out-of-order child silently corrupts every result above it. These checks
//! catch that at the point of emission.

use std::fmt::Debug;

use crate::analysis::{DEFAULT_MAX_TOKEN_LEN, DEFAULT_MIN_TOKEN_LEN};
use crate::node::NodePath;
use crate::types::{DocId, Position};

// ============================================================================
// COMPILE-TIME ASSERTIONS
// ============================================================================

const _: () = {
    assert!(DEFAULT_MIN_TOKEN_LEN <= DEFAULT_MAX_TOKEN_LEN);
    assert!(DEFAULT_MIN_TOKEN_LEN > 0);
};

// ============================================================================
// STORAGE CONTRACTS
// ============================================================================

/// Check that a stored sequence is strictly increasing.
///
/// # Panics (debug builds only)
/// Panics at the first adjacent pair that is out of order or equal.
#[inline]
pub fn check_strictly_increasing<T: Ord + Debug>(items: &[T], what: &str) {
    for (i, pair) in items.windows(2).enumerate() {
        debug_assert!(
            pair[0] < pair[1],
            "Contract violation: {} not strictly increasing - [{}] {:?} >= [{}] {:?}",
            what,
            i,
            pair[0],
            i + 1,
            pair[1]
        );
    }
}

// ============================================================================
// ENUMERATION CONTRACTS
// ============================================================================

/// Check that a document advance moved strictly forward.
#[inline]
pub fn check_doc_advance(prev: Option<DocId>, next: DocId) {
    if let Some(prev) = prev {
        debug_assert!(
            prev < next,
            "Contract violation: DOCS_INCREASING - advanced from doc {} to doc {}",
            prev,
            next
        );
    }
}

/// Check that a node advance moved strictly forward in dewey order.
#[inline]
pub fn check_node_advance(prev: Option<&NodePath>, next: &NodePath) {
    if let Some(prev) = prev {
        debug_assert!(
            prev < next,
            "Contract violation: NODES_INCREASING - advanced from node {} to node {}",
            prev,
            next
        );
    }
}

/// Check that a position advance moved strictly forward.
#[inline]
pub fn check_position_advance(prev: Option<Position>, next: Position) {
    if let Some(prev) = prev {
        debug_assert!(
            prev < next,
            "Contract violation: POSITIONS_INCREASING - advanced from position {} to {}",
            prev,
            next
        );
    }
}

/// Check that a score is a usable ranking key.
#[inline]
pub fn check_score_finite(score: f32, doc: DocId) {
    debug_assert!(
        score.is_finite(),
        "Contract violation: score for doc {} is not finite ({})",
        doc,
        score
    );
}
