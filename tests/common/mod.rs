//! Shared test utilities and fixtures.

#![allow(dead_code)]

use arbor::{AnalyzerConfig, Hit, MemoryIndex, TreeDocument, UriNormalisation};

// Re-export canonical test utilities from arbor::testing
pub use arbor::testing::{
    drain_docs, drain_nodes, failing_scorer, freq_scorer, node, postings, scores, term_scorer,
    tuples_doc,
};

// ============================================================================
// INDEXES
// ============================================================================

/// Index documents with the default analyzer config.
pub fn index(docs: &[TreeDocument]) -> MemoryIndex {
    MemoryIndex::from_documents(docs, AnalyzerConfig::default())
}

/// Index documents with localname URI normalisation.
pub fn localname_index(docs: &[TreeDocument]) -> MemoryIndex {
    let config = AnalyzerConfig::default().with_uri_normalisation(UriNormalisation::Localname);
    MemoryIndex::from_documents(docs, config)
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Three small RDF-ish entities, one tuple per (predicate, object) pair.
///
/// - doc 0: Renaud Delbru, with a `givenName` predicate
/// - doc 1: Giovanni Tummarello, mentions renaud in a knows tuple
/// - doc 2: a page titled "renaud delbru homepage"
pub fn people() -> Vec<TreeDocument> {
    vec![
        tuples_doc(&[
            &["<http://xmlns.com/foaf/0.1/givenName>", "Renaud"],
            &["<http://xmlns.com/foaf/0.1/familyName>", "Delbru"],
            &["<http://xmlns.com/foaf/0.1/name>", "Renaud Delbru"],
        ]),
        tuples_doc(&[
            &["<http://xmlns.com/foaf/0.1/givenName>", "Giovanni"],
            &["<http://xmlns.com/foaf/0.1/name>", "Giovanni Tummarello"],
            &["<http://xmlns.com/foaf/0.1/knows>", "Renaud"],
        ]),
        tuples_doc(&[
            &["<http://purl.org/dc/terms/title>", "renaud delbru homepage"],
            &["<http://purl.org/dc/terms/creator>", "Renaud"],
        ]),
    ]
}

/// Global doc ids of hits, in rank order.
pub fn doc_ids(hits: &[Hit]) -> Vec<u32> {
    hits.iter().map(|h| h.doc.get()).collect()
}
