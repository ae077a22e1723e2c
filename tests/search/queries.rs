//! Structured queries evaluated end to end through the searcher.

use arbor::{DocId, MemoryIndex, NodeRange, Occur, Query, Searcher, TreeDocument};

use crate::common::{doc_ids, index, localname_index, node, people};

fn sorted(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids
}

#[test]
fn phrase_in_a_cell_of_the_same_tuple() {
    let searcher = Searcher::new(vec![localname_index(&people())]);
    let query = Query::tuple(vec![
        (Occur::Must, Query::cell(Query::phrase(["given", "name"]))),
        (Occur::Must, Query::term("renaud")),
    ]);

    let hits = searcher.search(&query, 10).unwrap();
    assert_eq!(doc_ids(&hits), vec![0]);
    assert_eq!(hits[0].nodes, vec![node(&[0])]);
}

#[test]
fn same_terms_in_one_node_need_exact_scope() {
    let searcher = Searcher::new(vec![localname_index(&people())]);
    let query = Query::boolean(vec![
        (Occur::Must, Query::cell(Query::phrase(["given", "name"]))),
        (Occur::Must, Query::term("renaud")),
    ]);
    assert!(searcher.search(&query, 10).unwrap().is_empty());
}

#[test]
fn without_localname_words_the_phrase_is_absent() {
    let searcher = Searcher::new(vec![index(&people())]);
    let query = Query::cell(Query::phrase(["given", "name"]));
    assert!(searcher.search(&query, 10).unwrap().is_empty());
}

#[test]
fn range_restricts_to_a_tuple() {
    let searcher = Searcher::new(vec![index(&people())]);
    let range = NodeRange::between([2], [2]).unwrap();
    let hits = searcher
        .search(&Query::constrained(Query::term("renaud"), range), 10)
        .unwrap();

    assert_eq!(sorted(doc_ids(&hits)), vec![0, 1]);
    for hit in &hits {
        assert_eq!(hit.nodes, vec![node(&[2, 1])]);
    }
}

#[test]
fn prohibited_term_in_another_cell_does_not_exclude() {
    let searcher = Searcher::new(vec![index(&people())]);
    let query = Query::boolean(vec![
        (Occur::Must, Query::term("renaud")),
        (Occur::MustNot, Query::term("delbru")),
    ]);

    let mut hits = searcher.search(&query, 10).unwrap();
    hits.sort_by_key(|h| h.doc);
    let nodes: Vec<_> = hits.iter().map(|h| (h.doc, h.nodes.clone())).collect();
    assert_eq!(
        nodes,
        vec![
            (DocId(0), vec![node(&[0, 1])]),
            (DocId(1), vec![node(&[2, 1])]),
            (DocId(2), vec![node(&[1, 1])]),
        ]
    );
}

#[test]
fn any_of_several_terms() {
    let searcher = Searcher::new(vec![index(&people())]);
    let query = Query::boolean(vec![
        (Occur::Should, Query::term("giovanni")),
        (Occur::Should, Query::term("homepage")),
        (Occur::Should, Query::term("nowhere")),
    ]);
    assert_eq!(sorted(doc_ids(&searcher.search(&query, 10).unwrap())), vec![1, 2]);
}

#[test]
fn segments_share_one_id_space() {
    let docs = people();
    let segments: Vec<MemoryIndex> = docs.chunks(2).map(index).collect();
    assert_eq!(segments.len(), 2);

    let searcher = Searcher::new(segments);
    assert_eq!(searcher.num_docs(), 3);

    let hits = searcher.search(&Query::term("homepage"), 10).unwrap();
    assert_eq!(doc_ids(&hits), vec![2]);

    let hits = searcher.search(&Query::term("renaud"), 10).unwrap();
    assert_eq!(sorted(doc_ids(&hits)), vec![0, 1, 2]);
}

#[test]
fn ties_break_on_document_order() {
    let docs: Vec<TreeDocument> = (0..5)
        .map(|_| TreeDocument::new().literal([0, 0], "aaa"))
        .collect();
    let searcher = Searcher::new(vec![index(&docs)]);

    let hits = searcher.search(&Query::term("aaa"), 2).unwrap();
    assert_eq!(doc_ids(&hits), vec![0, 1]);
    assert!(searcher.search(&Query::term("aaa"), 0).unwrap().is_empty());
}

#[test]
fn missing_terms_match_nothing() {
    let searcher = Searcher::new(vec![index(&people())]);
    assert!(searcher.search(&Query::term("nowhere"), 10).unwrap().is_empty());

    let query = Query::boolean(vec![
        (Occur::Must, Query::term("renaud")),
        (Occur::Must, Query::term("nowhere")),
    ]);
    assert!(searcher.search(&query, 10).unwrap().is_empty());
}

#[test]
fn hits_serialize_to_json() {
    let searcher = Searcher::new(vec![index(&people())]);
    let hits = searcher.search(&Query::term("homepage"), 10).unwrap();
    let json = serde_json::to_value(&hits).unwrap();
    assert_eq!(json[0]["doc"], 2);
    assert_eq!(json[0]["nodes"], serde_json::json!([[0, 1]]));
}

#[test]
fn corpus_loads_from_json() {
    let json = r#"[
        { "cells": [
            { "node": [0, 0], "uri": "<http://xmlns.com/foaf/0.1/name>" },
            { "node": [0, 1], "literal": "Renaud Delbru" }
        ] },
        { "cells": [ { "node": [0, 1], "literal": "Giovanni" } ] }
    ]"#;
    let docs: Vec<TreeDocument> = serde_json::from_str(json).unwrap();
    let searcher = Searcher::new(vec![index(&docs)]);
    let hits = searcher.search(&Query::phrase(["renaud", "delbru"]), 10).unwrap();
    assert_eq!(doc_ids(&hits), vec![0]);
    assert_eq!(hits[0].nodes, vec![node(&[0, 1])]);
}
