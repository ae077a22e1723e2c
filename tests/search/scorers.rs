//! Scorer trees over real indexes: the behavior each combinator promises.

use arbor::{
    boolean_scorer, ConjunctionScorer, ConstrainedNodes, DisjunctionScorer, DocId,
    DocsNodesAndPositions, NodeRange, NodeScope, NodeScorer, Occur, Position, Query, ReqOptScorer,
    TfIdfSimilarity, TreeDocument,
};

use crate::common::{drain_docs, drain_nodes, index, node, term_scorer};

fn req_opt_docs() -> Vec<TreeDocument> {
    vec![
        TreeDocument::new().literal([0, 0], "aaa bbb").literal([1, 0], "aaa"),
        TreeDocument::new().literal([0, 0], "aaa bbb"),
    ]
}

#[test]
fn required_optional_follows_the_required_clause() {
    let index = index(&req_opt_docs());
    let query = Query::boolean(vec![
        (Occur::Must, Query::term("aaa")),
        (Occur::Should, Query::term("bbb")),
    ]);
    let mut scorer = query.scorer(&index, &TfIdfSimilarity).unwrap().unwrap();

    assert!(scorer.next_document().unwrap());
    assert_eq!(scorer.doc(), Some(DocId(0)));
    assert_eq!(
        drain_nodes(&mut scorer).unwrap(),
        vec![(node(&[0, 0]), vec![0, 1]), (node(&[1, 0]), vec![0])]
    );

    assert!(scorer.next_document().unwrap());
    assert_eq!(scorer.doc(), Some(DocId(1)));
    assert_eq!(drain_nodes(&mut scorer).unwrap(), vec![(node(&[0, 0]), vec![0, 1])]);

    assert!(!scorer.next_document().unwrap());
}

#[test]
fn optional_clause_only_adds_score() {
    let mut with_opt = ReqOptScorer::new(
        term_scorer(vec![(0, vec![0, 0], vec![0]), (1, vec![0, 0], vec![0])]),
        term_scorer(vec![(1, vec![3, 0], vec![0, 1])]),
    );

    assert!(with_opt.next_document().unwrap());
    assert_eq!(with_opt.score().unwrap(), 1.0);

    assert!(with_opt.next_document().unwrap());
    // The optional side is on another node: score counts, positions do not.
    assert_eq!(with_opt.score().unwrap(), 3.0);
    assert_eq!(drain_nodes(&mut with_opt).unwrap(), vec![(node(&[0, 0]), vec![0])]);
}

#[test]
fn skip_to_lands_on_the_nearest_match() {
    let docs: Vec<TreeDocument> = (0..64)
        .map(|i| {
            let text = if i % 2 == 0 { "aaa" } else { "bbb" };
            TreeDocument::new().literal([0, 0], text)
        })
        .collect();
    let index = index(&docs);
    let mut scorer = Query::term("aaa").scorer(&index, &TfIdfSimilarity).unwrap().unwrap();

    assert!(scorer.skip_to(DocId(17)).unwrap());
    assert_eq!(scorer.doc(), Some(DocId(18)));
    assert!(scorer.next_node().unwrap());
    assert_eq!(scorer.node(), Some(&node(&[0, 0])));
}

#[test]
fn term_exhaustion_is_terminal() {
    let mut scorer = term_scorer(vec![(0, vec![0, 0], vec![0])]);
    assert!(scorer.next_document().unwrap());
    assert!(scorer.next_node().unwrap());
    assert!(!scorer.next_node().unwrap());
    assert!(!scorer.next_node().unwrap());
    assert!(!scorer.next_document().unwrap());
    assert!(!scorer.next_document().unwrap());
    assert!(!scorer.next_node().unwrap());
    assert_eq!(scorer.doc(), None);
}

#[test]
fn phrase_needs_adjacent_positions_in_one_node() {
    let docs = vec![
        TreeDocument::new().literal([0, 0], "aaa bbb"),
        TreeDocument::new().literal([0, 0], "aaa ccc bbb"),
        TreeDocument::new().literal([0, 0], "aaa").literal([0, 1], "bbb"),
        TreeDocument::new().literal([0, 0], "ccc").literal([2, 1], "bbb aaa bbb"),
    ];
    let index = index(&docs);
    let mut phrase = Query::phrase(["aaa", "bbb"])
        .scorer(&index, &TfIdfSimilarity)
        .unwrap()
        .unwrap();

    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(0)));
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[0, 0]), vec![0])]);

    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(3)));
    assert_eq!(phrase.freq(), 1.0);
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[2, 1]), vec![1])]);

    assert!(!phrase.next_document().unwrap());
}

#[test]
fn phrase_keeps_searching_later_nodes_of_a_document() {
    let docs = vec![
        TreeDocument::new()
            .literal([0, 0], "aaa bbb")
            .literal([1, 0], "xxx aaa bbb"),
        // Co-occur without lining up in [0,0], line up in [0,1].
        TreeDocument::new()
            .literal([0, 0], "aaa ccc bbb")
            .literal([0, 1], "bbb aaa bbb"),
        // A failed alignment inside the node does not end the node.
        TreeDocument::new().literal([0, 0], "aaa aaa ccc aaa bbb aaa"),
    ];
    let index = index(&docs);
    let mut phrase = Query::phrase(["aaa", "bbb"])
        .scorer(&index, &TfIdfSimilarity)
        .unwrap()
        .unwrap();

    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(0)));
    assert_eq!(phrase.freq(), 2.0);
    assert_eq!(phrase.node_freq_in_doc(), 2);
    assert_eq!(
        drain_nodes(&mut phrase).unwrap(),
        vec![(node(&[0, 0]), vec![0]), (node(&[1, 0]), vec![1])]
    );

    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(1)));
    assert_eq!(phrase.freq(), 1.0);
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[0, 1]), vec![1])]);

    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(2)));
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[0, 0]), vec![3])]);

    assert!(!phrase.next_document().unwrap());
}

fn three_term_docs() -> Vec<TreeDocument> {
    vec![
        TreeDocument::new().literal([0, 0], "aaa bbb ccc aaa bbb ccc"),
        TreeDocument::new().literal([0, 0], "aaa bbb ddd ccc"),
        TreeDocument::new().literal([0, 0], "ccc aaa bbb").literal([0, 1], "ccc"),
        TreeDocument::new().literal([3, 2], "bbb aaa bbb ccc"),
    ]
}

#[test]
fn three_term_phrase_needs_every_term_in_sequence() {
    let index = index(&three_term_docs());
    let mut phrase = Query::phrase(["aaa", "bbb", "ccc"])
        .scorer(&index, &TfIdfSimilarity)
        .unwrap()
        .unwrap();

    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(0)));
    assert_eq!(phrase.freq(), 2.0);
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[0, 0]), vec![0, 3])]);

    // Doc 1 breaks the sequence, doc 2 splits it across cells.
    assert!(phrase.next_document().unwrap());
    assert_eq!(phrase.doc(), Some(DocId(3)));
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[3, 2]), vec![1])]);
    assert!(!phrase.next_document().unwrap());
}

#[test]
fn phrase_skip_to_skips_non_matching_candidates() {
    let index = index(&three_term_docs());
    let mut phrase = Query::phrase(["aaa", "bbb", "ccc"])
        .scorer(&index, &TfIdfSimilarity)
        .unwrap()
        .unwrap();

    assert!(phrase.skip_to(DocId(1)).unwrap());
    assert_eq!(phrase.doc(), Some(DocId(3)));
    assert_eq!(phrase.freq(), 1.0);
    assert_eq!(drain_nodes(&mut phrase).unwrap(), vec![(node(&[3, 2]), vec![1])]);

    // At or before the current document: moves on, and there is nothing left.
    assert!(!phrase.skip_to(DocId(0)).unwrap());
    assert_eq!(phrase.doc(), None);
}

#[test]
fn composite_skip_to_node_walks_its_buffer() {
    let mut union = DisjunctionScorer::new(vec![
        term_scorer(vec![(0, vec![0, 0], vec![0]), (0, vec![2, 1], vec![3])]),
        term_scorer(vec![(0, vec![1, 0], vec![1]), (0, vec![2, 1], vec![0])]),
    ])
    .unwrap();
    assert!(union.next_document().unwrap());

    assert!(union.skip_to_node(&node(&[1])).unwrap());
    assert_eq!(union.node(), Some(&node(&[1, 0])));
    assert!(union.skip_to_node(&node(&[2, 1])).unwrap());
    assert!(union.next_position().unwrap());
    assert_eq!(union.pos(), Some(0));
    assert!(union.next_position().unwrap());
    assert_eq!(union.pos(), Some(3));
    assert!(!union.skip_to_node(&node(&[3])).unwrap());
    assert!(!union.next_node().unwrap());
}

#[test]
fn exact_conjunction_never_reports_empty_documents() {
    let mut conjunction = ConjunctionScorer::new(
        vec![
            term_scorer(vec![(0, vec![0, 0], vec![0]), (1, vec![1, 0], vec![0])]),
            term_scorer(vec![(0, vec![0, 1], vec![0]), (1, vec![1, 0], vec![1])]),
        ],
        NodeScope::Exact,
    )
    .unwrap();

    let docs = drain_docs(&mut conjunction).unwrap();
    assert_eq!(docs, vec![(DocId(1), vec![node(&[1, 0])])]);
    assert!(docs.iter().all(|(_, nodes)| !nodes.is_empty()));
}

#[test]
fn tuple_conjunction_reports_the_shared_tuple() {
    let mut conjunction = ConjunctionScorer::new(
        vec![
            term_scorer(vec![
                (0, vec![0, 0], vec![0]),
                (1, vec![1, 0], vec![0]),
                (2, vec![0, 0], vec![0]),
            ]),
            term_scorer(vec![
                (0, vec![0, 1], vec![0]),
                (0, vec![2, 1], vec![4]),
                (1, vec![1, 0], vec![1]),
                (2, vec![1, 1], vec![0]),
            ]),
        ],
        NodeScope::Ancestor { depth: 1 },
    )
    .unwrap();

    assert!(conjunction.next_document().unwrap());
    assert_eq!(conjunction.doc(), Some(DocId(0)));
    assert!(conjunction.next_node().unwrap());
    assert_eq!(conjunction.node(), Some(&node(&[0])));
    assert!(!conjunction.next_position().unwrap());
    assert!(!conjunction.next_node().unwrap());

    assert!(conjunction.next_document().unwrap());
    assert_eq!(conjunction.doc(), Some(DocId(1)));
    assert_eq!(drain_nodes(&mut conjunction).unwrap(), vec![(node(&[1]), Vec::<Position>::new())]);

    // Doc 2 has both terms, but in different tuples.
    assert!(!conjunction.next_document().unwrap());
}

#[test]
fn disjunction_merges_nodes_in_dewey_order() {
    let mut union = boolean_scorer(
        vec![
            (Occur::Should, term_scorer(vec![(0, vec![1, 0], vec![2]), (2, vec![0, 0], vec![0])])),
            (Occur::Should, term_scorer(vec![(0, vec![0, 3], vec![1]), (0, vec![1, 0], vec![0])])),
        ],
        NodeScope::Exact,
    )
    .unwrap();

    assert!(union.next_document().unwrap());
    assert_eq!(union.doc(), Some(DocId(0)));
    assert_eq!(
        drain_nodes(&mut union).unwrap(),
        vec![(node(&[0, 3]), vec![1]), (node(&[1, 0]), vec![0, 2])]
    );
    assert_eq!(union.score().unwrap(), 3.0);

    assert!(union.next_document().unwrap());
    assert_eq!(union.doc(), Some(DocId(2)));
    assert_eq!(union.score().unwrap(), 1.0);
    assert!(!union.next_document().unwrap());
}

#[test]
fn exclusion_works_per_node() {
    let mut scorer = boolean_scorer(
        vec![
            (
                Occur::Must,
                term_scorer(vec![
                    (0, vec![0, 1], vec![0]),
                    (0, vec![2, 1], vec![0]),
                    (1, vec![0, 0], vec![0]),
                ]),
            ),
            (
                Occur::MustNot,
                term_scorer(vec![(0, vec![2, 1], vec![1]), (1, vec![0, 0], vec![1])]),
            ),
        ],
        NodeScope::Exact,
    )
    .unwrap();

    // Doc 1 loses its only node, so it is not reported at all.
    assert_eq!(drain_docs(&mut scorer).unwrap(), vec![(DocId(0), vec![node(&[0, 1])])]);
}

#[test]
fn constrained_candidates_pass_through_without_nodes() {
    let range = NodeRange::between([1, 0], [1, 1]).unwrap();
    let mut constrained = ConstrainedNodes::new(
        term_scorer(vec![
            (0, vec![0, 5], vec![0]),
            (1, vec![1, 1], vec![0]),
            (2, vec![2, 0], vec![0]),
        ]),
        range,
    );

    assert_eq!(
        drain_docs(&mut constrained).unwrap(),
        vec![
            (DocId(0), vec![]),
            (DocId(1), vec![node(&[1, 1])]),
            (DocId(2), vec![]),
        ]
    );
}

#[test]
fn constrained_skip_to_keeps_filtering() {
    let mut constrained = ConstrainedNodes::new(
        term_scorer(vec![
            (3, vec![0, 0], vec![0]),
            (5, vec![0, 0], vec![0]),
            (5, vec![0, 1], vec![1]),
            (8, vec![0, 1], vec![0]),
        ]),
        NodeRange::between([0, 1], [0, 1]).unwrap(),
    );

    assert!(constrained.skip_to(DocId(4)).unwrap());
    assert_eq!(constrained.doc(), Some(DocId(5)));
    assert_eq!(drain_nodes(&mut constrained).unwrap(), vec![(node(&[0, 1]), vec![1])]);

    assert!(constrained.skip_to(DocId(6)).unwrap());
    assert_eq!(constrained.doc(), Some(DocId(8)));
    assert!(!constrained.skip_to(DocId(9)).unwrap());
}

#[test]
fn constrained_scorer_scores_like_its_inner_scorer() {
    let mut constrained = ConstrainedNodes::new(
        term_scorer(vec![(0, vec![0, 0], vec![0, 1]), (0, vec![1, 0], vec![0])]),
        NodeRange::at_level(2),
    );
    assert!(constrained.next_document().unwrap());
    assert_eq!(constrained.score().unwrap(), 3.0);
    assert_eq!(constrained.freq(), 3.0);
}
