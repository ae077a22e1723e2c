//! In-memory index construction and posting cursors.

use arbor::{
    AnalyzerConfig, CellValue, DocId, DocsNodesAndPositions, IndexReader, MemoryIndex,
    MemoryIndexBuilder, Term, TokenType, TreeDocument,
};

use crate::common::{drain_docs, drain_nodes, index, localname_index, node, people, postings};

#[test]
fn cells_sharing_a_node_continue_positions() {
    let docs = vec![TreeDocument::new()
        .literal([0, 0], "aaa")
        .literal([0, 0], "bbb aaa")];
    let index = index(&docs);

    let mut aaa = index.memory_postings(&Term::content("aaa")).unwrap();
    assert!(aaa.next_document().unwrap());
    assert_eq!(drain_nodes(&mut aaa).unwrap(), vec![(node(&[0, 0]), vec![0, 2])]);

    let mut bbb = index.memory_postings(&Term::content("bbb")).unwrap();
    assert!(bbb.next_document().unwrap());
    assert_eq!(drain_nodes(&mut bbb).unwrap(), vec![(node(&[0, 0]), vec![1])]);
}

#[test]
fn fields_are_separate_terms() {
    let docs = vec![TreeDocument::new()
        .cell([0, 0], "name", CellValue::Literal("renaud".into()))
        .literal([0, 1], "renaud")];
    let index = index(&docs);

    assert_eq!(index.doc_freq(&Term::new("name", "renaud")), 1);
    let mut name = index.memory_postings(&Term::new("name", "renaud")).unwrap();
    assert_eq!(drain_docs(&mut name).unwrap(), vec![(DocId(0), vec![node(&[0, 0])])]);
}

#[test]
fn token_types_are_recorded_per_position() {
    let docs = vec![TreeDocument::new().uri([0, 0], "<http://xmlns.com/foaf/0.1/givenName>")];
    let index = localname_index(&docs);

    let mut given = index.memory_postings(&Term::content("given")).unwrap();
    assert!(given.next_document().unwrap());
    assert!(given.next_node().unwrap());
    assert_eq!(given.token_type(), None);
    assert!(given.next_position().unwrap());
    assert_eq!(given.pos(), Some(1));
    assert_eq!(given.token_type(), Some(TokenType::Uri));
}

#[test]
fn builder_ids_are_dense() {
    let mut builder = MemoryIndexBuilder::new(AnalyzerConfig::default());
    for (i, doc) in people().iter().enumerate() {
        assert_eq!(builder.add_document(doc), DocId(i as u32));
    }
    assert_eq!(builder.num_docs(), 3);

    let index = builder.build();
    assert_eq!(index.num_docs(), 3);
    assert_eq!(index.doc_freq(&Term::content("renaud")), 3);
    assert_eq!(index.doc_freq(&Term::content("giovanni")), 1);
}

#[test]
fn empty_documents_still_take_an_id() {
    let docs = vec![TreeDocument::new(), TreeDocument::new().literal([0, 0], "aaa")];
    let index = index(&docs);
    assert_eq!(index.num_docs(), 2);

    let mut aaa = index.memory_postings(&Term::content("aaa")).unwrap();
    assert!(aaa.next_document().unwrap());
    assert_eq!(aaa.doc(), Some(DocId(1)));
}

#[test]
fn reader_postings_are_boxed_cursors() {
    let index = MemoryIndex::from_documents(&people(), AnalyzerConfig::default());
    let mut delbru = index.postings(&Term::content("delbru")).unwrap().unwrap();
    let docs: Vec<DocId> = drain_docs(&mut delbru)
        .unwrap()
        .into_iter()
        .map(|(doc, _)| doc)
        .collect();
    assert_eq!(docs, vec![DocId(0), DocId(2)]);
}

#[test]
fn skip_to_never_moves_backward() {
    let mut p = postings(vec![
        (1, vec![0, 0], vec![0]),
        (4, vec![0, 0], vec![0]),
        (9, vec![0, 0], vec![0]),
    ]);
    assert!(p.skip_to(DocId(4)).unwrap());
    assert_eq!(p.doc(), Some(DocId(4)));

    // Already past the target: behaves like next_document.
    assert!(p.skip_to(DocId(2)).unwrap());
    assert_eq!(p.doc(), Some(DocId(9)));

    assert!(!p.skip_to(DocId(10)).unwrap());
    assert_eq!(p.doc(), None);
    assert!(!p.next_document().unwrap());
}

#[test]
fn frequencies_follow_the_cursor() {
    let mut p = postings(vec![
        (0, vec![0, 0], vec![0, 3]),
        (0, vec![1, 0], vec![1]),
    ]);
    assert_eq!(p.term_freq_in_doc(), 0);
    assert!(p.next_document().unwrap());
    assert_eq!(p.term_freq_in_doc(), 3);
    assert_eq!(p.node_freq_in_doc(), 2);
    assert_eq!(p.term_freq_in_node(), 0);
    assert!(p.next_node().unwrap());
    assert_eq!(p.term_freq_in_node(), 2);
}
