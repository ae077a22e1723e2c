//! Similarity plumbing through the searcher.

use arbor::scoring::idf;
use arbor::{DocId, DocScorer, IndexReader, Query, Searcher, Similarity, Term, TfIdfSimilarity};

use crate::common::{index, people, tuples_doc};

/// Scores every document by its id, so ranking is predictable.
struct DocIdSimilarity;

impl Similarity for DocIdSimilarity {
    fn term_scorer(&self, _reader: &dyn IndexReader, _term: &Term, boost: f32) -> Box<dyn DocScorer> {
        Box::new(move |doc: DocId, _freq: f32| (doc.get() + 1) as f32 * boost)
    }

    fn phrase_scorer(&self, reader: &dyn IndexReader, terms: &[Term], boost: f32) -> Box<dyn DocScorer> {
        self.term_scorer(reader, &terms[0], boost)
    }
}

#[test]
fn custom_similarity_drives_ranking() {
    let searcher = Searcher::new(vec![index(&people())]).with_similarity(DocIdSimilarity);
    let hits = searcher.search(&Query::term("renaud"), 10).unwrap();
    let ranked: Vec<u32> = hits.iter().map(|h| h.doc.get()).collect();
    assert_eq!(ranked, vec![2, 1, 0]);
    assert_eq!(hits[0].score, 3.0);
}

#[test]
fn tf_idf_prefers_repeated_terms() {
    let docs = vec![
        tuples_doc(&[&["renaud"]]),
        tuples_doc(&[&["renaud renaud renaud"]]),
        tuples_doc(&[&["giovanni"]]),
    ];
    let hits = Searcher::new(vec![index(&docs)])
        .search(&Query::term("renaud"), 10)
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc, DocId(1));

    let weight = idf(2, 3) * idf(2, 3);
    assert!((hits[0].score - 3f32.sqrt() * weight).abs() < 1e-5);
    assert!((hits[1].score - weight).abs() < 1e-5);
}

#[test]
fn rare_terms_outscore_common_ones() {
    let index = index(&people());
    let sim = TfIdfSimilarity;
    let common = sim.term_scorer(&index, &Term::content("renaud"), 1.0);
    let rare = sim.term_scorer(&index, &Term::content("giovanni"), 1.0);
    assert!(rare.score(DocId(1), 1.0) > common.score(DocId(1), 1.0));
}
