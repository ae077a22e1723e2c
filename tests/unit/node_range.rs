//! Range evaluator and node path parsing.

use arbor::{satisfies, Error, NodePath, NodeRange};

use crate::common::node;

#[test]
fn tuple_range_accepts_its_cells() {
    let range = NodeRange::between([1, 0], [1, 1]).unwrap();
    assert!(range.contains(&node(&[1, 0])));
    assert!(range.contains(&node(&[1, 1])));
    assert!(!range.contains(&node(&[0, 5])));
    assert!(!range.contains(&node(&[2, 0])));
}

#[test]
fn level_rejects_other_depths_regardless_of_bounds() {
    let lower = node(&[1]);
    let upper = node(&[1]);
    assert!(satisfies(&node(&[1]), &lower, &upper, Some(1)));
    assert!(!satisfies(&node(&[1, 0]), &lower, &upper, Some(1)));
    assert!(!satisfies(&node(&[1, 1]), &lower, &upper, Some(1)));
}

#[test]
fn shallow_bounds_cover_descendants() {
    let range = NodeRange::between([1], [2]).unwrap();
    assert!(range.contains(&node(&[1, 0, 7])));
    assert!(range.contains(&node(&[2, 9])));
    assert!(!range.contains(&node(&[3, 0])));
    assert!(!range.contains(&node(&[0, 4])));
}

#[test]
fn candidate_shallower_than_a_bound_is_rejected() {
    let range = NodeRange::between([1, 0], [1, 1]).unwrap();
    assert!(!range.contains(&node(&[1])));
}

#[test]
fn unbounded_range_matches_everything() {
    let range = NodeRange::unbounded();
    assert!(range.contains(&node(&[0])));
    assert!(range.contains(&node(&[4, 2, 1])));
}

#[test]
fn inverted_bounds_are_a_config_error() {
    let err = NodeRange::between([2, 0], [1, 5]).unwrap_err();
    assert!(matches!(err, Error::InvalidRange { .. }));
    assert!(err.is_config());
}

#[test]
fn bound_deeper_than_level_is_a_config_error() {
    let err = NodeRange::new(node(&[1, 0]), node(&[1, 1]), Some(1)).unwrap_err();
    assert!(matches!(err, Error::InvalidRange { .. }));
}

#[test]
fn with_level_revalidates() {
    let range = NodeRange::between([1], [1]).unwrap().with_level(2).unwrap();
    assert_eq!(range.level(), Some(2));
    assert!(range.contains(&node(&[1, 3])));
    assert!(!range.contains(&node(&[1])));

    assert!(NodeRange::between([1, 0], [1, 1]).unwrap().with_level(1).is_err());
}

#[test]
fn node_paths_parse_from_cli_syntax() {
    assert_eq!("1,0".parse::<NodePath>().unwrap(), node(&[1, 0]));
    assert_eq!("[2, 3, 4]".parse::<NodePath>().unwrap(), node(&[2, 3, 4]));
    assert_eq!("[]".parse::<NodePath>().unwrap(), NodePath::root());
    assert!("1,x".parse::<NodePath>().is_err());
}

#[test]
fn range_display() {
    let range = NodeRange::between([1, 0], [1, 1]).unwrap().with_level(2).unwrap();
    assert_eq!(range.to_string(), "[1,0]..=[1,1]@2");
}
