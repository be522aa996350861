//! Early-termination laziness: stopping after `m` outputs never evaluates
//! input elements beyond what those outputs required. Verified with a
//! probe source that records how many elements were pulled.

mod common;

use common::counted;
use lazyseq_core::prelude::*;

fn hundred() -> Vec<Value> {
    (0..100).map(Value::Int).collect()
}

#[test]
fn limit_pulls_exactly_its_count() {
    let (seq, pulled) = counted(hundred());
    let got = seq.limit(4).collect_values().unwrap();
    assert_eq!(got.len(), 4);
    assert_eq!(pulled.get(), 4);
}

#[test]
fn map_and_filter_evaluate_per_pull() {
    let (seq, pulled) = counted(hundred());
    let mut it = seq
        .map_values(|v| v.mul(&Value::Int(2)))
        .filter_values(|v| v.float_repr() >= 10.0);
    let first = it.next().unwrap().unwrap().1;
    assert_eq!(first, Value::Int(10));
    // Elements 0..=5 were inspected, nothing beyond.
    assert_eq!(pulled.get(), 6);
}

#[test]
fn pairwise_stops_with_its_consumer() {
    let (seq, pulled) = counted(hundred());
    let mut it = seq.pairwise();
    it.next();
    it.next();
    // Two pairs need exactly three elements.
    assert_eq!(pulled.get(), 3);
}

#[test]
fn chunkwise_overlap_pulls_per_window() {
    let (seq, pulled) = counted(hundred());
    let mut it = seq.chunkwise_overlap(5, 2);
    it.next();
    assert_eq!(pulled.get(), 5);
    it.next();
    // The second window reuses 2 carried elements and pulls 3 fresh ones.
    assert_eq!(pulled.get(), 8);
}

#[test]
fn running_scans_are_one_in_one_out() {
    let (seq, pulled) = counted(hundred());
    let mut it = seq.running_total(None);
    it.next();
    it.next();
    assert_eq!(pulled.get(), 2);
}

#[test]
fn skip_evaluates_only_through_the_skipped_range() {
    let (seq, pulled) = counted(hundred());
    let mut it = seq.skip_values(3, 1);
    // First output is element 0 (the offset pass-through).
    assert_eq!(it.next().unwrap().unwrap().1, Value::Int(0));
    assert_eq!(pulled.get(), 1);
    // Next output skips elements 1..=3 and yields element 4.
    assert_eq!(it.next().unwrap().unwrap().1, Value::Int(4));
    assert_eq!(pulled.get(), 5);
}

#[test]
fn take_while_stops_at_the_boundary() {
    let (seq, pulled) = counted(hundred());
    let got = seq
        .take_while_values(|v| v.float_repr() < 3.0)
        .collect_values()
        .unwrap();
    assert_eq!(got.len(), 3);
    // The element that failed the predicate was evaluated, no more.
    assert_eq!(pulled.get(), 4);
}

#[test]
fn negative_limit_fails_before_touching_the_source() {
    let (seq, pulled) = counted(hundred());
    let mut it = seq.limit(-1);
    assert!(matches!(
        it.next(),
        Some(Err(Error::NegativeCount { value: -1, .. }))
    ));
    assert_eq!(pulled.get(), 0);
}
