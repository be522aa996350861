//! Running reducer contracts: the seed law, negation in the subtracting
//! scan, averages, and min/max adoption.

mod common;

use common::{ints, values};
use lazyseq_core::prelude::*;

#[test]
fn running_total_seed_law() {
    let got = values(ints(&[1, 2, 3]).running_total(Some(Value::Int(5))));
    assert_eq!(
        got,
        vec![Value::Int(5), Value::Int(6), Value::Int(8), Value::Int(11)]
    );
}

#[test]
fn running_total_unseeded() {
    let got = values(ints(&[1, 2, 3]).running_total(None));
    assert_eq!(got, vec![Value::Int(1), Value::Int(3), Value::Int(6)]);
}

#[test]
fn running_product() {
    let got = values(ints(&[2, 3, 4]).running_product(None));
    assert_eq!(got, vec![Value::Int(2), Value::Int(6), Value::Int(24)]);
}

#[test]
fn running_difference_negates_first_without_seed() {
    let got = values(ints(&[1, 2, 3]).running_difference(None));
    assert_eq!(got, vec![Value::Int(-1), Value::Int(-3), Value::Int(-6)]);
}

#[test]
fn running_difference_with_seed() {
    let got = values(ints(&[1, 2]).running_difference(Some(Value::Int(10))));
    assert_eq!(got, vec![Value::Int(10), Value::Int(9), Value::Int(7)]);
}

#[test]
fn running_max_and_min_adopt_first_element() {
    let max = values(ints(&[3, 1, 4, 1, 5]).running_max(None));
    assert_eq!(
        max,
        vec![
            Value::Int(3),
            Value::Int(3),
            Value::Int(4),
            Value::Int(4),
            Value::Int(5),
        ]
    );
    let min = values(ints(&[3, 1, 4, 1, 5]).running_min(None));
    assert_eq!(
        min,
        vec![
            Value::Int(3),
            Value::Int(1),
            Value::Int(1),
            Value::Int(1),
            Value::Int(1),
        ]
    );
}

#[test]
fn running_average_tracks_sum_over_count() {
    let got = values(ints(&[1, 2, 3]).running_average(None));
    assert_eq!(
        got,
        vec![Value::Int(1), Value::Float(1.5), Value::Int(2)]
    );
}

#[test]
fn running_average_seed_is_its_own_average() {
    let got = values(ints(&[3]).running_average(Some(Value::Int(1))));
    assert_eq!(got, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn seeded_scan_over_empty_input_emits_only_the_seed() {
    let got = values(ints(&[]).running_total(Some(Value::Int(9))));
    assert_eq!(got, vec![Value::Int(9)]);
}

#[test]
fn scans_reindex_from_zero() {
    let got: Vec<Key> = Sequence::from_entries(vec![
        (Key::Str("a".into()), Value::Int(1)),
        (Key::Str("b".into()), Value::Int(2)),
    ])
    .running_total(None)
    .map(|r| r.unwrap().0)
    .collect();
    assert_eq!(got, vec![Key::Int(0), Key::Int(1)]);
}

#[test]
fn mixed_scalars_fold_through_numeric_coercion() {
    let src = Sequence::from_values(vec![
        Value::Int(1),
        Value::Bool(true),
        Value::Null,
        Value::Str("2".into()),
    ]);
    let got = values(src.running_total(None));
    assert_eq!(
        got,
        vec![Value::Int(1), Value::Int(2), Value::Int(2), Value::Int(4)]
    );
}
