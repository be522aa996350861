//! Frequency table contracts: strict vs coercive distinctness, first-seen
//! ordering, and the relative-sum law.

use lazyseq_core::prelude::*;

fn loose_quad() -> Sequence {
    Sequence::from_values(vec![
        Value::Int(0),
        Value::Str("0".into()),
        Value::Null,
        Value::Bool(false),
    ])
}

#[test]
fn strict_mode_keeps_four_distinct_keys() {
    let rows: Vec<(Value, u64)> = loose_quad()
        .frequencies(true)
        .map(Result::unwrap)
        .collect();
    assert_eq!(
        rows,
        vec![
            (Value::Int(0), 1),
            (Value::Str("0".into()), 1),
            (Value::Null, 1),
            (Value::Bool(false), 1),
        ]
    );
}

#[test]
fn coercive_mode_collapses_to_one_key() {
    let rows: Vec<(Value, u64)> = loose_quad()
        .frequencies(false)
        .map(Result::unwrap)
        .collect();
    // The first-encountered value is the canonical representative.
    assert_eq!(rows, vec![(Value::Int(0), 4)]);
}

#[test]
fn coercive_mode_unifies_numeric_spellings() {
    let src = Sequence::from_values(vec![
        Value::Int(1),
        Value::Float(1.0),
        Value::Str("1".into()),
        Value::Bool(true),
        Value::Str("x".into()),
    ]);
    let rows: Vec<(Value, u64)> = src.frequencies(false).map(Result::unwrap).collect();
    assert_eq!(rows, vec![(Value::Int(1), 4), (Value::Str("x".into()), 1)]);
}

#[test]
fn rows_come_in_first_seen_order() {
    let src = Sequence::from_values(vec![
        Value::Str("b".into()),
        Value::Str("a".into()),
        Value::Str("b".into()),
    ]);
    let rows: Vec<(Value, u64)> = src.frequencies(true).map(Result::unwrap).collect();
    assert_eq!(
        rows,
        vec![(Value::Str("b".into()), 2), (Value::Str("a".into()), 1)]
    );
}

#[test]
fn relative_frequencies_sum_to_one() {
    let src = Sequence::from_values(vec![
        Value::Int(1),
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
    ]);
    let rows: Vec<(Value, f64)> = src
        .relative_frequencies(true)
        .map(Result::unwrap)
        .collect();
    assert_eq!(rows[0], (Value::Int(1), 0.5));
    let sum: f64 = rows.iter().map(|(_, share)| share).sum();
    assert!((sum - 1.0).abs() < 1e-4, "sum = {sum}");
}

#[test]
fn relative_frequencies_of_nothing_are_empty() {
    let src = Sequence::from_values(Vec::new());
    let rows: Vec<(Value, f64)> = src
        .relative_frequencies(true)
        .map(Result::unwrap)
        .collect();
    assert!(rows.is_empty());
}
