//! Sort stage contracts: stability, natural cross-kind order, laziness of
//! the replay side.

mod common;

use common::{entries, ints, values};
use lazyseq_core::prelude::*;

fn tagged(n: i64, tag: &str) -> Value {
    Value::List(vec![Value::Int(n), Value::Str(tag.into())])
}

fn by_first(a: &Value, b: &Value) -> std::cmp::Ordering {
    let first = |v: &Value| match v {
        Value::List(l) => l.first().cloned().unwrap_or(Value::Null),
        other => other.clone(),
    };
    first(a).natural_cmp(&first(b))
}

#[test]
fn sort_is_stable() {
    let src = Sequence::from_values(vec![tagged(1, "a"), tagged(1, "b")]);
    let got = values(src.sorted_by(by_first));
    assert_eq!(got, vec![tagged(1, "a"), tagged(1, "b")]);
}

#[test]
fn sort_orders_and_keeps_ties_in_arrival_order() {
    let src = Sequence::from_values(vec![
        tagged(2, "x"),
        tagged(1, "a"),
        tagged(2, "y"),
        tagged(1, "b"),
    ]);
    let got = values(src.sorted_by(by_first));
    assert_eq!(
        got,
        vec![tagged(1, "a"), tagged(1, "b"), tagged(2, "x"), tagged(2, "y")]
    );
}

#[test]
fn default_comparator_uses_natural_cross_kind_order() {
    let src = Sequence::from_values(vec![
        Value::Str("a".into()),
        Value::Int(2),
        Value::Null,
        Value::List(vec![Value::Int(1)]),
        Value::Float(0.5),
        Value::Bool(false),
    ]);
    let got = values(src.sorted());
    assert_eq!(
        got,
        vec![
            Value::Null,
            Value::Bool(false),
            Value::Float(0.5),
            Value::Int(2),
            Value::Str("a".into()),
            Value::List(vec![Value::Int(1)]),
        ]
    );
}

#[test]
fn sorted_output_is_reindexed() {
    let got = entries(ints(&[3, 1, 2]).sorted());
    assert_eq!(
        got,
        vec![
            (Key::Int(0), Value::Int(1)),
            (Key::Int(1), Value::Int(2)),
            (Key::Int(2), Value::Int(3)),
        ]
    );
}

#[test]
fn sorted_forwards_upstream_errors_before_any_output() {
    let mut it = ints(&[3, 1, 2]).chunkwise(0).sorted();
    assert!(matches!(it.next(), Some(Err(Error::InvalidChunkSize(0)))));
    assert!(it.next().is_none());
}

#[test]
fn sorted_numbers_mix_ints_and_floats() {
    let src = Sequence::from_values(vec![
        Value::Float(2.5),
        Value::Int(2),
        Value::Int(3),
        Value::Float(0.1),
    ]);
    let got = values(src.sorted());
    assert_eq!(
        got,
        vec![
            Value::Float(0.1),
            Value::Int(2),
            Value::Float(2.5),
            Value::Int(3),
        ]
    );
}
