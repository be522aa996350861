//! Shared helpers for the combinator integration tests.

#![allow(dead_code)]

use lazyseq_core::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

/// Sequence over integer values.
pub fn ints(values: &[i64]) -> Sequence {
    Sequence::from_values(values.iter().copied().map(Value::Int).collect())
}

/// A single-pass source that records how many elements were actually
/// evaluated, for early-termination checks.
pub fn counted(values: Vec<Value>) -> (Sequence, Rc<Cell<usize>>) {
    let pulled = Rc::new(Cell::new(0));
    let probe = Rc::clone(&pulled);
    let seq = Sequence::from_single_pass(
        values
            .into_iter()
            .inspect(move |_| probe.set(probe.get() + 1)),
    );
    (seq, pulled)
}

/// Unwrap every pulled value, panicking on in-band errors.
pub fn values<I: Iterator<Item = Pull>>(seq: I) -> Vec<Value> {
    seq.map(|r| r.unwrap().1).collect()
}

/// Unwrap every pulled entry.
pub fn entries<I: Iterator<Item = Pull>>(seq: I) -> Vec<Entry> {
    seq.map(Result::unwrap).collect()
}

/// Shorthand for a list value of integers.
pub fn int_list(values: &[i64]) -> Value {
    Value::List(values.iter().copied().map(Value::Int).collect())
}
