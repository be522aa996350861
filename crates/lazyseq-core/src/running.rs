//! Running reducers: single-pass scans with O(1) accumulators.
//!
//! Every reducer emits one output per input element (the post-update
//! snapshot of its accumulator) under fresh 0-based keys. An optional
//! seed is emitted first, as element 0, before any input is folded in.
//! Only the previous accumulator state is kept, in the same spirit as a
//! streaming fold that holds just the last boundary.

use crate::key::Key;
use crate::source::Pull;
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Total,
    Product,
    Difference,
    Max,
    Min,
}

/// Scan reducer over one upstream sequence.
pub struct Running<I> {
    src: I,
    op: Op,
    acc: Option<Value>,
    seed: Option<Value>,
    next_key: i64,
    done: bool,
}

fn running<I>(src: I, op: Op, seed: Option<Value>) -> Running<I>
where
    I: Iterator<Item = Pull>,
{
    Running {
        src,
        op,
        acc: None,
        seed,
        next_key: 0,
        done: false,
    }
}

/// Cumulative sum. `running_total([1,2,3], seed=5)` emits `5,6,8,11`.
#[must_use]
pub fn running_total<I: Iterator<Item = Pull>>(src: I, seed: Option<Value>) -> Running<I> {
    running(src, Op::Total, seed)
}

/// Cumulative product.
#[must_use]
pub fn running_product<I: Iterator<Item = Pull>>(src: I, seed: Option<Value>) -> Running<I> {
    running(src, Op::Product, seed)
}

/// Subtracting scan; unseeded, the first output is the first element's
/// negation.
#[must_use]
pub fn running_difference<I: Iterator<Item = Pull>>(src: I, seed: Option<Value>) -> Running<I> {
    running(src, Op::Difference, seed)
}

/// Running maximum under the natural cross-kind order.
#[must_use]
pub fn running_max<I: Iterator<Item = Pull>>(src: I, seed: Option<Value>) -> Running<I> {
    running(src, Op::Max, seed)
}

/// Running minimum under the natural cross-kind order.
#[must_use]
pub fn running_min<I: Iterator<Item = Pull>>(src: I, seed: Option<Value>) -> Running<I> {
    running(src, Op::Min, seed)
}

impl<I: Iterator<Item = Pull>> Running<I> {
    fn emit(&mut self, v: Value) -> Pull {
        let k = self.next_key;
        self.next_key += 1;
        Ok((Key::Int(k), v))
    }

    // Named apart from `Iterator::fold`, which would otherwise win method
    // resolution on the `&mut I` receiver.
    fn fold_step(&self, acc: Option<Value>, v: Value) -> Value {
        use std::cmp::Ordering::{Greater, Less};
        match (self.op, acc) {
            // First element with no seed: totals/products start from their
            // identity, a difference negates, min/max adopt the element.
            (Op::Difference, None) => Value::Int(0).sub(&v),
            (_, None) => v,
            (Op::Total, Some(a)) => a.add(&v),
            (Op::Product, Some(a)) => a.mul(&v),
            (Op::Difference, Some(a)) => a.sub(&v),
            (Op::Max, Some(a)) => {
                if v.natural_cmp(&a) == Greater {
                    v
                } else {
                    a
                }
            }
            (Op::Min, Some(a)) => {
                if v.natural_cmp(&a) == Less {
                    v
                } else {
                    a
                }
            }
        }
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Running<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        if let Some(seed) = self.seed.take() {
            self.acc = Some(seed.clone());
            return Some(self.emit(seed));
        }
        match self.src.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            Some(Ok((_, v))) => {
                let acc = self.acc.take();
                let next = self.fold_step(acc, v);
                self.acc = Some(next.clone());
                Some(self.emit(next))
            }
        }
    }
}

/// Running mean: keeps a running sum and count, emits `sum / count` after
/// each element. A seed is its own average (count 1).
pub struct RunningAverage<I> {
    src: I,
    sum: Value,
    count: i64,
    seed: Option<Value>,
    next_key: i64,
    done: bool,
}

/// Construct a [`RunningAverage`] over `src`.
#[must_use]
pub fn running_average<I>(src: I, seed: Option<Value>) -> RunningAverage<I>
where
    I: Iterator<Item = Pull>,
{
    RunningAverage {
        src,
        sum: Value::Int(0),
        count: 0,
        seed,
        next_key: 0,
        done: false,
    }
}

impl<I: Iterator<Item = Pull>> RunningAverage<I> {
    fn fold_and_emit(&mut self, v: Value) -> Pull {
        self.sum = self.sum.add(&v);
        self.count += 1;
        let avg = self.sum.div(&Value::Int(self.count));
        let k = self.next_key;
        self.next_key += 1;
        Ok((Key::Int(k), avg))
    }
}

impl<I: Iterator<Item = Pull>> Iterator for RunningAverage<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        if let Some(seed) = self.seed.take() {
            return Some(self.fold_and_emit(seed));
        }
        match self.src.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            Some(Ok((_, v))) => Some(self.fold_and_emit(v)),
        }
    }
}
