//! Multi-source synchronization: lock-step zip and sequential chain.
//!
//! Both re-index their output to fresh contiguous 0-based integer keys;
//! upstream keys from several sources cannot be merged meaningfully.

use crate::key::Key;
use crate::source::{BoxSequence, Pull};
use crate::value::Value;
use std::collections::VecDeque;

/// Lock-step zip over `n` sequences.
///
/// Each output value is a `Value::List` of the `n` aligned values.
/// Terminates as soon as *any* input is exhausted; inputs after the
/// detecting one are not pulled again. No padding.
pub struct Zip {
    srcs: Vec<BoxSequence>,
    next_key: i64,
    done: bool,
}

/// Zip `srcs` together. Zero sources yield an empty output.
#[must_use]
pub fn zip(srcs: Vec<BoxSequence>) -> Zip {
    Zip {
        srcs,
        next_key: 0,
        done: false,
    }
}

impl Iterator for Zip {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done || self.srcs.is_empty() {
            self.done = true;
            return None;
        }
        let mut tuple = Vec::with_capacity(self.srcs.len());
        for src in &mut self.srcs {
            match src.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok((_, v))) => tuple.push(v),
            }
        }
        let k = self.next_key;
        self.next_key += 1;
        Some(Ok((Key::Int(k), Value::List(tuple))))
    }
}

/// Sequential concatenation of `n` sequences under one fresh key space.
///
/// Values pass through unchanged; only keys are renumbered.
pub struct Chain {
    srcs: VecDeque<BoxSequence>,
    next_key: i64,
    done: bool,
}

/// Chain `srcs` end to end.
#[must_use]
pub fn chain(srcs: Vec<BoxSequence>) -> Chain {
    Chain {
        srcs: srcs.into(),
        next_key: 0,
        done: false,
    }
}

impl Iterator for Chain {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        while let Some(front) = self.srcs.front_mut() {
            match front.next() {
                None => {
                    // Current source exhausted; move on.
                    self.srcs.pop_front();
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok((_, v))) => {
                    let k = self.next_key;
                    self.next_key += 1;
                    return Some(Ok((Key::Int(k), v)));
                }
            }
        }
        self.done = true;
        None
    }
}
