//! Buffered stable sort stage.
//!
//! The one combinator that is necessarily **eager on its input**: the whole
//! upstream is drained into a buffer before the first output, then replayed
//! lazily under fresh 0-based keys. That is a contract, not a bug: it
//! cannot be used meaningfully on an unbounded source. The sort is stable:
//! ties keep their arrival order.

use crate::error::Error;
use crate::key::Key;
use crate::source::Pull;
use crate::value::Value;
use std::cmp::Ordering;
use std::vec;

/// Lazily replayed, stably sorted view of a fully drained input.
pub struct Sorted<I, F> {
    src: Option<I>,
    cmp: F,
    out: vec::IntoIter<Value>,
    failed: Option<Error>,
    next_key: i64,
    done: bool,
}

/// Sort with the natural cross-kind order ([`Value::natural_cmp`]).
#[must_use]
pub fn sorted<I>(src: I) -> Sorted<I, fn(&Value, &Value) -> Ordering>
where
    I: Iterator<Item = Pull>,
{
    sorted_by(src, Value::natural_cmp)
}

/// Sort with a caller-supplied 3-way comparator.
#[must_use]
pub fn sorted_by<I, F>(src: I, cmp: F) -> Sorted<I, F>
where
    I: Iterator<Item = Pull>,
    F: FnMut(&Value, &Value) -> Ordering,
{
    Sorted {
        src: Some(src),
        cmp,
        out: Vec::new().into_iter(),
        failed: None,
        next_key: 0,
        done: false,
    }
}

impl<I, F> Iterator for Sorted<I, F>
where
    I: Iterator<Item = Pull>,
    F: FnMut(&Value, &Value) -> Ordering,
{
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        if let Some(src) = self.src.take() {
            let mut buf = Vec::new();
            for pull in src {
                match pull {
                    Ok((_, v)) => buf.push(v),
                    Err(e) => {
                        // An upstream failure preempts all sorted output.
                        self.failed = Some(e);
                        break;
                    }
                }
            }
            if self.failed.is_none() {
                // Vec::sort_by is stable.
                buf.sort_by(|a, b| (self.cmp)(a, b));
                self.out = buf.into_iter();
            }
        }
        if let Some(e) = self.failed.take() {
            self.done = true;
            return Some(Err(e));
        }
        match self.out.next() {
            Some(v) => {
                let k = self.next_key;
                self.next_key += 1;
                Some(Ok((Key::Int(k), v)))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
