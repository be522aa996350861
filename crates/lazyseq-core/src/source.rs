//! Sequence adapter: one lazy pull-based view over every supported source.
//!
//! [`Source`] is the closed set of input kinds; [`Sequence::new`] is the
//! only place in the crate that branches on source kind. The result is a
//! single-pass iterator of [`Pull`] items (`(key, value)` pairs with
//! errors carried in-band) that never reads ahead of the current pull, so
//! a consumer that stops early never evaluates elements past the last one
//! it took.

use crate::error::{Error, Result};
use crate::io_jsonl::JsonlValueIter;
use crate::key::Key;
use crate::value::Value;
use std::io::BufRead;
use std::iter::Enumerate;
use std::vec;

/// A keyed element.
pub type Entry = (Key, Value);

/// One pulled item: an entry, or an in-band failure.
pub type Pull = Result<Entry>;

/// A type-erased sequence, for heterogeneous multi-source combinators.
pub type BoxSequence = Box<dyn Iterator<Item = Pull>>;

/// The closed set of supported input kinds.
pub enum Source {
    /// Finite value list; keys are assigned `0..n`.
    Values(Vec<Value>),
    /// Finite keyed entry list; keys are preserved.
    Entries(Vec<Entry>),
    /// Single-pass value iterator; keys are assigned as elements arrive.
    SinglePass(Box<dyn Iterator<Item = Value>>),
    /// Single-pass iterator whose items may fail (e.g. a decoder).
    Fallible(Box<dyn Iterator<Item = Result<Value>>>),
    /// Streaming JSON Lines reader, one value per line.
    Jsonl(Box<dyn BufRead>),
}

/// The uniform lazy sequence produced by the adapter.
///
/// Single-pass: once exhausted it yields nothing further, and after an
/// in-band `Err` it is fused.
pub struct Sequence {
    inner: Inner,
}

enum Inner {
    Values(Enumerate<vec::IntoIter<Value>>),
    Entries(vec::IntoIter<Entry>),
    SinglePass {
        it: Box<dyn Iterator<Item = Value>>,
        next_key: i64,
    },
    Fallible {
        it: Box<dyn Iterator<Item = Result<Value>>>,
        next_key: i64,
        done: bool,
    },
}

impl Sequence {
    /// Normalize a source into one lazy sequence of `(key, value)` pairs.
    #[must_use]
    pub fn new(src: Source) -> Self {
        let inner = match src {
            Source::Values(v) => Inner::Values(v.into_iter().enumerate()),
            Source::Entries(v) => Inner::Entries(v.into_iter()),
            Source::SinglePass(it) => Inner::SinglePass { it, next_key: 0 },
            Source::Fallible(it) => Inner::Fallible {
                it,
                next_key: 0,
                done: false,
            },
            Source::Jsonl(rdr) => Inner::Fallible {
                it: Box::new(JsonlValueIter::new(rdr)),
                next_key: 0,
                done: false,
            },
        };
        Self { inner }
    }

    /// Sequence over a plain value list, keyed `0..n`.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::new(Source::Values(values))
    }

    /// Sequence over keyed entries, keys preserved.
    #[must_use]
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self::new(Source::Entries(entries))
    }

    /// Sequence over a single-pass value iterator.
    pub fn from_single_pass<I>(it: I) -> Self
    where
        I: Iterator<Item = Value> + 'static,
    {
        Self::new(Source::SinglePass(Box::new(it)))
    }

    /// Sequence over a single-pass iterator with fallible items.
    pub fn from_fallible<I>(it: I) -> Self
    where
        I: Iterator<Item = Result<Value>> + 'static,
    {
        Self::new(Source::Fallible(Box::new(it)))
    }

    /// Decompose a string into a sequence of its characters.
    #[must_use]
    pub fn from_chars(s: &str) -> Self {
        Self::from_values(s.chars().map(|c| Value::Str(c.to_string())).collect())
    }

    /// Sequence over a streaming JSONL reader, one value per line.
    pub fn from_jsonl<R>(rdr: R) -> Self
    where
        R: BufRead + 'static,
    {
        Self::new(Source::Jsonl(Box::new(rdr)))
    }
}

impl Iterator for Sequence {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        match &mut self.inner {
            Inner::Values(it) => it
                .next()
                .map(|(i, v)| Ok((Key::Int(i as i64), v))),
            Inner::Entries(it) => it.next().map(Ok),
            Inner::SinglePass { it, next_key } => it.next().map(|v| {
                let k = *next_key;
                *next_key += 1;
                Ok((Key::Int(k), v))
            }),
            Inner::Fallible { it, next_key, done } => {
                if *done {
                    return None;
                }
                match it.next() {
                    None => {
                        *done = true;
                        None
                    }
                    Some(Err(e)) => {
                        *done = true;
                        Some(Err(e))
                    }
                    Some(Ok(v)) => {
                        let k = *next_key;
                        *next_key += 1;
                        Some(Ok((Key::Int(k), v)))
                    }
                }
            }
        }
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl From<Vec<Entry>> for Sequence {
    fn from(entries: Vec<Entry>) -> Self {
        Self::from_entries(entries)
    }
}

/// Repeat one value `times` times (keys `0..times`).
///
/// `times` must be non-negative; the violation surfaces on first pull.
pub struct Repeat {
    value: Value,
    times: i64,
    emitted: i64,
    checked: bool,
    done: bool,
}

/// Construct a [`Repeat`] source.
#[must_use]
pub fn repeat(value: Value, times: i64) -> Repeat {
    Repeat {
        value,
        times,
        emitted: 0,
        checked: false,
        done: false,
    }
}

impl Iterator for Repeat {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        if !self.checked {
            self.checked = true;
            if self.times < 0 {
                self.done = true;
                return Some(Err(Error::NegativeCount {
                    param: "repeat count",
                    value: self.times,
                }));
            }
        }
        if self.emitted >= self.times {
            self.done = true;
            return None;
        }
        let k = self.emitted;
        self.emitted += 1;
        Some(Ok((Key::Int(k), self.value.clone())))
    }
}
