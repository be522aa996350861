//! Simple element-wise combinators: single-pass wrappers with no buffering
//! beyond the current element.
//!
//! Structure-preserving wrappers (`filter`, `take_while`, `drop_while`,
//! `compress`, `limit`, `skip`) keep upstream keys: they drop elements,
//! never renumber. Structure-changing ones (`flatten`) re-index. Count
//! parameters are `i64` so the negative case is representable; violations
//! surface lazily on first pull, before any element is yielded.

use crate::error::{Error, Result};
use crate::key::Key;
use crate::source::{BoxSequence, Pull};
use crate::value::Value;
use std::collections::VecDeque;

/// Map each value through `f`, keeping keys.
pub struct Map<I, F> {
    src: I,
    f: F,
}

/// Construct a [`Map`].
#[must_use]
pub fn map<I, F>(src: I, f: F) -> Map<I, F>
where
    I: Iterator<Item = Pull>,
    F: FnMut(Value) -> Value,
{
    Map { src, f }
}

impl<I, F> Iterator for Map<I, F>
where
    I: Iterator<Item = Pull>,
    F: FnMut(Value) -> Value,
{
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        self.src.next().map(|r| r.map(|(k, v)| (k, (self.f)(v))))
    }
}

/// Keep elements matching (or, inverted, failing) a predicate; keys kept.
pub struct Filter<I, P> {
    src: I,
    pred: P,
    invert: bool,
}

/// Keep elements where `pred` is true.
#[must_use]
pub fn filter<I, P>(src: I, pred: P) -> Filter<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    Filter {
        src,
        pred,
        invert: false,
    }
}

/// Keep elements where `pred` is false.
#[must_use]
pub fn filter_false<I, P>(src: I, pred: P) -> Filter<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    Filter {
        src,
        pred,
        invert: true,
    }
}

impl<I, P> Iterator for Filter<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        loop {
            match self.src.next()? {
                Err(e) => return Some(Err(e)),
                Ok((k, v)) => {
                    if (self.pred)(&v) != self.invert {
                        return Some(Ok((k, v)));
                    }
                }
            }
        }
    }
}

/// Yield while `pred` holds, then stop without pulling further.
pub struct TakeWhile<I, P> {
    src: I,
    pred: P,
    done: bool,
}

/// Construct a [`TakeWhile`].
#[must_use]
pub fn take_while<I, P>(src: I, pred: P) -> TakeWhile<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    TakeWhile {
        src,
        pred,
        done: false,
    }
}

impl<I, P> Iterator for TakeWhile<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
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
            Some(Ok((k, v))) => {
                if (self.pred)(&v) {
                    Some(Ok((k, v)))
                } else {
                    self.done = true;
                    None
                }
            }
        }
    }
}

/// Drop leading elements while `pred` holds, then pass everything.
pub struct DropWhile<I, P> {
    src: I,
    pred: P,
    dropping: bool,
}

/// Construct a [`DropWhile`].
#[must_use]
pub fn drop_while<I, P>(src: I, pred: P) -> DropWhile<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    DropWhile {
        src,
        pred,
        dropping: true,
    }
}

impl<I, P> Iterator for DropWhile<I, P>
where
    I: Iterator<Item = Pull>,
    P: FnMut(&Value) -> bool,
{
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        loop {
            match self.src.next()? {
                Err(e) => return Some(Err(e)),
                Ok((k, v)) => {
                    if self.dropping && (self.pred)(&v) {
                        continue;
                    }
                    self.dropping = false;
                    return Some(Ok((k, v)));
                }
            }
        }
    }
}

/// Pass data elements whose aligned selector value is truthy; stops at the
/// shorter of the two sequences.
pub struct Compress<I> {
    src: I,
    selectors: BoxSequence,
    done: bool,
}

/// Construct a [`Compress`].
#[must_use]
pub fn compress<I>(src: I, selectors: BoxSequence) -> Compress<I>
where
    I: Iterator<Item = Pull>,
{
    Compress {
        src,
        selectors,
        done: false,
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Compress<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        loop {
            let data = match self.src.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(entry)) => entry,
            };
            match self.selectors.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok((_, flag))) => {
                    if flag.truthy() {
                        return Some(Ok(data));
                    }
                }
            }
        }
    }
}

/// Yield at most `n` elements; never pulls past the limit.
pub struct Limit<I> {
    src: I,
    n: i64,
    yielded: i64,
    checked: bool,
    done: bool,
}

/// Construct a [`Limit`]. `n` must be non-negative (checked on first pull).
#[must_use]
pub fn limit<I>(src: I, n: i64) -> Limit<I>
where
    I: Iterator<Item = Pull>,
{
    Limit {
        src,
        n,
        yielded: 0,
        checked: false,
        done: false,
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Limit<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        if !self.checked {
            self.checked = true;
            if self.n < 0 {
                self.done = true;
                return Some(Err(Error::NegativeCount {
                    param: "limit count",
                    value: self.n,
                }));
            }
        }
        if self.yielded >= self.n {
            self.done = true;
            return None;
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
            Some(ok) => {
                self.yielded += 1;
                Some(ok)
            }
        }
    }
}

/// Skip `count` elements after letting `offset` elements through.
pub struct Skip<I> {
    src: I,
    count: i64,
    offset: i64,
    passed: i64,
    skipped: i64,
    checked: bool,
    done: bool,
}

/// Construct a [`Skip`]. Both `count` and `offset` must be non-negative
/// (checked on first pull, before any element is yielded).
#[must_use]
pub fn skip<I>(src: I, count: i64, offset: i64) -> Skip<I>
where
    I: Iterator<Item = Pull>,
{
    Skip {
        src,
        count,
        offset,
        passed: 0,
        skipped: 0,
        checked: false,
        done: false,
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Skip<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        if !self.checked {
            self.checked = true;
            if self.count < 0 {
                self.done = true;
                return Some(Err(Error::NegativeCount {
                    param: "skip count",
                    value: self.count,
                }));
            }
            if self.offset < 0 {
                self.done = true;
                return Some(Err(Error::NegativeCount {
                    param: "skip offset",
                    value: self.offset,
                }));
            }
        }
        loop {
            match self.src.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(entry)) => {
                    if self.passed < self.offset {
                        self.passed += 1;
                        return Some(Ok(entry));
                    }
                    if self.skipped < self.count {
                        self.skipped += 1;
                        continue;
                    }
                    return Some(Ok(entry));
                }
            }
        }
    }
}

/// Expand list values one level in place; non-lists pass through.
/// Output is re-indexed with fresh 0-based keys.
pub struct Flatten<I> {
    src: I,
    pending: VecDeque<Value>,
    next_key: i64,
    done: bool,
}

/// Construct a [`Flatten`].
#[must_use]
pub fn flatten<I>(src: I) -> Flatten<I>
where
    I: Iterator<Item = Pull>,
{
    Flatten {
        src,
        pending: VecDeque::new(),
        next_key: 0,
        done: false,
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Flatten<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
        }
        loop {
            if let Some(v) = self.pending.pop_front() {
                let k = self.next_key;
                self.next_key += 1;
                return Some(Ok((Key::Int(k), v)));
            }
            match self.src.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok((_, Value::List(l)))) => self.pending.extend(l),
                Some(Ok((_, v))) => {
                    let k = self.next_key;
                    self.next_key += 1;
                    return Some(Ok((Key::Int(k), v)));
                }
            }
        }
    }
}

/// Terminal fold: consume the whole pipeline into one value.
///
/// # Errors
/// Returns the first in-band error pulled from the pipeline.
pub fn reduce<I, F>(src: I, init: Value, mut f: F) -> Result<Value>
where
    I: Iterator<Item = Pull>,
    F: FnMut(Value, &Value) -> Value,
{
    let mut acc = init;
    for pull in src {
        let (_, v) = pull?;
        acc = f(acc, &v);
    }
    Ok(acc)
}
