// crates/lazyseq-core/src/window.rs

//! Window engine: pairwise, chunkwise, and overlapping chunkwise views.
//!
//! Each combinator owns a bounded rolling buffer and validates its
//! parameters lazily: the invalid-argument error is the *first pulled
//! item*, never a construction-time panic, so building a pipeline without
//! iterating it never fails.

use crate::error::Error;
use crate::key::Key;
use crate::source::Pull;
use crate::value::Value;
use std::mem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Parameters not yet validated (first pull pending).
    Unchecked,
    Running,
    Done,
}

/// Consecutive overlapping 2-windows.
///
/// Emits `n - 1` pairs for an input of length `n >= 2`, nothing otherwise.
/// Holds exactly one previous-value slot.
pub struct Pairwise<I> {
    src: I,
    prev: Option<Value>,
    next_key: i64,
    done: bool,
}

/// Construct a [`Pairwise`] over `src`.
#[must_use]
pub fn pairwise<I>(src: I) -> Pairwise<I>
where
    I: Iterator<Item = Pull>,
{
    Pairwise {
        src,
        prev: None,
        next_key: 0,
        done: false,
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Pairwise<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        if self.done {
            return None;
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
                Some(Ok((_, v))) => match self.prev.take() {
                    None => self.prev = Some(v),
                    Some(p) => {
                        let pair = Value::List(vec![p, v.clone()]);
                        self.prev = Some(v);
                        let k = self.next_key;
                        self.next_key += 1;
                        return Some(Ok((Key::Int(k), pair)));
                    }
                },
            }
        }
    }
}

/// Non-overlapping chunks of up to `size` elements; the last may be short.
pub struct Chunkwise<I> {
    src: I,
    size: i64,
    buf: Vec<Value>,
    next_key: i64,
    state: State,
}

/// Construct a [`Chunkwise`] over `src`. `size >= 1`, checked on first pull.
#[must_use]
pub fn chunkwise<I>(src: I, size: i64) -> Chunkwise<I>
where
    I: Iterator<Item = Pull>,
{
    Chunkwise {
        src,
        size,
        buf: Vec::new(),
        next_key: 0,
        state: State::Unchecked,
    }
}

impl<I: Iterator<Item = Pull>> Chunkwise<I> {
    fn emit(&mut self) -> Pull {
        let chunk = Value::List(mem::take(&mut self.buf));
        let k = self.next_key;
        self.next_key += 1;
        Ok((Key::Int(k), chunk))
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Chunkwise<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        match self.state {
            State::Done => return None,
            State::Unchecked => {
                self.state = State::Done;
                if self.size < 1 {
                    return Some(Err(Error::InvalidChunkSize(self.size)));
                }
                self.state = State::Running;
            }
            State::Running => {}
        }
        loop {
            match self.src.next() {
                None => {
                    self.state = State::Done;
                    if self.buf.is_empty() {
                        return None;
                    }
                    return Some(self.emit());
                }
                Some(Err(e)) => {
                    self.state = State::Done;
                    return Some(Err(e));
                }
                Some(Ok((_, v))) => {
                    self.buf.push(v);
                    if self.buf.len() == self.size as usize {
                        return Some(self.emit());
                    }
                }
            }
        }
    }
}

/// Chunks of `size` where consecutive windows share `overlap` elements.
///
/// Each window after the first starts with the previous window's last
/// `overlap` elements. On exhaustion the partial buffer is emitted only if
/// it holds at least one element beyond the carried overlap; a buffer
/// that is *only* the carry-over is never re-emitted.
pub struct ChunkwiseOverlap<I> {
    src: I,
    size: i64,
    overlap: i64,
    buf: Vec<Value>,
    /// How many leading buffer elements were carried from the last emission.
    carried: usize,
    next_key: i64,
    state: State,
}

/// Construct a [`ChunkwiseOverlap`] over `src`.
///
/// `size >= 1` and `0 <= overlap < size`, both checked on first pull.
#[must_use]
pub fn chunkwise_overlap<I>(src: I, size: i64, overlap: i64) -> ChunkwiseOverlap<I>
where
    I: Iterator<Item = Pull>,
{
    ChunkwiseOverlap {
        src,
        size,
        overlap,
        buf: Vec::new(),
        carried: 0,
        next_key: 0,
        state: State::Unchecked,
    }
}

impl<I: Iterator<Item = Pull>> ChunkwiseOverlap<I> {
    fn emit_full(&mut self) -> Pull {
        let chunk = Value::List(self.buf.clone());
        // Retain only the trailing overlap as the seed of the next window.
        self.buf.drain(..self.buf.len() - self.overlap as usize);
        self.carried = self.buf.len();
        let k = self.next_key;
        self.next_key += 1;
        Ok((Key::Int(k), chunk))
    }
}

impl<I: Iterator<Item = Pull>> Iterator for ChunkwiseOverlap<I> {
    type Item = Pull;

    fn next(&mut self) -> Option<Pull> {
        match self.state {
            State::Done => return None,
            State::Unchecked => {
                self.state = State::Done;
                if self.size < 1 {
                    return Some(Err(Error::InvalidChunkSize(self.size)));
                }
                if self.overlap < 0 {
                    return Some(Err(Error::NegativeCount {
                        param: "overlap size",
                        value: self.overlap,
                    }));
                }
                if self.overlap >= self.size {
                    return Some(Err(Error::OverlapTooLarge {
                        overlap: self.overlap,
                        chunk: self.size,
                    }));
                }
                self.state = State::Running;
            }
            State::Running => {}
        }
        loop {
            match self.src.next() {
                None => {
                    self.state = State::Done;
                    if self.buf.len() > self.carried {
                        let chunk = Value::List(mem::take(&mut self.buf));
                        let k = self.next_key;
                        self.next_key += 1;
                        return Some(Ok((Key::Int(k), chunk)));
                    }
                    return None;
                }
                Some(Err(e)) => {
                    self.state = State::Done;
                    return Some(Err(e));
                }
                Some(Ok((_, v))) => {
                    self.buf.push(v);
                    if self.buf.len() == self.size as usize {
                        return Some(self.emit_full());
                    }
                }
            }
        }
    }
}
