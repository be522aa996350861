//! Frequency tables: per-value occurrence counts, strict or coercive.
//!
//! An eager terminal aggregation exposed as a lazy iterator over its own
//! finished result: the upstream is drained on the first pull, then
//! `(representative value, count)` pairs replay in first-seen order. The
//! representative is the first-encountered value of its equivalence class.
//!
//! Strict mode distinguishes kind and payload (`0`, `"0"`, `null`, `false`
//! are four keys); coercive mode counts through [`Value::canonicalize`]
//! (those four collapse into one key).

use crate::error::{Error, Result};
use crate::source::Pull;
use crate::value::{StrictKey, Value};
use std::collections::HashMap;
use std::vec;

struct Table<I> {
    src: Option<I>,
    strict: bool,
    out: vec::IntoIter<(Value, u64)>,
    total: u64,
    failed: Option<Error>,
    done: bool,
}

impl<I: Iterator<Item = Pull>> Table<I> {
    fn new(src: I, strict: bool) -> Self {
        Self {
            src: Some(src),
            strict,
            out: Vec::new().into_iter(),
            total: 0,
            failed: None,
            done: false,
        }
    }

    fn drain(&mut self) {
        let Some(src) = self.src.take() else { return };
        let mut order: Vec<(Value, u64)> = Vec::new();
        let mut index: HashMap<StrictKey, usize> = HashMap::new();
        for pull in src {
            let v = match pull {
                Ok((_, v)) => v,
                Err(e) => {
                    self.failed = Some(e);
                    return;
                }
            };
            self.total += 1;
            let key = if self.strict {
                StrictKey(v.clone())
            } else {
                StrictKey(v.canonicalize())
            };
            match index.get(&key) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(key, order.len());
                    order.push((v, 1));
                }
            }
        }
        self.out = order.into_iter();
    }

    /// Pull the next finished row, draining on the first call.
    fn next_row(&mut self) -> Option<Result<(Value, u64)>> {
        if self.done {
            return None;
        }
        if self.src.is_some() {
            self.drain();
        }
        if let Some(e) = self.failed.take() {
            self.done = true;
            return Some(Err(e));
        }
        match self.out.next() {
            Some(row) => Some(Ok(row)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Absolute occurrence counts in first-seen order.
pub struct Frequencies<I> {
    table: Table<I>,
}

/// Count occurrences per distinct value.
#[must_use]
pub fn frequencies<I>(src: I, strict: bool) -> Frequencies<I>
where
    I: Iterator<Item = Pull>,
{
    Frequencies {
        table: Table::new(src, strict),
    }
}

impl<I: Iterator<Item = Pull>> Iterator for Frequencies<I> {
    type Item = Result<(Value, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.table.next_row()
    }
}

/// Counts divided by the total number of elements seen.
///
/// An empty source yields an empty table (no division by zero); for a
/// non-empty source the emitted fractions sum to 1 within floating-point
/// tolerance.
pub struct RelativeFrequencies<I> {
    table: Table<I>,
}

/// Count relative occurrence frequencies per distinct value.
#[must_use]
pub fn relative_frequencies<I>(src: I, strict: bool) -> RelativeFrequencies<I>
where
    I: Iterator<Item = Pull>,
{
    RelativeFrequencies {
        table: Table::new(src, strict),
    }
}

impl<I: Iterator<Item = Pull>> Iterator for RelativeFrequencies<I> {
    type Item = Result<(Value, f64)>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.table.next_row()?;
        let total = self.table.total as f64;
        Some(row.map(|(v, n)| (v, n as f64 / total)))
    }
}
