//! Fluent pipeline surface: every combinator as a chainable method.
//!
//! Blanket-implemented for anything that yields [`Pull`] items, so adapter
//! output and combinator output compose the same way:
//!
//! ```
//! use lazyseq_core::prelude::*;
//!
//! let chunks: Vec<Value> = Sequence::from_values(
//!     (1..=5).map(Value::Int).collect(),
//! )
//! .chunkwise_overlap(3, 1)
//! .map(|r| r.unwrap().1)
//! .collect();
//! assert_eq!(chunks.len(), 2);
//! ```

use crate::error::Result;
use crate::freq::{self, Frequencies, RelativeFrequencies};
use crate::group::{self, GroupBy};
use crate::running::{self, Running, RunningAverage};
use crate::sort::{self, Sorted};
use crate::source::{BoxSequence, Entry, Pull};
use crate::transform::{
    self, Compress, DropWhile, Filter, Flatten, Limit, Map, Skip, TakeWhile,
};
use crate::value::Value;
use crate::window::{self, Chunkwise, ChunkwiseOverlap, Pairwise};
use std::cmp::Ordering;

/// Chainable combinator methods over any pull-based sequence.
pub trait SequenceExt: Iterator<Item = Pull> + Sized {
    /// Type-erase for heterogeneous multi-source combinators.
    fn boxed(self) -> BoxSequence
    where
        Self: 'static,
    {
        Box::new(self)
    }

    /// Map values, keeping keys.
    fn map_values<F: FnMut(Value) -> Value>(self, f: F) -> Map<Self, F> {
        transform::map(self, f)
    }

    /// Keep elements matching `pred`, keys kept.
    fn filter_values<P: FnMut(&Value) -> bool>(self, pred: P) -> Filter<Self, P> {
        transform::filter(self, pred)
    }

    /// Keep elements failing `pred`, keys kept.
    fn filter_false<P: FnMut(&Value) -> bool>(self, pred: P) -> Filter<Self, P> {
        transform::filter_false(self, pred)
    }

    /// Yield while `pred` holds.
    fn take_while_values<P: FnMut(&Value) -> bool>(self, pred: P) -> TakeWhile<Self, P> {
        transform::take_while(self, pred)
    }

    /// Drop the leading run where `pred` holds.
    fn drop_while_values<P: FnMut(&Value) -> bool>(self, pred: P) -> DropWhile<Self, P> {
        transform::drop_while(self, pred)
    }

    /// Keep elements whose aligned selector value is truthy.
    fn compress(self, selectors: BoxSequence) -> Compress<Self> {
        transform::compress(self, selectors)
    }

    /// At most `n` elements; `n >= 0` checked lazily.
    fn limit(self, n: i64) -> Limit<Self> {
        transform::limit(self, n)
    }

    /// Skip `count` elements after `offset`; both checked lazily.
    /// (Named apart from `Iterator::skip` so the two never shadow.)
    fn skip_values(self, count: i64, offset: i64) -> Skip<Self> {
        transform::skip(self, count, offset)
    }

    /// Expand list values one level.
    fn flatten_values(self) -> Flatten<Self> {
        transform::flatten(self)
    }

    /// Map then flatten one level.
    fn flat_map_values<F: FnMut(Value) -> Value>(self, f: F) -> Flatten<Map<Self, F>> {
        transform::flatten(transform::map(self, f))
    }

    /// Overlapping 2-windows.
    fn pairwise(self) -> Pairwise<Self> {
        window::pairwise(self)
    }

    /// Non-overlapping chunks of up to `size`.
    fn chunkwise(self, size: i64) -> Chunkwise<Self> {
        window::chunkwise(self, size)
    }

    /// Chunks sharing `overlap` elements between neighbors.
    fn chunkwise_overlap(self, size: i64, overlap: i64) -> ChunkwiseOverlap<Self> {
        window::chunkwise_overlap(self, size, overlap)
    }

    /// Group by a single- or multi-valued key selector.
    fn group_by<KF: FnMut(&Value) -> Value>(self, key_sel: KF) -> GroupBy<Self, KF> {
        group::group_by(self, key_sel)
    }

    /// Group with a secondary item-key selector.
    fn group_by_keyed<KF, SF>(self, key_sel: KF, item_sel: SF) -> GroupBy<Self, KF, SF>
    where
        KF: FnMut(&Value) -> Value,
        SF: FnMut(&Value) -> Value,
    {
        group::group_by_keyed(self, key_sel, item_sel)
    }

    /// Stable sort under the natural cross-kind order (eager on input).
    fn sorted(self) -> Sorted<Self, fn(&Value, &Value) -> Ordering> {
        sort::sorted(self)
    }

    /// Stable sort under a caller comparator (eager on input).
    fn sorted_by<F: FnMut(&Value, &Value) -> Ordering>(self, cmp: F) -> Sorted<Self, F> {
        sort::sorted_by(self, cmp)
    }

    /// Cumulative sum scan.
    fn running_total(self, seed: Option<Value>) -> Running<Self> {
        running::running_total(self, seed)
    }

    /// Cumulative product scan.
    fn running_product(self, seed: Option<Value>) -> Running<Self> {
        running::running_product(self, seed)
    }

    /// Subtracting scan.
    fn running_difference(self, seed: Option<Value>) -> Running<Self> {
        running::running_difference(self, seed)
    }

    /// Running maximum scan.
    fn running_max(self, seed: Option<Value>) -> Running<Self> {
        running::running_max(self, seed)
    }

    /// Running minimum scan.
    fn running_min(self, seed: Option<Value>) -> Running<Self> {
        running::running_min(self, seed)
    }

    /// Running mean scan.
    fn running_average(self, seed: Option<Value>) -> RunningAverage<Self> {
        running::running_average(self, seed)
    }

    /// Occurrence counts per distinct value (eager on input).
    fn frequencies(self, strict: bool) -> Frequencies<Self> {
        freq::frequencies(self, strict)
    }

    /// Relative occurrence frequencies (eager on input).
    fn relative_frequencies(self, strict: bool) -> RelativeFrequencies<Self> {
        freq::relative_frequencies(self, strict)
    }

    /// Terminal fold into one value.
    ///
    /// # Errors
    /// Returns the first in-band error pulled from the pipeline.
    fn reduce_values<F: FnMut(Value, &Value) -> Value>(self, init: Value, f: F) -> Result<Value> {
        transform::reduce(self, init, f)
    }

    /// Drain into a value vector, surfacing the first in-band error.
    ///
    /// # Errors
    /// Returns the first in-band error pulled from the pipeline.
    fn collect_values(self) -> Result<Vec<Value>> {
        self.map(|r| r.map(|(_, v)| v)).collect()
    }

    /// Drain into an entry vector, surfacing the first in-band error.
    ///
    /// # Errors
    /// Returns the first in-band error pulled from the pipeline.
    fn collect_entries(self) -> Result<Vec<Entry>> {
        self.collect()
    }
}

impl<T: Iterator<Item = Pull>> SequenceExt for T {}
