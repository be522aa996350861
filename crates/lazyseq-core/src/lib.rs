//! lazyseq-core — lazy sequence-transformation combinators over dynamic values.
//!
//! This crate is the **stable boundary** of the lazyseq workspace:
//! - canonical element types ([`Value`], [`Key`]) and their equality and
//!   ordering regimes (strict, coercive, natural),
//! - the **Sequence Adapter** normalizing every supported source into one
//!   pull-based lazy sequence of `(key, value)` pairs,
//! - multi-source synchronization (`zip`/`chain`), windowing (`pairwise`,
//!   `chunkwise`, `chunkwise_overlap`), grouping, buffered stable sort,
//!   running reducers, frequency tables, and
//! - streaming JSONL ingestion/egress helpers.
//!
//! Everything is cooperative and pull-based: a combinator advances only
//! when its consumer asks for the next element, and a consumer that stops
//! early never triggers evaluation past the last element it took. Errors,
//! including parameter contract violations (which surface on the *first
//! pull*, not at construction), travel in-band as `Err` items.
//!
//! ```
//! use lazyseq_core::prelude::*;
//!
//! let totals = Sequence::from_values(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
//!     .running_total(Some(Value::Int(5)))
//!     .collect_values()
//!     .unwrap();
//! assert_eq!(
//!     totals,
//!     vec![Value::Int(5), Value::Int(6), Value::Int(8), Value::Int(11)]
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::doc_markdown
)]

/// Error taxonomy carried in-band by pulled items.
pub mod error;
/// Frequency tables (strict/coercive, absolute/relative).
pub mod freq;
/// Grouping engine with multi-membership and ordered members.
pub mod group;
/// Streaming JSONL read/write helpers.
pub mod io_jsonl;
/// Element keys and associative-array key casting.
pub mod key;
/// Lock-step zip and sequential chain.
pub mod multi;
/// Fluent chainable combinator surface.
pub mod pipe;
/// Running reducers (scan-style aggregation).
pub mod running;
/// Buffered stable sort stage.
pub mod sort;
/// Sequence adapter over the closed set of source kinds.
pub mod source;
/// Simple element-wise wrappers (map/filter/limit/skip/…).
pub mod transform;
/// Dynamic values and their equality/ordering semantics.
pub mod value;
/// Window engine (pairwise/chunkwise/chunkwise_overlap).
pub mod window;

pub use error::{Error, Result};
pub use key::Key;
pub use source::{BoxSequence, Entry, Pull, Sequence, Source};
pub use value::Value;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use lazyseq_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::group::{Group, Members};
    pub use crate::key::Key;
    pub use crate::multi::{chain, zip};
    pub use crate::pipe::SequenceExt;
    pub use crate::source::{repeat, BoxSequence, Entry, Pull, Sequence, Source};
    pub use crate::value::Value;
}
