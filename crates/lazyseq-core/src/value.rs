//! Dynamically typed element values and their equality/ordering semantics.
//!
//! Every sequence element is a [`Value`]: a closed set of scalar kinds plus
//! nested lists. Three distinct comparison regimes live here, used by
//! different combinators:
//!
//! - **strict equality** ([`StrictKey`]): exact kind and payload; floats
//!   compare by bit pattern so `NaN` equals itself and a table keyed by
//!   strict values stays well-formed.
//! - **coercive equality**: values are canonicalized first via
//!   [`Value::canonicalize`], so `0`, `"0"`, `null` and `false` land on one
//!   key. The table is small, closed, and documented on the method.
//! - **natural ordering** ([`Value::natural_cmp`]): the total cross-kind
//!   order used by the default sort comparator and the min/max reducers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically typed sequence element.
///
/// Serialized form is plain JSON (`untagged`); integral JSON numbers decode
/// to [`Value::Int`], all others to [`Value::Float`]. JSON objects have no
/// counterpart here and fail to decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// A nested ordered list.
    List(Vec<Value>),
}

impl Value {
    /// Truthiness used by flag-driven combinators (`compress`).
    ///
    /// `null`, `false`, `0`, `0.0`, the empty string, `"0"`, and the empty
    /// list are falsy; everything else is truthy.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty() && s != "0",
            Self::List(l) => !l.is_empty(),
        }
    }

    /// Exact integer reading, if this value has one.
    ///
    /// `Null` reads as 0 and booleans as 0/1 so the arithmetic reducers can
    /// stay on the integer path for mixed scalar input. Strings qualify only
    /// when they parse as a whole `i64`.
    fn int_repr(&self) -> Option<i64> {
        match self {
            Self::Null => Some(0),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(i) => Some(*i),
            Self::Str(s) => s.parse::<i64>().ok(),
            Self::Float(_) | Self::List(_) => None,
        }
    }

    /// Lossy float reading for the arithmetic reducers.
    ///
    /// Non-numeric values (non-numeric strings, lists) read as 0.
    #[must_use]
    pub fn float_repr(&self) -> f64 {
        match self {
            Self::Float(f) => *f,
            Self::Str(s) => s.parse::<f64>().unwrap_or(0.0),
            Self::List(_) => 0.0,
            other => other.int_repr().map_or(0.0, |i| i as f64),
        }
    }

    /// `self + other`, staying integral while both operands are and the sum
    /// fits; overflow falls back to float arithmetic.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self::arith(self, other, i64::checked_add, |a, b| a + b)
    }

    /// `self - other`, with the same integer-first rule as [`Value::add`].
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self::arith(self, other, i64::checked_sub, |a, b| a - b)
    }

    /// `self * other`, with the same integer-first rule as [`Value::add`].
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self::arith(self, other, i64::checked_mul, |a, b| a * b)
    }

    /// `self / other`. Exact integer division stays integral; everything
    /// else is float. Division by zero yields a float infinity/NaN rather
    /// than a panic, matching the reducers' no-runtime-error contract.
    #[must_use]
    pub fn div(&self, other: &Self) -> Self {
        if let (Some(a), Some(b)) = (self.int_repr(), other.int_repr()) {
            if b != 0 && a % b == 0 {
                return Self::Int(a / b);
            }
        }
        Self::Float(self.float_repr() / other.float_repr())
    }

    fn arith(
        a: &Self,
        b: &Self,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Self {
        if let (Some(x), Some(y)) = (a.int_repr(), b.int_repr()) {
            if let Some(r) = int_op(x, y) {
                return Self::Int(r);
            }
        }
        Self::Float(float_op(a.float_repr(), b.float_repr()))
    }

    /// Total cross-kind ordering: `Null < Bool < numbers < Str < List`.
    ///
    /// Numbers compare together (`Int` vs `Float` goes through `f64`
    /// total ordering); strings compare lexicographically by code point;
    /// lists compare element-wise.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Int(_) | Value::Float(_) => 2,
                Value::Str(_) => 3,
                Value::List(_) => 4,
            }
        }
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (a @ (Self::Int(_) | Self::Float(_)), b @ (Self::Int(_) | Self::Float(_))) => {
                a.float_repr().total_cmp(&b.float_repr())
            }
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.natural_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }

    /// Canonical representative under coercive equality.
    ///
    /// The closed table:
    /// - `Null` → `0`
    /// - `Bool` → `0` / `1`
    /// - `Float` with an integral, i64-representable payload → `Int`
    /// - `Str` parsing as `i64` → `Int`; as `f64` → the float rule above
    /// - lists canonicalize element-wise
    ///
    /// Everything else (non-numeric strings, fractional floats) is its own
    /// representative. The empty string is *not* numeric and stays a string.
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        match self {
            Self::Null => Self::Int(0),
            Self::Bool(b) => Self::Int(i64::from(*b)),
            Self::Int(i) => Self::Int(*i),
            Self::Float(f) => canonical_float(*f),
            Self::Str(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    Self::Int(i)
                } else if let Ok(f) = s.parse::<f64>() {
                    canonical_float(f)
                } else {
                    Self::Str(s.clone())
                }
            }
            Self::List(l) => Self::List(l.iter().map(Self::canonicalize).collect()),
        }
    }
}

/// Integral, i64-representable floats collapse onto their integer.
fn canonical_float(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Value::Int(f as i64)
    } else {
        Value::Float(f)
    }
}

impl fmt::Display for Value {
    /// JSON-shaped rendering; bare strings print unquoted, nested ones
    /// quoted and escaped (the rendering feeds group-key casting, not
    /// serialization, and must be injective per list).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(l) => {
                f.write_str("[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    match v {
                        Self::Str(s) => write_quoted(f, s)?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("]")
            }
        }
    }
}

/// Quote a nested string, escaping `"` and `\` so distinct lists never
/// share a rendering.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => fmt::Write::write_char(f, c)?,
        }
    }
    f.write_str("\"")
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Self::List(l)
    }
}

/// Hashable wrapper giving [`Value`] strict (type-aware) equality.
///
/// Coercive keys are expressed as `StrictKey(value.canonicalize())`; there
/// is deliberately no second wrapper kind.
#[derive(Clone, Debug)]
pub struct StrictKey(pub Value);

impl PartialEq for StrictKey {
    fn eq(&self, other: &Self) -> bool {
        strict_eq(&self.0, &other.0)
    }
}

impl Eq for StrictKey {}

impl Hash for StrictKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        // Bit equality keeps NaN == NaN and distinguishes -0.0 from 0.0,
        // which is what a hash-table key needs.
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(u, v)| strict_eq(u, v))
        }
        _ => false,
    }
}

fn hash_value<H: Hasher>(v: &Value, state: &mut H) {
    match v {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Int(i) => {
            state.write_u8(2);
            i.hash(state);
        }
        Value::Float(f) => {
            state.write_u8(3);
            f.to_bits().hash(state);
        }
        Value::Str(s) => {
            state.write_u8(4);
            s.hash(state);
        }
        Value::List(l) => {
            state.write_u8(5);
            state.write_usize(l.len());
            for e in l {
                hash_value(e, state);
            }
        }
    }
}
