//! Element keys and associative-array key casting.
//!
//! Keys are either integers or strings, matching the associative-array model
//! the combinators preserve. Sources with positional elements get contiguous
//! `Int` keys; keyed sources keep whatever they carried. Group keys go
//! through the casting table on [`Key::from_value`].

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An element's key: its position or label in the sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Positional or numeric key.
    Int(i64),
    /// Label key.
    Str(String),
}

impl Key {
    /// Cast a value to a key the way associative arrays do:
    ///
    /// - `Int` stays; `Bool` → `0`/`1`; `Float` truncates toward zero;
    /// - `Null` → the empty string key;
    /// - strings in canonical `i64` form (optional `-`, no leading zeros)
    ///   become `Int`, all other strings stay `Str`;
    /// - lists render to their display form (a list is not a scalar key,
    ///   but a multi-key selector result is unpacked *before* this cast).
    #[must_use]
    pub fn from_value(v: &Value) -> Self {
        match v {
            Value::Null => Self::Str(String::new()),
            Value::Bool(b) => Self::Int(i64::from(*b)),
            Value::Int(i) => Self::Int(*i),
            Value::Float(f) if f.is_finite() => Self::Int(*f as i64),
            Value::Float(f) => Self::Str(f.to_string()),
            Value::Str(s) => canonical_int(s).map_or_else(|| Self::Str(s.clone()), Self::Int),
            Value::List(_) => Self::Str(v.to_string()),
        }
    }
}

/// Parse `s` as an `i64` only if `s` is its canonical rendering
/// (so `"08"`, `"1.0"`, and `" 1"` stay string keys).
fn canonical_int(s: &str) -> Option<i64> {
    let i: i64 = s.parse().ok()?;
    (i.to_string() == s).then_some(i)
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        match k {
            Key::Int(i) => Self::Int(i),
            Key::Str(s) => Self::Str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casting_table() {
        assert_eq!(Key::from_value(&Value::Bool(true)), Key::Int(1));
        assert_eq!(Key::from_value(&Value::Float(3.9)), Key::Int(3));
        assert_eq!(Key::from_value(&Value::Null), Key::Str(String::new()));
        assert_eq!(Key::from_value(&Value::Str("42".into())), Key::Int(42));
        assert_eq!(Key::from_value(&Value::Str("-7".into())), Key::Int(-7));
        assert_eq!(Key::from_value(&Value::Str("08".into())), Key::Str("08".into()));
        assert_eq!(Key::from_value(&Value::Str("a".into())), Key::Str("a".into()));
    }

    #[test]
    fn list_keys_escape_embedded_quotes() {
        // A quote inside a member must not render like a member boundary.
        let tricky = Value::List(vec![Value::Str("a\",\"b".into())]);
        let plain = Value::List(vec![Value::Str("a".into()), Value::Str("b".into())]);
        assert_ne!(Key::from_value(&tricky), Key::from_value(&plain));
        assert_eq!(
            Key::from_value(&tricky),
            Key::Str("[\"a\\\",\\\"b\"]".into())
        );
    }
}
