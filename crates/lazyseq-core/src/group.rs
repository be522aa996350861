//! Grouping engine: ordered groups with optional multi-membership.
//!
//! ## Contract
//! - Groups are yielded in **first-seen** order; members keep arrival order.
//! - A key selector returning `Value::List` names *several* groups and the
//!   element joins each of them, in list order.
//! - With an item-key selector, members form an ordered map: a colliding
//!   secondary key overwrites the earlier value but keeps its position.
//! - A later element can still join an earlier-seen group, so final member
//!   lists require the whole upstream. The engine therefore drains its
//!   input on the first pull and replays finished groups lazily, the same
//!   documented eager-on-input contract as the sort stage.
//!
//! Selector panics propagate; the engine catches nothing.

use crate::error::{Error, Result};
use crate::key::Key;
use crate::source::{BoxSequence, Pull};
use crate::value::Value;
use std::collections::{HashMap, VecDeque};

/// One finished group: a key plus its ordered members.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    /// The group key, as cast by [`Key::from_value`].
    pub key: Key,
    /// The ordered member collection.
    pub members: Members,
}

/// A group's member collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Members {
    /// Append-only ordered list (no item-key selector).
    List(Vec<Value>),
    /// Ordered map keyed by the item-key selector; last write wins.
    Keyed(Vec<(Key, Value)>),
}

impl Group {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.members {
            Members::List(l) => l.len(),
            Members::Keyed(m) => m.len(),
        }
    }

    /// Whether the group is empty (it never is once yielded).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member values in order, discarding any secondary keys.
    #[must_use]
    pub fn into_value(self) -> Value {
        let vals = match self.members {
            Members::List(l) => l,
            Members::Keyed(m) => m.into_iter().map(|(_, v)| v).collect(),
        };
        Value::List(vals)
    }
}

/// The grouping engine. Iterates `Result<Group>` in first-seen order.
pub struct GroupBy<I, KF, SF = fn(&Value) -> Value> {
    src: Option<I>,
    key_sel: KF,
    item_sel: Option<SF>,
    out: VecDeque<Group>,
    failed: Option<Error>,
    done: bool,
}

/// Group by a single- or multi-valued key selector.
#[must_use]
pub fn group_by<I, KF>(src: I, key_sel: KF) -> GroupBy<I, KF>
where
    I: Iterator<Item = Pull>,
    KF: FnMut(&Value) -> Value,
{
    GroupBy {
        src: Some(src),
        key_sel,
        item_sel: None,
        out: VecDeque::new(),
        failed: None,
        done: false,
    }
}

/// Group with a secondary item-key selector (members become ordered maps).
#[must_use]
pub fn group_by_keyed<I, KF, SF>(src: I, key_sel: KF, item_sel: SF) -> GroupBy<I, KF, SF>
where
    I: Iterator<Item = Pull>,
    KF: FnMut(&Value) -> Value,
    SF: FnMut(&Value) -> Value,
{
    GroupBy {
        src: Some(src),
        key_sel,
        item_sel: Some(item_sel),
        out: VecDeque::new(),
        failed: None,
        done: false,
    }
}

impl<I, KF, SF> GroupBy<I, KF, SF>
where
    I: Iterator<Item = Pull>,
    KF: FnMut(&Value) -> Value,
    SF: FnMut(&Value) -> Value,
{
    fn drain(&mut self) {
        let Some(src) = self.src.take() else { return };
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<Key, usize> = HashMap::new();

        for pull in src {
            let v = match pull {
                Ok((_, v)) => v,
                Err(e) => {
                    // Upstream failure preempts all output.
                    self.failed = Some(e);
                    return;
                }
            };
            let selected = (self.key_sel)(&v);
            let keys: Vec<Key> = match selected {
                Value::List(ks) => ks.iter().map(Key::from_value).collect(),
                scalar => vec![Key::from_value(&scalar)],
            };
            for gk in keys {
                let keyed = self.item_sel.is_some();
                let gi = *index.entry(gk.clone()).or_insert_with(|| {
                    groups.push(Group {
                        key: gk.clone(),
                        members: if keyed {
                            Members::Keyed(Vec::new())
                        } else {
                            Members::List(Vec::new())
                        },
                    });
                    groups.len() - 1
                });
                match &mut groups[gi].members {
                    Members::List(l) => l.push(v.clone()),
                    // Keyed members only exist when an item selector was given.
                    Members::Keyed(m) => {
                        if let Some(sel) = self.item_sel.as_mut() {
                            let ik = Key::from_value(&sel(&v));
                            match m.iter_mut().find(|(k, _)| *k == ik) {
                                Some(slot) => slot.1 = v.clone(),
                                None => m.push((ik, v.clone())),
                            }
                        }
                    }
                }
            }
        }
        self.out = groups.into();
    }

    /// Re-expose the groups as a `(group key, member list)` sequence.
    pub fn into_sequence(self) -> BoxSequence
    where
        I: 'static,
        KF: 'static,
        SF: 'static,
    {
        Box::new(self.map(|r| r.map(|g| (g.key.clone(), g.into_value()))))
    }
}

impl<I, KF, SF> Iterator for GroupBy<I, KF, SF>
where
    I: Iterator<Item = Pull>,
    KF: FnMut(&Value) -> Value,
    SF: FnMut(&Value) -> Value,
{
    type Item = Result<Group>;

    fn next(&mut self) -> Option<Self::Item> {
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
        match self.out.pop_front() {
            Some(g) => Some(Ok(g)),
            None => {
                self.done = true;
                None
            }
        }
    }
}
