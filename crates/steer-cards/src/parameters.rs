//! Ordered, string-keyed parameter sets.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use steer_core::errors::{ErrorInfo, SteerError};
use tracing::{debug, trace};

use crate::dump::{DumpConfig, Printer};
use crate::hash::canonical_hash;
use crate::value::{FromValue, Value};

/// Ordered mapping from parameter names to values.
///
/// Keys are unique and keep their first insertion position; overwriting a key
/// replaces the value in place. The set owns its whole value tree, so
/// [`Clone`] (and [`Parameters::clone_with`]) always produce a fully isolated
/// deep copy.
///
/// Equality is order sensitive: two sets are equal when they hold the same
/// entries in the same order, which is also when their dumps are identical.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: IndexMap<String, Value>,
}

impl Parameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from key/value pairs; later pairs override earlier ones.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut params = Self::new();
        params.extend(entries);
        params
    }

    /// Builder form of [`Parameters::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is bound.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the value bound to `key`, or `None` when it is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to the value bound to `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Binds `key` to `value`, creating the key or overwriting it in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Unbinds `key`, keeping the relative order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns the typed value bound to `key`, or `default` when the key is
    /// missing or bound to an incompatible variant.
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Some(value) => match T::from_value(value) {
                Some(typed) => typed,
                None => {
                    debug!(key, kind = value.kind(), "parameter has another type, using default");
                    default
                }
            },
            None => {
                debug!(key, "parameter not set, using default");
                default
            }
        }
    }

    /// Returns the value bound to `key`, failing with
    /// [`SteerError::MissingKey`] when it is absent.
    pub fn require(&self, key: &str) -> Result<&Value, SteerError> {
        self.get(key).ok_or_else(|| {
            SteerError::MissingKey(
                ErrorInfo::new("missing-key", format!("parameter '{key}' is not set"))
                    .with_context("key", key),
            )
        })
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Deep copy of this set with `overrides` applied on top.
    pub fn clone_with<I, K, V>(&self, overrides: I) -> Parameters
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut out = self.clone();
        for (key, value) in overrides {
            let key = key.into();
            trace!(key = %key, "applying clone override");
            out.entries.insert(key, value.into());
        }
        out
    }

    /// Overlays `other` onto this set.
    ///
    /// Nested parameter sets bound on both sides are merged recursively, and
    /// so are modules sharing the same name. Any other value from `other`,
    /// including a module under a different name, replaces ours. Keys only
    /// present in `other` are appended in its order.
    pub fn merge(&mut self, other: &Parameters) {
        for (key, value) in other.iter() {
            match (self.entries.get_mut(key), value) {
                (Some(Value::Params(mine)), Value::Params(theirs)) => {
                    trace!(key, "merging nested parameters");
                    mine.merge(theirs);
                }
                (Some(Value::Module(mine)), Value::Module(theirs))
                    if mine.name() == theirs.name() =>
                {
                    trace!(key, name = theirs.name(), "merging module parameters");
                    mine.params_mut().merge(theirs.params());
                }
                _ => {
                    self.entries.insert(key.to_owned(), value.clone());
                }
            }
        }
    }

    /// Reports the keys whose values differ between `self` and `other`.
    ///
    /// The result holds two nested sets, `mine` and `theirs`, each carrying
    /// the differing entries of one side. Keys bound on one side only appear
    /// in that side's set. Identical inputs give two empty sets.
    pub fn diff(&self, other: &Parameters) -> Parameters {
        let mut mine = Parameters::new();
        let mut theirs = Parameters::new();
        for (key, value) in self.iter() {
            match other.get(key) {
                Some(their_value) if their_value == value => {}
                Some(their_value) => {
                    mine.set(key, value.clone());
                    theirs.set(key, their_value.clone());
                }
                None => {
                    mine.set(key, value.clone());
                }
            }
        }
        for (key, their_value) in other.iter() {
            if !self.contains_key(key) {
                theirs.set(key, their_value.clone());
            }
        }
        Parameters::new().with("mine", mine).with("theirs", theirs)
    }

    /// Renders the set with the default layout.
    pub fn dump(&self) -> String {
        self.dump_with(&DumpConfig::default())
    }

    /// Renders the set with a custom layout.
    pub fn dump_with(&self, config: &DumpConfig) -> String {
        Printer::render(config, |printer, out| printer.parameters(out, self, 0))
    }

    /// Hex SHA-256 digest of the canonical JSON encoding.
    pub fn fingerprint(&self) -> Result<String, SteerError> {
        canonical_hash(self)
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Parameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value.into());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl IntoIterator for Parameters {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
