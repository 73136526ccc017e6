//! Named modules: parameter sets bound to an external implementation.

use std::fmt;

use serde::{Deserialize, Serialize};
use steer_core::errors::SteerError;
use tracing::trace;

use crate::dump::{DumpConfig, Printer};
use crate::parameters::Parameters;
use crate::value::{FromValue, Value};

/// Parameter set tagged with the name of the external module it steers.
///
/// The name lives outside the key space: it is never counted by
/// [`Module::len`] and never yielded by [`Module::iter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    name: String,
    #[serde(default)]
    params: Parameters,
}

impl Module {
    /// Creates a module with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_params(name, Parameters::new())
    }

    /// Creates a module around an existing parameter set.
    pub fn with_params(name: impl Into<String>, params: Parameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Builder form of [`Module::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.set(key, value);
        self
    }

    /// Dispatch name of the external implementation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regular parameters of the module.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Mutable access to the regular parameters.
    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    /// Drops the name and returns the regular parameters.
    pub fn into_params(self) -> Parameters {
        self.params
    }

    /// Number of regular parameters; the name is not counted.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the module holds no regular parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// See [`Parameters::contains_key`].
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// See [`Parameters::get`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// See [`Parameters::get_mut`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.params.get_mut(key)
    }

    /// See [`Parameters::get_or`].
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> T {
        self.params.get_or(key, default)
    }

    /// See [`Parameters::require`].
    pub fn require(&self, key: &str) -> Result<&Value, SteerError> {
        self.params.require(key)
    }

    /// See [`Parameters::set`].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.set(key, value);
        self
    }

    /// See [`Parameters::remove`].
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.params.remove(key)
    }

    /// Iterates over the regular parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.params.iter()
    }

    /// Deep copy of the parameters under a new name, with `overrides` applied.
    pub fn clone_as<I, K, V>(&self, name: impl Into<String>, overrides: I) -> Module
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        trace!(from = %self.name, to = %name, "cloning module");
        Module::with_params(name, self.params.clone_with(overrides))
    }

    /// Renders the module with the default layout.
    pub fn dump(&self) -> String {
        self.dump_with(&DumpConfig::default())
    }

    /// Renders the module with a custom layout.
    pub fn dump_with(&self, config: &DumpConfig) -> String {
        Printer::render(config, |printer, out| printer.module(out, self, 0))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
