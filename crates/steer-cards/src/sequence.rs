//! Ordered module pipelines with tombstone removal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dump::{DumpConfig, Printer};
use crate::module::Module;
use crate::parameters::Parameters;

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    module: Option<Module>,
}

/// Ordered collection of modules keyed by module name.
///
/// Slots are never physically removed: [`Sequence::remove`] leaves a
/// tombstone so the slot positions of the survivors stay stable. Iteration,
/// [`Sequence::len`] and equality only see surviving modules.
///
/// Serialization only persists survivors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Module>", from = "Vec<Module>")]
pub struct Sequence {
    slots: Vec<Slot>,
    index: BTreeMap<String, usize>,
}

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence in the given order; later modules win on name
    /// collisions and keep the slot of the first occurrence.
    pub fn from_modules<I: IntoIterator<Item = Module>>(modules: I) -> Self {
        let mut sequence = Self::new();
        for module in modules {
            sequence.push(module);
        }
        sequence
    }

    /// Appends `module`, or replaces the module with the same name in place.
    ///
    /// Pushing a name that was removed earlier revives its original slot.
    pub fn push(&mut self, module: Module) {
        if let Some(&slot) = self.index.get(module.name()) {
            let entry = &mut self.slots[slot];
            if entry.module.is_none() {
                debug!(name = module.name(), slot, "reviving removed sequence slot");
            } else {
                debug!(name = module.name(), slot, "replacing module in sequence");
            }
            entry.module = Some(module);
            return;
        }
        let slot = self.slots.len();
        self.index.insert(module.name().to_owned(), slot);
        self.slots.push(Slot {
            name: module.name().to_owned(),
            module: Some(module),
        });
    }

    /// Tombstones the module called `name` and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Module> {
        let slot = *self.index.get(name)?;
        self.remove_at(slot)
    }

    /// Tombstones the module stored at slot position `slot` and returns it.
    pub fn remove_at(&mut self, slot: usize) -> Option<Module> {
        let entry = self.slots.get_mut(slot)?;
        let removed = entry.module.take();
        if removed.is_some() {
            debug!(name = %entry.name, slot, "tombstoned sequence slot");
        }
        removed
    }

    /// Stable slot position of the surviving module called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        let slot = *self.index.get(name)?;
        self.slots[slot].module.as_ref().map(|_| slot)
    }

    /// Whether a surviving module called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Surviving module called `name`.
    pub fn get(&self, name: &str) -> Option<&Module> {
        let slot = *self.index.get(name)?;
        self.slots[slot].module.as_ref()
    }

    /// Mutable access to the parameters of the surviving module called
    /// `name`. The module name stays fixed; use [`Sequence::push`] to rebind
    /// a slot.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameters> {
        let slot = *self.index.get(name)?;
        self.slots[slot].module.as_mut().map(Module::params_mut)
    }

    /// Number of surviving modules.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no module survives.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Number of slots, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over surviving modules in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Iterates over the names of surviving modules in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(Module::name)
    }

    /// Renders the sequence with the default layout.
    pub fn dump(&self) -> String {
        self.dump_with(&DumpConfig::default())
    }

    /// Renders the sequence with a custom layout.
    pub fn dump_with(&self, config: &DumpConfig) -> String {
        Printer::render(config, |printer, out| printer.sequence(out, self, 0))
    }
}

/// Iterator over the surviving modules of a [`Sequence`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Module;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| slot.module.as_ref())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Module;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl FromIterator<Module> for Sequence {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        Self::from_modules(iter)
    }
}

impl From<Vec<Module>> for Sequence {
    fn from(modules: Vec<Module>) -> Self {
        Self::from_modules(modules)
    }
}

impl From<Sequence> for Vec<Module> {
    fn from(sequence: Sequence) -> Self {
        sequence
            .slots
            .into_iter()
            .filter_map(|slot| slot.module)
            .collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
