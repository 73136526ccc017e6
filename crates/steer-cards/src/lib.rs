#![deny(missing_docs)]

//! Steering-card containers for an external event generator.
//!
//! A card is a tree of [`Parameters`] (ordered key/value sets), [`Module`]s
//! (parameter sets tagged with the name of the external implementation they
//! configure) and [`Sequence`]s (ordered module pipelines). Containers own
//! their whole value tree: cloning is always a deep copy, and
//! [`Parameters::clone_with`] / [`Module::clone_as`] derive isolated variants
//! with overrides applied.
//!
//! ```
//! use steer_cards::{Module, Parameters, Sequence};
//!
//! let card = Parameters::new()
//!     .with("process", Module::new("lpair").with("mode", 1))
//!     .with("output", Sequence::from_modules([Module::new("dump")]));
//! assert_eq!(card.len(), 2);
//! assert!(card.dump().starts_with("Parameters(\n    process = Module('lpair',\n"));
//! ```

mod dump;
mod hash;
mod import;
mod module;
mod parameters;
mod sequence;
mod serialization;
mod value;

pub use dump::DumpConfig;
pub use hash::canonical_hash;
pub use import::MODULE_NAME_KEY;
pub use module::Module;
pub use parameters::Parameters;
pub use sequence::{Iter as SequenceIter, Sequence};
pub use serialization::{card_from_bytes, card_from_json, card_to_bytes, card_to_json, CardDocument};
pub use value::{FromValue, Limits, Scalar, Value};

pub use steer_core::{ErrorInfo, SteerError};
