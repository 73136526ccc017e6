#![deny(missing_docs)]
#![doc = "Shared error surface and schema descriptors for steering-card containers."]

pub mod errors;
pub mod schema;

pub use errors::{ErrorInfo, SteerError};
pub use schema::{SchemaVersion, CARD_SCHEMA};
