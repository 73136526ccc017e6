use serde::{Deserialize, Serialize};
use steer_core::errors::{ErrorInfo, SteerError};
use steer_core::schema::{SchemaVersion, CARD_SCHEMA};

use crate::hash::canonical_hash;
use crate::parameters::Parameters;

/// Envelope written around a top-level steering card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDocument {
    /// Schema version of the payload.
    pub schema_version: SchemaVersion,
    /// Canonical digest of `root`, checked on decode.
    pub fingerprint: String,
    /// The card itself.
    pub root: Parameters,
}

impl CardDocument {
    /// Wraps `root` with the current schema version and its digest.
    pub fn new(root: Parameters) -> Result<Self, SteerError> {
        let fingerprint = canonical_hash(&root)?;
        Ok(Self {
            schema_version: CARD_SCHEMA,
            fingerprint,
            root,
        })
    }

    /// Checks the schema version and the recorded digest.
    pub fn verify(&self) -> Result<(), SteerError> {
        if !CARD_SCHEMA.is_compatible_with(&self.schema_version) {
            return Err(SteerError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported card schema version")
                    .with_context("expected_major", CARD_SCHEMA.major.to_string())
                    .with_context("found_major", self.schema_version.major.to_string())
                    .with_hint(format!(
                        "re-export the card with schema {}.x",
                        CARD_SCHEMA.major
                    )),
            ));
        }
        let actual = canonical_hash(&self.root)?;
        if actual != self.fingerprint {
            return Err(SteerError::Serde(
                ErrorInfo::new("fingerprint-mismatch", "card digest does not match its content")
                    .with_context("recorded", self.fingerprint.clone())
                    .with_context("computed", actual),
            ));
        }
        Ok(())
    }

    fn into_verified_root(self) -> Result<Parameters, SteerError> {
        self.verify()?;
        Ok(self.root)
    }
}

/// Serializes a card to pretty-printed JSON.
pub fn card_to_json(root: &Parameters) -> Result<String, SteerError> {
    let document = CardDocument::new(root.clone())?;
    serde_json::to_string_pretty(&document)
        .map_err(|err| SteerError::serde("serialize-json", err.to_string()))
}

/// Restores a card from JSON, verifying schema and digest.
pub fn card_from_json(json: &str) -> Result<Parameters, SteerError> {
    let document: CardDocument = serde_json::from_str(json)
        .map_err(|err| SteerError::serde("deserialize-json", err.to_string()))?;
    document.into_verified_root()
}

/// Serializes a card to a compact binary representation using `bincode`.
pub fn card_to_bytes(root: &Parameters) -> Result<Vec<u8>, SteerError> {
    let document = CardDocument::new(root.clone())?;
    bincode::serialize(&document)
        .map_err(|err| SteerError::serde("serialize-bytes", err.to_string()))
}

/// Restores a card from its binary representation.
pub fn card_from_bytes(bytes: &[u8]) -> Result<Parameters, SteerError> {
    let document: CardDocument = bincode::deserialize(bytes)
        .map_err(|err| SteerError::serde("deserialize-bytes", err.to_string()))?;
    document.into_verified_root()
}
