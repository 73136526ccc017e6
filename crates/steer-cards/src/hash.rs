use sha2::{Digest, Sha256};
use steer_core::errors::{ErrorInfo, SteerError};

use crate::parameters::Parameters;

/// Computes the canonical digest of a parameter set.
///
/// The digest covers the JSON encoding of the set, so it is sensitive to key
/// order exactly like equality and dumps are.
pub fn canonical_hash(params: &Parameters) -> Result<String, SteerError> {
    let bytes = serde_json::to_vec(params)
        .map_err(|err| SteerError::Serde(ErrorInfo::new("hash-encode", err.to_string())))?;
    Ok(hex::encode(Sha256::digest(bytes)))
}
