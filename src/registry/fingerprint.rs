//! Content fingerprints of type descriptors.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA256 of a value's JSON serialization, as 64 lowercase hex characters.
///
/// # Errors
/// Returns an error if the value cannot be serialized to JSON.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
