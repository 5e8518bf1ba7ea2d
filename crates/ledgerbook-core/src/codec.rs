//! Record codec.
//!
//! Values in the world state are CBOR maps keyed by the records' lower-case
//! field names. Payloads returned across the invocation boundary are JSON with
//! the same field names.

use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::record::Record;

/// Encode a record for storage.
///
/// # Errors
///
/// Returns `LedgerError::Serialization` if the value cannot be encoded.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf)
        .map_err(|e| LedgerError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Decode a record read from `key`.
///
/// # Errors
///
/// Returns `LedgerError::MalformedRecord` if the bytes are not a valid `R`.
pub fn decode<R: Record>(key: &str, data: &[u8]) -> Result<R> {
    ciborium::from_reader(data).map_err(|e| LedgerError::MalformedRecord {
        entity: R::NAMESPACE.entity(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a value as an invocation payload.
///
/// # Errors
///
/// Returns `LedgerError::Serialization` if the value cannot be encoded.
pub fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| LedgerError::Serialization(e.to_string()))
}
