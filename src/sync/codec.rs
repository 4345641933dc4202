//! Payload serialization shared by frames and responses.
//!
//! bincode with fixed-width little-endian integers. Trailing bytes are
//! rejected, so a payload decodes only if its length matches the layout
//! of the requested type exactly.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DecodeError, SyncError};

fn wire() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Append the encoding of `value` to `out`.
pub(crate) fn serialize_into<T: Serialize>(out: &mut Vec<u8>, value: &T) -> Result<(), SyncError> {
    wire().serialize_into(out, value).map_err(SyncError::Encode)
}

/// Decode a complete payload.
pub(crate) fn deserialize<T: DeserializeOwned>(payload: &[u8]) -> Result<T, DecodeError> {
    Ok(wire().deserialize(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_layout() {
        let mut out = Vec::new();
        serialize_into(&mut out, &(1u8, 2u32)).unwrap();
        assert_eq!(out, vec![1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let result: Result<u8, _> = deserialize(&[1, 2]);
        assert!(matches!(result, Err(DecodeError::Payload(_))));
    }

    #[test]
    fn test_rejects_short_payload() {
        let result: Result<u32, _> = deserialize(&[1, 2]);
        assert!(result.is_err());
    }
}
