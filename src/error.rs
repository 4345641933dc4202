//! Error types.
//!
//! Rule outcomes are never errors: they are `tasks::MetaData` values.
//! `SyncError` covers only conditions that end the game session (the
//! channel is gone, a frame does not fit the buffer, a response never
//! arrived). `DecodeError` describes why a frame could not be read; a bad
//! *response* is converted to a null `TaskMeta` rather than propagated.

use std::time::Duration;

use thiserror::Error;

/// Why a frame could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty frame")]
    Empty,
    #[error("unknown step discriminator: {0}")]
    UnknownStep(u8),
    #[error("unknown query kind: {0}")]
    UnknownQuery(u8),
    #[error("response kind mismatch: expected {expected:?}, got {got:?}")]
    KindMismatch {
        expected: crate::sync::QueryKind,
        got: crate::sync::QueryKind,
    },
    #[error("malformed payload: {0}")]
    Payload(#[from] bincode::Error),
}

/// Fatal transport condition. The current game session ends.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("frame too large: {len} > {max}")]
    FrameTooLarge { len: usize, max: usize },
    #[error("peer disconnected")]
    Disconnected,
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("input stream closed")]
    InputClosed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("undecodable frame: {0}")]
    Decode(#[from] DecodeError),
    #[error("unencodable payload: {0}")]
    Encode(#[source] bincode::Error),
    #[error("{what} count {len} does not fit a frame")]
    CountOverflow { what: &'static str, len: usize },
    #[error("agent thread panicked")]
    AgentPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SyncError::FrameTooLarge { len: 10, max: 4 };
        assert_eq!(err.to_string(), "frame too large: 10 > 4");

        let err: SyncError = DecodeError::UnknownStep(200).into();
        assert_eq!(err.to_string(), "undecodable frame: unknown step discriminator: 200");
    }
}
