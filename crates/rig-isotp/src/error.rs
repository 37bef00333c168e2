//! ISO-TP error types.

use thiserror::Error;

/// Errors that can end an ISO-TP session.
#[derive(Debug, Error)]
pub enum IsoTpError {
    #[error("malformed PCI: {0}")]
    MalformedPci(String),

    #[error("sequence mismatch: expected {expected}, got {actual}")]
    SeqMismatch { expected: u8, actual: u8 },

    #[error("unexpected {0} frame outside an active transfer")]
    UnexpectedFrame(&'static str),

    #[error("payload of {needed} bytes exceeds buffer capacity {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    #[error("peer reported flow-control overflow")]
    Overflow,

    #[error("payload of {0} bytes exceeds the 4095-byte ISO-TP limit")]
    PayloadTooLarge(usize),

    #[error("timed out after {timeout_ms}ms waiting for a frame")]
    Timeout { timeout_ms: u64 },

    #[error("CAN link error: {0}")]
    Link(String),

    #[error("CAN link closed")]
    LinkClosed,
}

/// Convenience alias for ISO-TP results.
pub type IsoTpResult<T> = Result<T, IsoTpError>;
