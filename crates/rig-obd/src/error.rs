//! OBD-II error types.

use thiserror::Error;

/// Errors from OBD-II request/response handling.
#[derive(Debug, Error)]
pub enum ObdError {
    #[error("request payload of {len} bytes is too short")]
    MalformedRequest { len: usize },

    #[error("response payload of {len} bytes is too short")]
    ResponseTooShort { len: usize },

    #[error("expected SID 0x{expected:02X}, got 0x{actual:02X}")]
    WrongSid { expected: u8, actual: u8 },

    #[error("expected PID echo 0x{expected:02X}, got 0x{actual:02X}")]
    WrongPidEcho { expected: u8, actual: u8 },

    #[error("VIN is not printable ASCII")]
    VinNotAscii,
}

/// Convenience alias for OBD-II results.
pub type ObdResult<T> = Result<T, ObdError>;
