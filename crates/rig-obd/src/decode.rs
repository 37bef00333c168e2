//! Tester-side decoding of positive responses.

use crate::error::{ObdError, ObdResult};
use crate::types::{RESPONSE_SID_OFFSET, VIN_LEN};

/// Validate the SID/PID echo of a response to `(service, pid)` and return
/// the data bytes that follow.
pub fn parse_response(payload: &[u8], service: u8, pid: u8) -> ObdResult<&[u8]> {
    if payload.len() < 2 {
        return Err(ObdError::ResponseTooShort {
            len: payload.len(),
        });
    }
    let expected = service | RESPONSE_SID_OFFSET;
    if payload[0] != expected {
        return Err(ObdError::WrongSid {
            expected,
            actual: payload[0],
        });
    }
    if payload[1] != pid {
        return Err(ObdError::WrongPidEcho {
            expected: pid,
            actual: payload[1],
        });
    }
    Ok(&payload[2..])
}

/// Engine RPM from the two raw data bytes (quarter-rpm resolution per
/// SAE J1979).
pub fn decode_rpm(data: &[u8]) -> ObdResult<f64> {
    if data.len() < 2 {
        return Err(ObdError::ResponseTooShort { len: data.len() });
    }
    Ok((data[0] as f64 * 256.0 + data[1] as f64) / 4.0)
}

/// Vehicle speed in km/h.
pub fn decode_speed(data: &[u8]) -> ObdResult<u8> {
    data.first()
        .copied()
        .ok_or(ObdError::ResponseTooShort { len: 0 })
}

/// VIN string from mode-09 PID-02 data (`[record count, 17 ASCII bytes]`).
pub fn decode_vin(data: &[u8]) -> ObdResult<String> {
    if data.len() < 1 + VIN_LEN {
        return Err(ObdError::ResponseTooShort { len: data.len() });
    }
    let vin = &data[1..1 + VIN_LEN];
    if !vin.iter().all(|b| b.is_ascii_graphic()) {
        return Err(ObdError::VinNotAscii);
    }
    // ASCII checked above, so UTF-8 conversion cannot fail.
    Ok(String::from_utf8_lossy(vin).into_owned())
}
