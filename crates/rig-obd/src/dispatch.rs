//! Request parsing and the simulator-side dispatcher.

use tracing::warn;

use crate::error::{ObdError, ObdResult};
use crate::state::VehicleState;
use crate::types::{
    MODE_CURRENT_DATA, MODE_VEHICLE_INFO, PID_ENGINE_RPM, PID_VEHICLE_SPEED, PID_VIN,
    RESPONSE_SID_OFFSET,
};

/// The payload of a request frame: service byte then PID byte.
pub fn request_payload(service: u8, pid: u8) -> [u8; 2] {
    [service, pid]
}

/// Split a received request payload into `(service, pid)`.
pub fn parse_request(payload: &[u8]) -> ObdResult<(u8, u8)> {
    if payload.len() < 2 {
        return Err(ObdError::MalformedRequest {
            len: payload.len(),
        });
    }
    Ok((payload[0], payload[1]))
}

/// Map a request onto its response payload, copying live values out of
/// `state`.
///
/// The positive-response SID is the request service OR-ed with 0x40. An
/// unsupported service/PID combination returns `None`: the simulator stays
/// silent on the bus, it does not answer negatively.
pub fn response_for(state: &VehicleState, service: u8, pid: u8) -> Option<Vec<u8>> {
    match (service, pid) {
        (MODE_CURRENT_DATA, PID_ENGINE_RPM) => {
            let rpm = state.rpm();
            Some(vec![
                MODE_CURRENT_DATA | RESPONSE_SID_OFFSET,
                PID_ENGINE_RPM,
                (rpm >> 8) as u8,
                rpm as u8,
            ])
        }
        (MODE_CURRENT_DATA, PID_VEHICLE_SPEED) => Some(vec![
            MODE_CURRENT_DATA | RESPONSE_SID_OFFSET,
            PID_VEHICLE_SPEED,
            state.speed(),
        ]),
        (MODE_VEHICLE_INFO, PID_VIN) => {
            // ISO 15765-4: SID, PID, record count 0x01, then 17 VIN bytes.
            let mut payload = vec![MODE_VEHICLE_INFO | RESPONSE_SID_OFFSET, PID_VIN, 0x01];
            payload.extend_from_slice(state.vin());
            Some(payload)
        }
        _ => {
            warn!("unsupported service 0x{service:02X} / PID 0x{pid:02X}, sending no response");
            None
        }
    }
}
