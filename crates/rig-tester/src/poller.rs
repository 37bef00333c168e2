//! Periodic OBD pollers, one task per quantity.
//!
//! Each poller runs forever on its own interval, issues a transaction
//! through the shared handle, and logs the decoded answer.

use std::time::Duration;

use tokio::time;
use tracing::{info, warn};

use rig_obd::decode;
use rig_obd::types::{
    MODE_CURRENT_DATA, MODE_VEHICLE_INFO, PID_ENGINE_RPM, PID_VEHICLE_SPEED, PID_VIN,
};

use crate::transaction::TesterHandle;

/// Response buffer capacity handed to the engine for every poll.
pub const RESPONSE_BUF_LEN: usize = 256;

/// What a poller asks for and how it reports the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTarget {
    Rpm,
    Speed,
    Vin,
}

impl PollTarget {
    pub fn service_pid(self) -> (u8, u8) {
        match self {
            PollTarget::Rpm => (MODE_CURRENT_DATA, PID_ENGINE_RPM),
            PollTarget::Speed => (MODE_CURRENT_DATA, PID_VEHICLE_SPEED),
            PollTarget::Vin => (MODE_VEHICLE_INFO, PID_VIN),
        }
    }

    fn log_payload(self, payload: &[u8]) {
        let (service, pid) = self.service_pid();
        let data = match decode::parse_response(payload, service, pid) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "discarding malformed response");
                return;
            }
        };
        match self {
            PollTarget::Rpm => match decode::decode_rpm(data) {
                Ok(rpm) => info!(rpm, "engine rpm"),
                Err(e) => warn!(error = %e, "bad rpm data"),
            },
            PollTarget::Speed => match decode::decode_speed(data) {
                Ok(speed) => info!(speed, "vehicle speed km/h"),
                Err(e) => warn!(error = %e, "bad speed data"),
            },
            PollTarget::Vin => match decode::decode_vin(data) {
                Ok(vin) => info!(%vin, "vehicle identification number"),
                Err(e) => warn!(error = %e, "bad vin data"),
            },
        }
    }
}

/// Poll `target` forever at `period`. Intended to be spawned as a
/// background task.
pub async fn run(handle: TesterHandle, target: PollTarget, period: Duration) {
    let mut ticker = time::interval(period);
    // Skip the first tick (fires immediately).
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let (service, pid) = target.service_pid();
        match handle.request(service, pid, RESPONSE_BUF_LEN).await {
            Ok(payload) => target.log_payload(&payload),
            Err(e) => warn!(poll = ?target, error = %e, "poll failed"),
        }
    }
}
