//! The responder loop: one request, one response, forever.

use std::sync::Arc;

use tracing::{debug, info, warn};

use rig_isotp::{session, CanLink, IsoTpConfig, IsoTpError};
use rig_obd::{dispatch, VehicleState};

/// Serve OBD requests until the link closes.
///
/// Each iteration reassembles one request, dispatches it against the live
/// vehicle state, and transmits the response, segmented under the tester's
/// flow control when it exceeds a Single Frame. Stray or malformed traffic
/// is logged and the loop keeps listening; only a closed link stops it.
pub async fn run<L: CanLink>(link: L, cfg: IsoTpConfig, state: Arc<VehicleState>) {
    info!("responder ready, waiting for requests");
    loop {
        let request = match session::recv(&link, &cfg).await {
            Ok(payload) => payload,
            // Quiet bus; keep listening.
            Err(IsoTpError::Timeout { .. }) => continue,
            Err(IsoTpError::LinkClosed) => {
                info!("link closed, responder stopping");
                return;
            }
            Err(e) => {
                warn!(error = %e, "discarding unusable request");
                continue;
            }
        };

        let (service, pid) = match dispatch::parse_request(&request) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "discarding unusable request");
                continue;
            }
        };
        debug!("request received: service 0x{service:02X}, PID 0x{pid:02X}");

        let Some(response) = dispatch::response_for(&state, service, pid) else {
            // Unsupported; the dispatcher already logged it. Stay silent.
            continue;
        };

        match session::send(&link, &cfg, &response).await {
            Ok(()) => debug!(len = response.len(), "response sent"),
            Err(IsoTpError::LinkClosed) => {
                info!("link closed, responder stopping");
                return;
            }
            Err(e) => warn!(error = %e, "response transmission failed"),
        }
    }
}
