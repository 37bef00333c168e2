//! Shared harness wiring a tester and a simulated VMCU over an in-memory
//! bus, exercising real code paths across all crate boundaries.

use std::sync::Arc;
use std::time::Duration;

use rig_isotp::{loopback_pair, IsoTpConfig, LoopbackLink};
use rig_obd::types::{OBD_REQUEST_ID, OBD_RESPONSE_ID};
use rig_obd::VehicleState;
use rig_tester::controller;
use rig_tester::transaction::TesterHandle;
use rig_vmcu::responder;

/// A tester and a VMCU talking over a loopback link pair.
///
/// The controller and responder tasks run in the background with the real
/// production loops; dropping the harness drops the tester handle, which
/// winds the controller down and closes the link under the responder.
pub struct TestRig {
    /// Handle the pollers would use; tests drive it directly.
    pub tester: TesterHandle,
    /// Simulator state, settable for deterministic assertions.
    pub state: Arc<VehicleState>,
}

impl TestRig {
    /// Spin up both sides with the given per-frame receive timeout.
    pub fn start(timeout: Duration) -> Self {
        let (tester_link, vmcu_link) = loopback_pair(64);
        let state = Arc::new(VehicleState::default());

        let mut tester_cfg = IsoTpConfig::new(OBD_REQUEST_ID, OBD_RESPONSE_ID);
        tester_cfg.timeout = timeout;
        let mut vmcu_cfg = IsoTpConfig::new(OBD_RESPONSE_ID, OBD_REQUEST_ID);
        vmcu_cfg.timeout = timeout;

        let (tester, queue) = TesterHandle::channel(5);
        tokio::spawn(controller::run(tester_link, tester_cfg, queue));
        tokio::spawn(responder::run(vmcu_link, vmcu_cfg, Arc::clone(&state)));

        Self { tester, state }
    }

    /// Harness with the 200 ms timeout most scenarios want.
    pub fn start_default() -> Self {
        Self::start(Duration::from_millis(200))
    }
}

/// A tester rig whose ECU side is the bare link, so tests can script
/// misbehaving traffic by hand: malformed PCI bytes, skipped sequence
/// numbers, or whatever else a broken peer might put on the bus.
pub fn start_with_scripted_ecu(timeout: Duration) -> (TesterHandle, LoopbackLink) {
    let (tester_link, ecu_link) = loopback_pair(64);

    let mut tester_cfg = IsoTpConfig::new(OBD_REQUEST_ID, OBD_RESPONSE_ID);
    tester_cfg.timeout = timeout;

    let (tester, queue) = TesterHandle::channel(5);
    tokio::spawn(controller::run(tester_link, tester_cfg, queue));

    (tester, ecu_link)
}
