//! E2E tests for the failure modes: silent ECU, overflowing responses, and
//! a dead link. After every failure the rig must keep serving cleanly.

mod helpers;

use std::time::Duration;

use helpers::TestRig;
use rig_isotp::{loopback_pair, IsoTpConfig, IsoTpError};
use rig_obd::types::{OBD_REQUEST_ID, OBD_RESPONSE_ID};
use rig_tester::controller;
use rig_tester::transaction::{TesterError, TesterHandle};

#[tokio::test]
async fn unsupported_pid_times_out_without_a_response() {
    let rig = TestRig::start(Duration::from_millis(50));

    let err = rig.tester.request(0x01, 0x42, 256).await.unwrap_err();
    assert!(matches!(
        err,
        TesterError::IsoTp(IsoTpError::Timeout { timeout_ms: 50 })
    ));
}

#[tokio::test]
async fn rig_recovers_after_an_unsupported_request() {
    let rig = TestRig::start(Duration::from_millis(50));
    rig.state.set_readings(0x0ABC, 0);

    assert!(rig.tester.request(0x01, 0x42, 256).await.is_err());

    // The engines on both sides are back in idle.
    let payload = rig.tester.request(0x01, 0x0C, 256).await.unwrap();
    assert_eq!(payload, vec![0x41, 0x0C, 0x0A, 0xBC]);
}

#[tokio::test]
async fn overflowing_vin_fails_cleanly_and_recovers() {
    let rig = TestRig::start_default();
    rig.state.set_readings(0, 0x55);

    // 20-byte VIN response against an 8-byte caller buffer.
    let err = rig.tester.request(0x09, 0x02, 8).await.unwrap_err();
    assert!(matches!(
        err,
        TesterError::IsoTp(IsoTpError::BufferTooSmall {
            needed: 20,
            capacity: 8
        })
    ));

    // The simulator saw the overflow grant, abandoned its transfer, and
    // serves the next request normally.
    let payload = rig.tester.request(0x01, 0x0D, 256).await.unwrap();
    assert_eq!(payload, vec![0x41, 0x0D, 0x55]);
}

#[tokio::test]
async fn closed_link_surfaces_to_the_caller() {
    let (tester_link, vmcu_link) = loopback_pair(8);
    drop(vmcu_link);

    let (handle, queue) = TesterHandle::channel(1);
    tokio::spawn(controller::run(
        tester_link,
        IsoTpConfig::new(OBD_REQUEST_ID, OBD_RESPONSE_ID),
        queue,
    ));

    let err = handle.request(0x01, 0x0C, 256).await.unwrap_err();
    assert!(matches!(err, TesterError::IsoTp(IsoTpError::LinkClosed)));
}
