//! Free-running data source feeding the simulator's RPM and speed.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::trace;

use rig_obd::VehicleState;

/// Overwrite rpm/speed with fresh random values every `period`.
///
/// Runs forever; intended to be spawned as a background task. One random
/// word per tick: the low byte becomes the speed, the next sixteen bits the
/// RPM.
pub async fn run(state: Arc<VehicleState>, period: Duration) {
    let mut ticker = time::interval(period);
    // Skip the first tick (fires immediately).
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let raw = rand::random::<u32>();
        let speed = raw as u8;
        let rpm = (raw >> 8) as u16;
        state.set_readings(rpm, speed);
        trace!(rpm, speed, "vehicle state updated");
    }
}
