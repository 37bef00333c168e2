use tracing_subscriber::EnvFilter;

use rig_tester::config::TesterConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TesterConfig::from_file(&path)?,
        None => TesterConfig::default(),
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interface = %config.can_interface,
        "rig-tester starting"
    );

    run(config).await
}

#[cfg(target_os = "linux")]
async fn run(config: TesterConfig) -> anyhow::Result<()> {
    use std::time::Duration;

    use rig_isotp::{IsoTpConfig, SocketCanLink};
    use rig_obd::types::{OBD_REQUEST_ID, OBD_RESPONSE_ID};
    use rig_tester::controller;
    use rig_tester::poller::{self, PollTarget};
    use rig_tester::transaction::TesterHandle;

    let link = SocketCanLink::open(&config.can_interface)?;
    let mut cfg = IsoTpConfig::new(OBD_REQUEST_ID, OBD_RESPONSE_ID);
    cfg.timeout = Duration::from_millis(config.timeout_ms);

    let (handle, queue) = TesterHandle::channel(config.queue_capacity);
    tokio::spawn(poller::run(
        handle.clone(),
        PollTarget::Rpm,
        Duration::from_secs(config.rpm_period_secs),
    ));
    tokio::spawn(poller::run(
        handle.clone(),
        PollTarget::Speed,
        Duration::from_secs(config.speed_period_secs),
    ));
    tokio::spawn(poller::run(
        handle.clone(),
        PollTarget::Vin,
        Duration::from_secs(config.vin_period_secs),
    ));
    drop(handle);

    controller::run(link, cfg, queue).await;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
async fn run(_config: TesterConfig) -> anyhow::Result<()> {
    anyhow::bail!("rig-tester drives a SocketCAN interface and only runs on Linux")
}
