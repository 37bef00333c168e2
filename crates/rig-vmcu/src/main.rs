use tracing_subscriber::EnvFilter;

use rig_vmcu::config::VmcuConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => VmcuConfig::from_file(&path)?,
        None => VmcuConfig::default(),
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interface = %config.can_interface,
        "rig-vmcu starting"
    );

    run(config).await
}

#[cfg(target_os = "linux")]
async fn run(config: VmcuConfig) -> anyhow::Result<()> {
    use std::sync::Arc;
    use std::time::Duration;

    use rig_isotp::{IsoTpConfig, SocketCanLink};
    use rig_obd::types::{OBD_REQUEST_ID, OBD_RESPONSE_ID};
    use rig_obd::VehicleState;
    use rig_vmcu::{datasource, responder};

    let link = SocketCanLink::open(&config.can_interface)?;
    let cfg = IsoTpConfig::new(OBD_RESPONSE_ID, OBD_REQUEST_ID);
    let state = Arc::new(VehicleState::new(config.vin_bytes()?));

    tokio::spawn(datasource::run(
        Arc::clone(&state),
        Duration::from_millis(config.update_period_ms),
    ));

    responder::run(link, cfg, state).await;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
async fn run(_config: VmcuConfig) -> anyhow::Result<()> {
    anyhow::bail!("rig-vmcu drives a SocketCAN interface and only runs on Linux")
}
