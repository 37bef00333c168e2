//! Tester configuration, loadable from TOML.

use serde::Deserialize;

/// Top-level configuration for the tester binary.
#[derive(Debug, Clone, Deserialize)]
pub struct TesterConfig {
    /// SocketCAN interface name.
    #[serde(default = "default_interface")]
    pub can_interface: String,
    /// Per-frame receive timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Bound on queued transactions.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// RPM poll period in seconds.
    #[serde(default = "default_rpm_period_secs")]
    pub rpm_period_secs: u64,
    /// Speed poll period in seconds.
    #[serde(default = "default_speed_period_secs")]
    pub speed_period_secs: u64,
    /// VIN poll period in seconds.
    #[serde(default = "default_vin_period_secs")]
    pub vin_period_secs: u64,
}

fn default_interface() -> String {
    "can0".to_string()
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_queue_capacity() -> usize {
    5
}

fn default_rpm_period_secs() -> u64 {
    2
}

fn default_speed_period_secs() -> u64 {
    1
}

fn default_vin_period_secs() -> u64 {
    10
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            can_interface: default_interface(),
            timeout_ms: default_timeout_ms(),
            queue_capacity: default_queue_capacity(),
            rpm_period_secs: default_rpm_period_secs(),
            speed_period_secs: default_speed_period_secs(),
            vin_period_secs: default_vin_period_secs(),
        }
    }
}

impl TesterConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
