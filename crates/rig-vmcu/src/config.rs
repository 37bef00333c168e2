//! Simulator configuration, loadable from TOML.

use serde::Deserialize;

use rig_obd::types::VIN_LEN;

/// Top-level configuration for the VMCU binary.
#[derive(Debug, Clone, Deserialize)]
pub struct VmcuConfig {
    /// SocketCAN interface name.
    #[serde(default = "default_interface")]
    pub can_interface: String,
    /// Data-source update period in milliseconds.
    #[serde(default = "default_update_period_ms")]
    pub update_period_ms: u64,
    /// VIN reported for mode 09 PID 02.
    #[serde(default = "default_vin")]
    pub vin: String,
}

fn default_interface() -> String {
    "can0".to_string()
}

fn default_update_period_ms() -> u64 {
    300
}

fn default_vin() -> String {
    String::from_utf8_lossy(rig_obd::DEFAULT_VIN).into_owned()
}

impl Default for VmcuConfig {
    fn default() -> Self {
        Self {
            can_interface: default_interface(),
            update_period_ms: default_update_period_ms(),
            vin: default_vin(),
        }
    }
}

impl VmcuConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// The configured VIN as fixed bytes, validated to 17 printable ASCII
    /// characters.
    pub fn vin_bytes(&self) -> anyhow::Result<[u8; VIN_LEN]> {
        let bytes = self.vin.as_bytes();
        anyhow::ensure!(
            bytes.len() == VIN_LEN && bytes.iter().all(|b| b.is_ascii_graphic()),
            "VIN must be {VIN_LEN} printable ASCII characters, got {:?}",
            self.vin
        );
        let mut vin = [0u8; VIN_LEN];
        vin.copy_from_slice(bytes);
        Ok(vin)
    }
}
