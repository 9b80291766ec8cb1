//! Device configuration (parsed from the settings TOML by the host).

use serde::{Deserialize, Serialize};

/// Top-level device configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub kef: KefConfig,
    pub transfer: TransferConfig,
}

/// Envelope encryption defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KefConfig {
    /// Envelope version for new encryptions (default: 20, AES-256-GCM)
    pub default_version: u8,
    /// PBKDF2 effective iteration count (default: 100000)
    pub pbkdf2_iterations: u32,
}

impl Default for KefConfig {
    fn default() -> Self {
        Self {
            default_version: 20,
            pbkdf2_iterations: 100_000,
        }
    }
}

/// QR transfer tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Maximum characters per QR frame, header included (default: 400)
    pub max_chars_per_qr: usize,
    /// Animated-QR frame interval in milliseconds (default: 250)
    pub frame_interval_ms: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_chars_per_qr: 400,
            frame_interval_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[kef]
default_version = 21
pbkdf2_iterations = 500000

[transfer]
max_chars_per_qr = 250
frame_interval_ms = 150
"#;
        let config: DeviceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.kef.default_version, 21);
        assert_eq!(config.kef.pbkdf2_iterations, 500_000);
        assert_eq!(config.transfer.max_chars_per_qr, 250);
        assert_eq!(config.transfer.frame_interval_ms, 150);
    }

    #[test]
    fn test_parse_defaults() {
        let config: DeviceConfig = toml::from_str("").unwrap();
        assert_eq!(config.kef.default_version, 20);
        assert_eq!(config.kef.pbkdf2_iterations, 100_000);
        assert_eq!(config.transfer.max_chars_per_qr, 400);
        assert_eq!(config.transfer.frame_interval_ms, 250);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
[kef]
pbkdf2_iterations = 200000
"#;
        let config: DeviceConfig = toml::from_str(toml_str).unwrap();
        // Overridden
        assert_eq!(config.kef.pbkdf2_iterations, 200_000);
        // Defaults
        assert_eq!(config.kef.default_version, 20);
        assert_eq!(config.transfer.max_chars_per_qr, 400);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = DeviceConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: DeviceConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.kef.default_version, parsed.kef.default_version);
        assert_eq!(
            config.transfer.max_chars_per_qr,
            parsed.transfer.max_chars_per_qr
        );
    }
}
