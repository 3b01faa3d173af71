//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERDICT_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cascade::CascadeConfig;
use crate::policy::PolicyConfig;
use crate::reasoning::ReasoningConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERDICT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Path of the persisted signing key. Default: `./.data/oracle_key.pem`.
    pub key_path: PathBuf,

    /// Directory holding the sentence-encoder model files. Stub mode when
    /// unset.
    pub model_dir: Option<PathBuf>,

    /// Default acceptance threshold. Default: `0.8`.
    pub default_threshold: f32,

    /// Local-tier rejection cutoff. Default: `0.15`.
    pub low_cutoff: f32,

    /// Escalation window lower bound. Default: `0.05` (extended variant).
    pub policy_window_low: f32,

    /// Escalation window upper bound. Default: `0.8` (extended variant).
    pub policy_window_high: f32,

    /// Model name for the standard reasoning tier.
    pub standard_model: String,

    /// Model name for the premium reasoning tier.
    pub premium_model: String,

    /// Per-call remote reasoning timeout in seconds. Default: `10`.
    pub reasoning_timeout_secs: u64,

    /// If false, remote reasoning is never consulted.
    pub reasoning_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            key_path: PathBuf::from("./.data/oracle_key.pem"),
            model_dir: None,
            default_threshold: crate::cascade::DEFAULT_THRESHOLD,
            low_cutoff: crate::cascade::DEFAULT_LOW_CUTOFF,
            policy_window_low: PolicyConfig::extended().window_low,
            policy_window_high: PolicyConfig::extended().window_high,
            standard_model: crate::reasoning::ReasoningConfig::default().standard_model,
            premium_model: crate::reasoning::ReasoningConfig::default().premium_model,
            reasoning_timeout_secs: 10,
            reasoning_enabled: true,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "VERDICT_PORT";
    const ENV_BIND_ADDR: &'static str = "VERDICT_BIND_ADDR";
    const ENV_KEY_PATH: &'static str = "VERDICT_KEY_PATH";
    const ENV_MODEL_DIR: &'static str = "VERDICT_MODEL_DIR";
    const ENV_THRESHOLD: &'static str = "VERDICT_THRESHOLD";
    const ENV_LOW_CUTOFF: &'static str = "VERDICT_LOW_CUTOFF";
    const ENV_POLICY_WINDOW_LOW: &'static str = "VERDICT_POLICY_WINDOW_LOW";
    const ENV_POLICY_WINDOW_HIGH: &'static str = "VERDICT_POLICY_WINDOW_HIGH";
    const ENV_STANDARD_MODEL: &'static str = "VERDICT_STANDARD_MODEL";
    const ENV_PREMIUM_MODEL: &'static str = "VERDICT_PREMIUM_MODEL";
    const ENV_REASONING_TIMEOUT_SECS: &'static str = "VERDICT_REASONING_TIMEOUT_SECS";
    const ENV_REASONING_ENABLED: &'static str = "VERDICT_REASONING_ENABLED";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let key_path = Self::parse_path_from_env(Self::ENV_KEY_PATH, defaults.key_path);
        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let default_threshold =
            Self::parse_f32_from_env(Self::ENV_THRESHOLD, defaults.default_threshold);
        let low_cutoff = Self::parse_f32_from_env(Self::ENV_LOW_CUTOFF, defaults.low_cutoff);
        let policy_window_low =
            Self::parse_f32_from_env(Self::ENV_POLICY_WINDOW_LOW, defaults.policy_window_low);
        let policy_window_high =
            Self::parse_f32_from_env(Self::ENV_POLICY_WINDOW_HIGH, defaults.policy_window_high);
        let standard_model =
            Self::parse_string_from_env(Self::ENV_STANDARD_MODEL, defaults.standard_model);
        let premium_model =
            Self::parse_string_from_env(Self::ENV_PREMIUM_MODEL, defaults.premium_model);
        let reasoning_timeout_secs = Self::parse_u64_from_env(
            Self::ENV_REASONING_TIMEOUT_SECS,
            defaults.reasoning_timeout_secs,
        );
        let reasoning_enabled =
            Self::parse_bool_from_env(Self::ENV_REASONING_ENABLED, defaults.reasoning_enabled);

        Ok(Self {
            port,
            bind_addr,
            key_path,
            model_dir,
            default_threshold,
            low_cutoff,
            policy_window_low,
            policy_window_high,
            standard_model,
            premium_model,
            reasoning_timeout_secs,
            reasoning_enabled,
        })
    }

    /// Validates paths and numeric invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.default_threshold > 0.0 && self.default_threshold <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "default_threshold",
                reason: format!("{} is not in (0, 1]", self.default_threshold),
            });
        }

        if self.low_cutoff < 0.0 || self.low_cutoff >= self.default_threshold {
            return Err(ConfigError::InvalidParameter {
                name: "low_cutoff",
                reason: format!(
                    "{} must be in [0, default_threshold)",
                    self.low_cutoff
                ),
            });
        }

        if self.policy_window_low > self.policy_window_high {
            return Err(ConfigError::InvalidParameter {
                name: "policy_window",
                reason: format!(
                    "low {} exceeds high {}",
                    self.policy_window_low, self.policy_window_high
                ),
            });
        }

        if let Some(ref path) = self.model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Escalation policy window derived from this config.
    pub fn policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            window_low: self.policy_window_low,
            window_high: self.policy_window_high,
        }
    }

    /// Cascade thresholds derived from this config.
    pub fn cascade_config(&self) -> CascadeConfig {
        CascadeConfig {
            default_threshold: self.default_threshold,
            low_cutoff: self.low_cutoff,
        }
    }

    /// Remote reasoning settings derived from this config.
    pub fn reasoning_config(&self) -> ReasoningConfig {
        ReasoningConfig {
            standard_model: self.standard_model.clone(),
            premium_model: self.premium_model.clone(),
            timeout: Duration::from_secs(self.reasoning_timeout_secs),
            enabled: self.reasoning_enabled,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_f32_from_env(var_name: &str, default: f32) -> f32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }
}
