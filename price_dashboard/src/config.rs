use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared_utils::env::{EnvVarError, env_override};
use thiserror::Error;
use tracing::debug;

pub const ENV_BASE_URL: &str = "PRICE_DASHBOARD_BASE_URL";
pub const ENV_POLL_SECS: &str = "PRICE_DASHBOARD_POLL_SECS";
pub const ENV_TERMINAL_PATH: &str = "PRICE_DASHBOARD_TERMINAL_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Env(#[from] EnvVarError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime settings of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Root of the recorder backend, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub toast_secs: u64,
    pub log_capacity: usize,
    /// Preselected after timeframes load.
    pub default_timeframe: String,
    /// Initial content of the terminal path input.
    pub terminal_path: String,
    /// How long shutdown waits for a final stop-recording call.
    pub teardown_grace_ms: u64,
    /// Relative paths land in the OS temp dir.
    pub log_file: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_secs: 5,
            request_timeout_secs: 10,
            toast_secs: 5,
            log_capacity: 50,
            default_timeframe: "M1".to_string(),
            terminal_path: String::new(),
            teardown_grace_ms: 750,
            log_file: PathBuf::from("price_dashboard.log"),
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub poll_secs: Option<u64>,
    pub terminal_path: Option<String>,
}

impl DashboardConfig {
    /// Builds the effective configuration: defaults, then the TOML file at
    /// `path` (if any), then environment variables, then `overrides`.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!(path = %path.display(), "loaded config file");
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = env_override::<String>(ENV_BASE_URL)? {
            self.base_url = url;
        }
        if let Some(secs) = env_override::<u64>(ENV_POLL_SECS)? {
            self.poll_interval_secs = secs;
        }
        if let Some(path) = env_override::<String>(ENV_TERMINAL_PATH)? {
            self.terminal_path = path;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(secs) = overrides.poll_secs {
            self.poll_interval_secs = secs;
        }
        if let Some(path) = &overrides.terminal_path {
            self.terminal_path = path.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be greater than 0".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid(
                "log_capacity must be greater than 0".into(),
            ));
        }
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Invalid(format!("base_url {:?} is not a URL: {e}", self.base_url))
        })?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    pub fn teardown_grace(&self) -> Duration {
        Duration::from_millis(self.teardown_grace_ms)
    }

    pub fn log_file_path(&self) -> PathBuf {
        if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            std::env::temp_dir().join(&self.log_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        unsafe {
            std::env::remove_var(ENV_BASE_URL);
            std::env::remove_var(ENV_POLL_SECS);
            std::env::remove_var(ENV_TERMINAL_PATH);
        }
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            base_url = "http://10.0.0.2:5000"
            toast_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.base_url, "http://10.0.0.2:5000");
        assert_eq!(cfg.toast_lifetime(), Duration::from_secs(3));
        assert_eq!(cfg.poll_interval_secs, 5);
        assert_eq!(cfg.default_timeframe, "M1");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DashboardConfig::from_toml_str("pol_interval_secs = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_zero_and_bad_urls() {
        let mut cfg = DashboardConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        cfg.poll_interval_secs = 5;
        cfg.log_capacity = 0;
        assert!(cfg.validate().is_err());

        cfg.log_capacity = 50;
        cfg.base_url = "not a url".into();
        assert!(cfg.validate().is_err());

        cfg.base_url = "http://localhost:5000".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn relative_log_file_goes_to_temp_dir() {
        let cfg = DashboardConfig::default();
        assert_eq!(
            cfg.log_file_path(),
            std::env::temp_dir().join("price_dashboard.log")
        );
    }

    #[test]
    #[serial]
    fn layers_apply_in_order() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://file:5000\"\npoll_interval_secs = 7\nterminal_path = \"C:/file/terminal64.exe\""
        )
        .unwrap();

        unsafe {
            std::env::set_var(ENV_POLL_SECS, "9");
            std::env::set_var(ENV_TERMINAL_PATH, "C:/env/terminal64.exe");
        }
        let overrides = ConfigOverrides {
            terminal_path: Some("C:/cli/terminal64.exe".into()),
            ..Default::default()
        };
        let cfg = DashboardConfig::load(Some(file.path()), &overrides).unwrap();
        clear_env();

        assert_eq!(cfg.base_url, "http://file:5000");
        assert_eq!(cfg.poll_interval_secs, 9);
        assert_eq!(cfg.terminal_path, "C:/cli/terminal64.exe");
    }

    #[test]
    #[serial]
    fn bad_env_value_is_reported() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_POLL_SECS, "soon");
        }
        let err = DashboardConfig::load(None, &ConfigOverrides::default()).unwrap_err();
        clear_env();
        assert!(matches!(err, ConfigError::Env(EnvVarError::Invalid { .. })));
    }

    #[test]
    #[serial]
    fn missing_file_is_a_read_error() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::load(
            Some(&dir.path().join("absent.toml")),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
