//! Configuration loading from TOML files with environment overrides.
//!
//! The config file is optional: when it is missing the embedded defaults are
//! used, so the bot runs out of the box. `BOT_TOKEN` and `ADMIN_ID` always
//! win over both the file and the defaults, which keeps the token out of the
//! file entirely.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Default bot token, overridable via `BOT_TOKEN`.
const DEFAULT_BOT_TOKEN: &str = "8225685692:AAHasKIzHr0f5yL62tCaFz6FrxWUugGKUpw";

/// Default admin identity, overridable via `ADMIN_ID`.
const DEFAULT_ADMIN_ID: u64 = 6676376793;

const DEFAULT_PRIMARY_URL: &str = "https://ax-ob52-fast-api-2.onrender.com/join";
const DEFAULT_SECONDARY_URL: &str = "https://ax-ob52-fast-api.onrender.com/join";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Never read from the config file; env or default only.
    #[serde(skip)]
    pub bot_token: String,
    /// Numeric identity allowed to run /stats and /broadcast.
    pub admin_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub primary_url: String,
    pub secondary_url: String,
    /// Timeout for the emote send path, in seconds.
    pub send_timeout_secs: u64,
    /// Timeout for the status probe, in seconds.
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from a TOML file, falling back to the embedded
    /// defaults when the file does not exist, then apply env overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be read or
    /// parsed, if an env override is malformed, or if validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Config::default()
        };

        config.telegram.bot_token = DEFAULT_BOT_TOKEN.into();
        config.apply_env()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Ok(raw) = std::env::var("ADMIN_ID") {
            self.telegram.admin_id = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "ADMIN_ID",
                reason: format!("`{raw}` is not a numeric identity"),
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::MissingField { field: "bot_token" });
        }
        for (field, value) in [
            ("api.primary_url", &self.api.primary_url),
            ("api.secondary_url", &self.api.secondary_url),
        ] {
            url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
        }
        if self.api.send_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.send_timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.api.probe_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.probe_timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber, honoring `RUST_LOG` when set.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: DEFAULT_BOT_TOKEN.into(),
            admin_id: DEFAULT_ADMIN_ID,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.into(),
            secondary_url: DEFAULT_SECONDARY_URL.into(),
            send_timeout_secs: 60,
            probe_timeout_secs: 15,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        std::env::remove_var("BOT_TOKEN");
        std::env::remove_var("ADMIN_ID");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::load("/nonexistent/emoterelay.toml").unwrap();
        assert_eq!(config.telegram.admin_id, DEFAULT_ADMIN_ID);
        assert_eq!(config.api.primary_url, DEFAULT_PRIMARY_URL);
        assert_eq!(config.api.send_timeout_secs, 60);
        assert_eq!(config.api.probe_timeout_secs, 15);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [telegram]
            admin_id = 42

            [api]
            primary_url = "https://primary.example.com/join"
            secondary_url = "https://secondary.example.com/join"
            send_timeout_secs = 30
            probe_timeout_secs = 5

            [logging]
            level = "debug"
            format = "json"
            "#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.telegram.admin_id, 42);
        assert_eq!(config.api.primary_url, "https://primary.example.com/join");
        assert_eq!(config.api.send_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
        // Token still comes from the default, never the file.
        assert_eq!(config.telegram.bot_token, DEFAULT_BOT_TOKEN);
    }

    #[test]
    fn env_overrides_win() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("BOT_TOKEN", "test-token");
        std::env::set_var("ADMIN_ID", "777");

        let config = Config::load("/nonexistent/emoterelay.toml").unwrap();
        assert_eq!(config.telegram.bot_token, "test-token");
        assert_eq!(config.telegram.admin_id, 777);

        clear_env();
    }

    #[test]
    fn non_numeric_admin_id_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ADMIN_ID", "not-a-number");

        let result = Config::load("/nonexistent/emoterelay.toml");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "ADMIN_ID",
                ..
            })
        ));

        clear_env();
    }

    #[test]
    fn invalid_endpoint_url_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [telegram]
            admin_id = 1

            [api]
            primary_url = "not a url"
            secondary_url = "https://secondary.example.com/join"
            send_timeout_secs = 60
            probe_timeout_secs = 15

            [logging]
            level = "info"
            format = "pretty"
            "#
        )
        .unwrap();

        let result = Config::load(file.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "api.primary_url",
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [telegram]
            admin_id = 1

            [api]
            primary_url = "https://primary.example.com/join"
            secondary_url = "https://secondary.example.com/join"
            send_timeout_secs = 0
            probe_timeout_secs = 15

            [logging]
            level = "info"
            format = "pretty"
            "#
        )
        .unwrap();

        let result = Config::load(file.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "api.send_timeout_secs",
                ..
            })
        ));
    }
}
