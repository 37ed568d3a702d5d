use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sequential thinking server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinkingConfig {
    /// Raw `DISABLE_THOUGHT_LOGGING` value; only "true" (any case) disables rendering
    #[serde(default)]
    pub disable_thought_logging: Option<String>,
    /// Server configuration
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name reported during initialization
    pub name: String,
    /// Server version
    pub version: String,
}

impl Default for ThinkingConfig {
    fn default() -> Self {
        Self {
            disable_thought_logging: None,
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "sequential-thinking-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ThinkingConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load() -> Result<Self> {
        let mut config = Config::builder()
            .set_default("server.name", "sequential-thinking-server")?
            .set_default("server.version", env!("CARGO_PKG_VERSION"))?;

        if let Ok(config_file) = std::env::var("SEQUENTIAL_THINKING_CONFIG") {
            tracing::info!("Using SEQUENTIAL_THINKING_CONFIG: {}", config_file);
            config = config.add_source(File::with_name(&config_file).required(false));
        } else {
            config = config.add_source(File::with_name("sequential-thinking.toml").required(false));
        }

        // e.g. SEQUENTIAL_THINKING_SERVER__NAME overrides server.name
        config = config.add_source(
            Environment::with_prefix("SEQUENTIAL_THINKING")
                .prefix_separator("_")
                .separator("__"),
        );

        // The toggle is the only unprefixed variable read
        config = config.set_override_option(
            "disable_thought_logging",
            std::env::var("DISABLE_THOUGHT_LOGGING").ok(),
        )?;

        let config: Self = config.build()?.try_deserialize()?;
        if !config.thought_logging_enabled() {
            tracing::info!("Thought logging disabled by DISABLE_THOUGHT_LOGGING");
        }
        Ok(config)
    }

    /// Whether accepted thoughts are rendered to stderr
    pub fn thought_logging_enabled(&self) -> bool {
        !self
            .disable_thought_logging
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_toggle(value: Option<&str>) -> ThinkingConfig {
        ThinkingConfig {
            disable_thought_logging: value.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_logging_enabled_by_default() {
        assert!(ThinkingConfig::default().thought_logging_enabled());
    }

    #[test]
    fn test_true_in_any_case_disables_logging() {
        for value in ["true", "TRUE", "True", "tRuE"] {
            assert!(!with_toggle(Some(value)).thought_logging_enabled(), "{}", value);
        }
    }

    #[test]
    fn test_other_values_keep_logging() {
        for value in ["", "false", "1", "yes", " true"] {
            assert!(with_toggle(Some(value)).thought_logging_enabled(), "{:?}", value);
        }
    }

    #[test]
    fn test_load_reads_toggle_and_ignores_unrelated_env() {
        std::env::set_var("DISABLE_THOUGHT_LOGGING", "TRUE");
        std::env::set_var("SERVER", "x");
        let loaded = ThinkingConfig::load();
        std::env::remove_var("DISABLE_THOUGHT_LOGGING");
        std::env::remove_var("SERVER");

        let config = loaded.unwrap();
        assert!(!config.thought_logging_enabled());
        assert_eq!(config.server.name, "sequential-thinking-server");
    }

    #[test]
    fn test_default_server_identity() {
        let server = ServerConfig::default();
        assert_eq!(server.name, "sequential-thinking-server");
        assert_eq!(server.version, env!("CARGO_PKG_VERSION"));
    }
}
