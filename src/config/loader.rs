//! Configuration loader
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "JOBPILOT_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "JOBPILOT_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "JOBPILOT";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `JOBPILOT_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`JOBPILOT_CONFIG_DIR`)
    /// - Specific configuration file (`JOBPILOT_CONFIG_FILE`)
    /// - Application environment (`JOBPILOT_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `JOBPILOT_CONFIG_DIR` and `JOBPILOT_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "JOBPILOT_CONFIG_DIR and JOBPILOT_CONFIG_FILE cannot both be set. \
                 Use JOBPILOT_CONFIG_DIR for layered configuration or \
                 JOBPILOT_CONFIG_FILE for a single configuration file.",
            ));
        }

        let environment = AppEnvironment::from_env();

        Ok(Self {
            config_dir,
            config_file,
            environment,
        })
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources
    ///
    /// If `JOBPILOT_CONFIG_FILE` is set, loads only that file.
    /// Otherwise, performs layered loading from the configuration directory.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            self.add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // Environment variables always win:
        // JOBPILOT_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        // 1. default.toml (required)
        let default_path = self.config_dir.join("default.toml");
        let builder = self.add_file_source(builder, &default_path, true)?;

        // 2. {environment}.toml (optional)
        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = self.add_file_source(builder, &env_path, false)?;

        // 3. local.toml (optional)
        let local_path = self.config_dir.join("local.toml");
        let builder = self.add_file_source(builder, &local_path, false)?;

        Ok(builder)
    }

    fn add_file_source(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests mutate process-wide env vars, so they run sequentially.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            fs::write(&path, content).expect("Failed to write config file");
        }
        temp_dir
    }

    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in &self.vars_to_restore {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    const BASE_CONFIG: &str = r#"
[application]
name = "test-app"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000
request_timeout = 30
keep_alive_timeout = 75

[database]
url = "postgres://localhost/test"
max_connections = 10
min_connections = 1
connection_timeout = 30

[logger]
level = "info"

[logger.console]
enabled = true
colored = true

[logger.file]
enabled = false
"#;

    #[test]
    fn loader_defaults() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        env.remove("JOBPILOT_CONFIG_DIR");
        env.remove("JOBPILOT_CONFIG_FILE");
        env.remove("JOBPILOT_APP_ENV");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment, AppEnvironment::Development);
    }

    #[test]
    fn loader_mutual_exclusivity_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        env.set("JOBPILOT_CONFIG_DIR", "/custom/config");
        env.set("JOBPILOT_CONFIG_FILE", "/path/to/config.toml");

        let result = ConfigLoader::new();
        assert!(matches!(
            result,
            Err(ConfigError::MutualExclusivityError(_))
        ));
    }

    #[test]
    fn load_missing_default_toml() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let temp_dir = setup_config_dir(&[]);

        env.set("JOBPILOT_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.remove("JOBPILOT_CONFIG_FILE");
        env.remove("JOBPILOT_APP_ENV");

        let loader = ConfigLoader::new().expect("Should create loader");
        let result = loader.load();

        assert!(result.is_err());
        if let Err(ConfigError::FileNotFound(msg)) = result {
            assert!(msg.contains("default.toml"));
        } else {
            panic!("Expected FileNotFound error");
        }
    }

    #[test]
    fn load_default_toml_only() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        env.set("JOBPILOT_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.remove("JOBPILOT_CONFIG_FILE");
        env.remove("JOBPILOT_APP_ENV");

        let loader = ConfigLoader::new().expect("Should create loader");
        let settings = loader.load().expect("Should load settings");

        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.url, "postgres://localhost/test");
        // Domain sections fall back to their defaults
        assert_eq!(settings.boards.max_failures_per_source, 3);
        assert_eq!(settings.ai.apply_threshold, 70);
    }

    #[test]
    fn load_with_environment_override() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let production_config = r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
url = "postgres://prod-server/production"
max_connections = 50

[boards]
request_timeout = 60
"#;

        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("production.toml", production_config),
        ]);

        env.set("JOBPILOT_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.remove("JOBPILOT_CONFIG_FILE");
        env.set("JOBPILOT_APP_ENV", "production");

        let loader = ConfigLoader::new().expect("Should create loader");
        let settings = loader.load().expect("Should load settings");

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.max_connections, 50);
        assert_eq!(settings.boards.request_timeout, 60);

        // Values not in production.toml come from default.toml
        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.server.request_timeout, 30);
    }

    #[test]
    fn load_with_env_var_override() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        env.set("JOBPILOT_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.remove("JOBPILOT_CONFIG_FILE");
        env.remove("JOBPILOT_APP_ENV");

        env.set("JOBPILOT_SERVER__PORT", "4000");
        env.set("JOBPILOT_DATABASE__URL", "postgres://env-override/db");
        env.set("JOBPILOT_BOARDS__SERPAPI_KEY", "test-key");

        let loader = ConfigLoader::new().expect("Should create loader");
        let settings = loader.load().expect("Should load settings");

        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.database.url, "postgres://env-override/db");
        assert_eq!(settings.boards.serpapi_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn load_full_precedence_chain() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let development_config = r#"
[server]
port = 3001

[database]
url = "postgres://dev/db"
"#;

        let local_config = r#"
[server]
port = 3002

[database]
url = "postgres://local/db"
"#;

        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("development.toml", development_config),
            ("local.toml", local_config),
        ]);

        env.set("JOBPILOT_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.remove("JOBPILOT_CONFIG_FILE");
        env.remove("JOBPILOT_APP_ENV"); // defaults to development

        env.set("JOBPILOT_SERVER__PORT", "3003");

        let loader = ConfigLoader::new().expect("Should create loader");
        let settings = loader.load().expect("Should load settings");

        // Environment variable has highest priority
        assert_eq!(settings.server.port, 3003);
        // local.toml overrides development.toml
        assert_eq!(settings.database.url, "postgres://local/db");
        // default.toml provides base values
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn load_single_file_mode() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let temp_dir = setup_config_dir(&[("single.toml", BASE_CONFIG)]);
        let config_file_path = temp_dir.path().join("single.toml");

        env.remove("JOBPILOT_CONFIG_DIR");
        env.set("JOBPILOT_CONFIG_FILE", config_file_path.to_str().unwrap());
        env.remove("JOBPILOT_APP_ENV");

        let loader = ConfigLoader::new().expect("Should create loader");
        let settings = loader.load().expect("Should load settings");

        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn optional_files_not_required() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        env.set("JOBPILOT_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.remove("JOBPILOT_CONFIG_FILE");
        env.set("JOBPILOT_APP_ENV", "staging"); // staging.toml doesn't exist

        let loader = ConfigLoader::new().expect("Should create loader");
        let settings = loader.load().expect("Should load settings");

        assert_eq!(settings.application.name, "test-app");
    }
}
