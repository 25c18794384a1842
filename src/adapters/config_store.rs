//! Configuration sources implementing [`ConfigPort`].
//!
//! | Source           | Target      | Behaviour                                  |
//! |------------------|-------------|--------------------------------------------|
//! | `DefaultConfig`  | any         | Built-in defaults                          |
//! | `JsonFileConfig` | host only   | JSON file named by `ALARMCTL_CONFIG`       |
//!
//! Missing fields in the JSON file take their default values. Unknown
//! fields, including the fixed controller parameters, are rejected as
//! corrupted. Every source validates before returning.

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::AlarmConfig;

/// Environment variable naming the JSON config file on the host.
pub const CONFIG_PATH_ENV: &str = "ALARMCTL_CONFIG";

/// Always yields [`AlarmConfig::default()`].
#[derive(Debug, Default)]
pub struct DefaultConfig;

impl ConfigPort for DefaultConfig {
    fn load(&self) -> Result<AlarmConfig, ConfigError> {
        let config = AlarmConfig::default();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(not(target_os = "espidf"))]
pub use file::JsonFileConfig;

#[cfg(not(target_os = "espidf"))]
mod file {
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use log::{info, warn};

    use super::{CONFIG_PATH_ENV, ConfigError, ConfigPort};
    use crate::config::AlarmConfig;

    /// Reads an [`AlarmConfig`] from a JSON file.
    #[derive(Debug, Clone)]
    pub struct JsonFileConfig {
        path: PathBuf,
    }

    impl JsonFileConfig {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Use the file named by `ALARMCTL_CONFIG`, if the variable is set.
        pub fn from_env() -> Option<Self> {
            std::env::var_os(CONFIG_PATH_ENV).map(Self::new)
        }
    }

    impl ConfigPort for JsonFileConfig {
        fn load(&self) -> Result<AlarmConfig, ConfigError> {
            let text = std::fs::read_to_string(&self.path).map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ConfigError::NotFound
                } else {
                    warn!("config: cannot read {}: {}", self.path.display(), e);
                    ConfigError::IoError
                }
            })?;
            let config: AlarmConfig = serde_json::from_str(&text).map_err(|e| {
                warn!("config: {} is not valid JSON: {}", self.path.display(), e);
                ConfigError::Corrupted
            })?;
            config.validate()?;
            info!("config: loaded {}", self.path.display());
            Ok(config)
        }
    }
}
