//! Engine configuration with TOML file support.

use crate::error::GovernanceError;
use crate::params::DaoParams;
use civitas_types::{Address, AppId};
use civitas_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one deployed DAO.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Id of the DAO application every call must target.
    pub app_id: AppId,

    /// Account holding proposal deposits and voting deposits.
    pub custody: Address,

    /// DAO parameters, persisted on initialization.
    pub params: DaoParams,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

impl GovernanceConfig {
    pub fn new(app_id: AppId, custody: Address, params: DaoParams) -> Self {
        Self {
            app_id,
            custody,
            params,
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GovernanceError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| GovernanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GovernanceError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.custody.is_zero() {
            return Err(GovernanceError::Config("custody address must be set".into()));
        }
        self.params.validate()
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format)
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> bool {
        civitas_utils::init_tracing_with(&self.log_level, self.log_format())
    }
}
