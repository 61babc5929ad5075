//! Configuration management module for the telemetry engine.
//!
//! Provides hierarchical configuration loading from multiple sources with priority:
//! 1. Default values (hardcoded machine layout: 24 stator sensors, one
//!    temperature channel)
//! 2. Optional TOML config file
//! 3. Environment variables (highest priority)
//!
//! Sensor and channel keys are configuration data, never hard-coded
//! constants, so the same engine can drive a different machine layout.

mod catalog;
mod notification;
mod scheduler;
mod store;
pub use catalog::*;
pub use notification::*;
pub use scheduler::*;
pub use store::*;

#[cfg(test)]
mod config_test;

//---
use std::path::PathBuf;

use ::config::Config;
use ::config::Environment;
use ::config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::ENV_PREFIX;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TelemetryConfig {
    /// Sensor and channel definitions
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Sample window retention parameters
    #[serde(default)]
    pub store: StoreConfig,

    /// Tick cadence and synthetic generator parameters
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Signal rate-limit parameters
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Optional directory for log output; stdout when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl TelemetryConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Hardcoded defaults
    /// 2. Optional config file
    /// 3. Environment variables
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a TOML configuration file
    ///
    /// # Returns
    /// Merged and validated configuration
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates all subsystem configurations
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate()?;
        self.store.validate()?;
        self.scheduler.validate()?;
        self.notification.validate()?;

        Ok(())
    }
}
