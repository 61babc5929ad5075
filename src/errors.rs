//! Telemetry Engine Error Hierarchy
//!
//! Defines error types for the telemetry core, categorized by subsystem and
//! operational concerns. The only fatal startup condition is a catalog that
//! cannot be constructed; everything else degrades gracefully.

use ::config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Entity catalog construction failures; aborts initialization since
    /// nothing downstream is meaningful without the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Value production failures inside a tick
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Filesystem failures (log file handling)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shutdown channel closed before the signal could be delivered
    #[error("Signal sender closed: {0}")]
    SignalSenderClosed(String),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog defines no sensors")]
    EmptySensorSet,

    #[error("Catalog defines no channels")]
    EmptyChannelSet,

    #[error("Duplicate sensor key: {0}")]
    DuplicateSensor(String),

    #[error("Duplicate channel key: {0}")]
    DuplicateChannel(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The upstream feed has no reading for this sensor yet
    #[error("No reading available for {sensor_key}/{channel_key}")]
    Unavailable {
        sensor_key: String,
        channel_key: String,
    },

    /// The feed produced a value that is not a finite number
    #[error("Non-finite reading for {sensor_key}: {raw}")]
    NonFinite { sensor_key: String, raw: f64 },
}
