//! Configuration module for bve.
//!
//! Handles the settings file, environment variable expansion and the
//! location of the host store.

mod settings;

pub use settings::{
    expand_env_vars, LoggingSettings, Settings, SettingsError, SqlSettings, StoreSettings,
};
