//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::{ResolvedConfig, TabOptions};
use crate::core::state::App;

/// Config with fixed values, independent of the environment.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        log_level: log::LevelFilter::Off,
        log_file: "tabnav-test.log".into(),
        tab_options: TabOptions::default(),
        counter_initial_value: 1,
    }
}

/// Creates a test App on the start destination.
pub fn test_app() -> App {
    App::from_config(&test_config()).expect("app graph is valid")
}
