//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tabnav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::LogLevel;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TabnavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub counter: CounterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<String>,
}

/// Options applied when a bottom bar tab is selected.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub launch_single_top: Option<bool>,
    pub restore_state: Option<bool>,
    pub save_state: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CounterConfig {
    pub initial_value: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "tabnav.log";
pub const DEFAULT_COUNTER_VALUE: u32 = 1;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabOptions {
    pub launch_single_top: bool,
    pub restore_state: bool,
    pub save_state: bool,
}

impl Default for TabOptions {
    fn default() -> Self {
        Self {
            launch_single_top: true,
            restore_state: true,
            save_state: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub tab_options: TabOptions,
    pub counter_initial_value: u32,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&TabnavConfig::default(), None, None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// What happened while loading, kept until the logger is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNotice {
    Loaded(PathBuf),
    Generated(PathBuf),
    NoHomeDir,
    GenerateFailed { path: PathBuf, reason: String },
}

impl ConfigNotice {
    pub fn log(&self) {
        match self {
            ConfigNotice::Loaded(path) => info!("Loaded config from {}", path.display()),
            ConfigNotice::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigNotice::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
            ConfigNotice::GenerateFailed { path, reason } => {
                warn!("Failed to write default config to {}: {}", path.display(), reason)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: TabnavConfig,
    pub notices: Vec<ConfigNotice>,
}

/// Returns the path to `~/.tabnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tabnav").join("config.toml"))
}

/// Load config from `~/.tabnav/config.toml`.
///
/// Nothing is logged here; the caller logs `notices` once logging is set up.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_at(&path),
        None => Ok(LoadedConfig {
            config: TabnavConfig::default(),
            notices: vec![ConfigNotice::NoHomeDir],
        }),
    }
}

/// If the file doesn't exist, generates a commented-out default and
/// returns `TabnavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_at(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        let notice = match generate_default_config(path) {
            Ok(()) => ConfigNotice::Generated(path.to_path_buf()),
            Err(e) => ConfigNotice::GenerateFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        };
        return Ok(LoadedConfig {
            config: TabnavConfig::default(),
            notices: vec![notice],
        });
    }

    Ok(LoadedConfig {
        config: load_config_from(path)?,
        notices: vec![ConfigNotice::Loaded(path.to_path_buf())],
    })
}

pub fn load_config_from(path: &Path) -> Result<TabnavConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# tabnav configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "error", "warn", "info", "debug", "trace"
# log_file = "tabnav.log"            # Or set TABNAV_LOG_FILE env var

# [navigation]
# launch_single_top = true           # Reselecting the current tab pushes nothing
# restore_state = true               # Reopening a tab brings back its back stack
# save_state = true                  # Leaving a tab keeps its back stack

# [counter]
# initial_value = 1                  # Value of the shared counter when created
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_log_level` and `cli_log_file` are from CLI flags (None = not specified).
pub fn resolve(
    config: &TabnavConfig,
    cli_log_level: Option<LogLevel>,
    cli_log_file: Option<&str>,
) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .or_else(|| {
            std::env::var("TABNAV_LOG_LEVEL")
                .ok()
                .and_then(|s| LogLevel::from_str(&s, true).ok())
        })
        .or(config.general.log_level)
        .unwrap_or_default();

    // Log file: CLI → env → config → default
    let log_file = cli_log_file
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TABNAV_LOG_FILE").ok())
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let defaults = TabOptions::default();
    let tab_options = TabOptions {
        launch_single_top: config
            .navigation
            .launch_single_top
            .unwrap_or(defaults.launch_single_top),
        restore_state: config
            .navigation
            .restore_state
            .unwrap_or(defaults.restore_state),
        save_state: config.navigation.save_state.unwrap_or(defaults.save_state),
    };

    ResolvedConfig {
        log_level: log_level.into(),
        log_file: PathBuf::from(log_file),
        tab_options,
        counter_initial_value: config
            .counter
            .initial_value
            .unwrap_or(DEFAULT_COUNTER_VALUE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TabnavConfig::default();
        assert!(config.general.log_level.is_none());
        assert!(config.navigation.restore_state.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = TabnavConfig::default();
        let resolved = resolve(&config, Some(LogLevel::Debug), Some("x.log"));
        assert_eq!(resolved.tab_options, TabOptions::default());
        assert_eq!(resolved.counter_initial_value, DEFAULT_COUNTER_VALUE);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TabnavConfig {
            navigation: NavigationConfig {
                launch_single_top: Some(false),
                restore_state: Some(false),
                save_state: None,
            },
            counter: CounterConfig {
                initial_value: Some(10),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, None);
        assert!(!resolved.tab_options.launch_single_top);
        assert!(!resolved.tab_options.restore_state);
        assert!(resolved.tab_options.save_state);
        assert_eq!(resolved.counter_initial_value, 10);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = TabnavConfig {
            general: GeneralConfig {
                log_level: Some(LogLevel::Error),
                log_file: Some("from-config.log".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(LogLevel::Trace), Some("cli.log"));
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert_eq!(resolved.log_file, PathBuf::from("cli.log"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "warn"
log_file = "/tmp/tabnav.log"

[navigation]
launch_single_top = true
restore_state = false

[counter]
initial_value = 3
"#;
        let config: TabnavConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, Some(LogLevel::Warn));
        assert_eq!(config.general.log_file.as_deref(), Some("/tmp/tabnav.log"));
        assert_eq!(config.navigation.restore_state, Some(false));
        assert_eq!(config.navigation.save_state, None);
        assert_eq!(config.counter.initial_value, Some(3));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[counter]
initial_value = 0
"#;
        let config: TabnavConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.counter.initial_value, Some(0));
        assert!(config.general.log_file.is_none());
        assert!(config.navigation.launch_single_top.is_none());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("tabnav-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[counter]\ninitial_value = \"lots\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let missing = load_config_from(&dir.join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_first_load_generates_then_loads() {
        let dir = std::env::temp_dir().join(format!("tabnav-generate-{}", std::process::id()));
        let path = dir.join(".tabnav").join("config.toml");

        let first = load_config_at(&path).unwrap();
        assert_eq!(first.notices, vec![ConfigNotice::Generated(path.clone())]);
        assert!(path.exists());

        let second = load_config_at(&path).unwrap();
        assert_eq!(second.notices, vec![ConfigNotice::Loaded(path.clone())]);
        assert!(second.config.counter.initial_value.is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unwritable_default_is_reported() {
        let dir = std::env::temp_dir().join(format!("tabnav-blocked-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let loaded = load_config_at(&path).unwrap();
        assert!(matches!(
            loaded.notices.as_slice(),
            [ConfigNotice::GenerateFailed { path: p, .. }] if *p == path
        ));
        assert!(loaded.config.general.log_level.is_none());
        fs::remove_dir_all(&dir).ok();
    }
}
