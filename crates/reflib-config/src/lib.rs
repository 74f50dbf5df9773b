//! Configuration for the reflib dashboard.
//!
//! Layered loading: built-in defaults, then the TOML file at the platform
//! config path, then `REFLIB_` environment variables. Nested keys use a
//! double underscore, e.g. `REFLIB_DEFAULTS__VIEW_MODE=list`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use reflib_core::ViewMode;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Tags offered in the sidebar when the config file does not say otherwise.
pub const DEFAULT_SIDEBAR_TAGS: &[&str] = &[
    "minimalism",
    "bright colors",
    "portrait",
    "nature",
    "architecture",
    "street-style",
    "vintage",
    "neon",
    "black-and-white",
    "gradient",
];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// JSON file replacing the built-in references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,

    /// Tags offered for filtering. Empty derives them from the library.
    #[serde(default = "default_sidebar_tags")]
    pub sidebar_tags: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_file: None,
            sidebar_tags: default_sidebar_tags(),
            defaults: Defaults::default(),
        }
    }
}

impl Config {
    /// Reject values serde accepts but the application cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.defaults.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.log_level".into(),
                reason: format!(
                    "expected one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.defaults.log_level
                ),
            });
        }
        if let Some(blank) = self.sidebar_tags.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation {
                field: "sidebar_tags".into(),
                reason: format!("entry {blank} is blank"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Listing layout on startup.
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Log level when `-v` is not given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
fn default_sidebar_tags() -> Vec<String> {
    DEFAULT_SIDEBAR_TAGS.iter().map(|t| (*t).to_owned()).collect()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "reflib", "reflib").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("reflib");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is not an
/// error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), exists = path.exists(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("REFLIB_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("missing.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.defaults.view_mode, ViewMode::Grid);
            assert_eq!(cfg.sidebar_tags.len(), DEFAULT_SIDEBAR_TAGS.len());
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                seed_file = "refs.json"
                sidebar_tags = []

                [defaults]
                view_mode = "list"
                "#,
            )?;
            let cfg = load_config_from(&jail.directory().join("config.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.seed_file, Some(PathBuf::from("refs.json")));
            assert!(cfg.sidebar_tags.is_empty());
            assert_eq!(cfg.defaults.view_mode, ViewMode::List);
            assert_eq!(cfg.defaults.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[defaults]\nview_mode = \"list\"\n")?;
            jail.set_env("REFLIB_DEFAULTS__VIEW_MODE", "grid");
            jail.set_env("REFLIB_DEFAULTS__LOG_LEVEL", "debug");
            jail.set_env("REFLIB_SEED_FILE", "/tmp/seed.json");
            let cfg = load_config_from(&jail.directory().join("config.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.defaults.view_mode, ViewMode::Grid);
            assert_eq!(cfg.defaults.log_level, "debug");
            assert_eq!(cfg.seed_file, Some(PathBuf::from("/tmp/seed.json")));
            Ok(())
        });
    }

    #[test]
    fn unknown_view_mode_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[defaults]\nview_mode = \"carousel\"\n")?;
            let err = load_config_from(&jail.directory().join("config.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut cfg = Config::default();
        cfg.defaults.log_level = "loud".into();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "defaults.log_level"));

        let mut cfg = Config::default();
        cfg.sidebar_tags.push("  ".into());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            seed_file: Some(PathBuf::from("/data/refs.json")),
            sidebar_tags: vec!["neon".into(), "vintage".into()],
            defaults: Defaults {
                view_mode: ViewMode::List,
                log_level: "warn".into(),
            },
        };
        save_config_to(&path, &cfg).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[defaults]"));
        assert!(written.contains("view_mode = \"list\""));

        let parsed: Config = toml::from_str(&written).unwrap();
        assert_eq!(parsed, cfg);
    }
}
