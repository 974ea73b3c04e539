//! Editor configuration.

use anchorkit_core::RemovalMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Largest history depth accepted by [`EditorConfig::validate`].
pub const MAX_HISTORY_DEPTH: usize = 10_000;

/// Tunables for a `PathEditor`.
///
/// Missing keys in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept besides the baseline
    pub history_depth: usize,
    /// Whether dragging a handle of a mirrored anchor also moves its partner
    pub mirror_handles: bool,
    /// How removing an interior anchor treats its subpath
    pub removal_mode: RemovalMode,
    /// Bracket width at which nearest-point refinement stops
    pub split_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 100,
            mirror_handles: true,
            removal_mode: RemovalMode::Cut,
            split_tolerance: 1e-6,
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(format!(
            "{} (config file must be .json or .toml)",
            path.display()
        ))),
    }
}

impl EditorConfig {
    /// Load config from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML, by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Load from `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history_depth == 0 {
            return Err(SettingsError::invalid("history_depth", "must be at least 1"));
        }
        if self.history_depth > MAX_HISTORY_DEPTH {
            return Err(SettingsError::invalid(
                "history_depth",
                format!("must not exceed {}", MAX_HISTORY_DEPTH),
            ));
        }
        if !self.split_tolerance.is_finite() || self.split_tolerance <= 0.0 {
            return Err(SettingsError::invalid(
                "split_tolerance",
                "must be a positive finite number",
            ));
        }
        if self.split_tolerance >= 1.0 {
            return Err(SettingsError::invalid(
                "split_tolerance",
                "must be smaller than the parameter range",
            ));
        }
        Ok(())
    }

    /// Per-user config file location (`<config dir>/anchorkit/editor.toml`).
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        path.push("anchorkit");
        path.push("editor.toml");
        Ok(path)
    }
}
