//! Waypoint configuration loading from `.waypointrc.toml`.
//!
//! Configuration is optional. Waypoint looks for `.waypointrc.toml` in the
//! current directory (or the file given with `--config`) and falls back to
//! defaults when nothing is found.
//!
//! # Example Configuration
//!
//! ```toml
//! [traffic]
//! min_factor = 1.0
//! max_factor = 3.0
//! seed = 42
//!
//! [output]
//! format = "table"
//! color = true
//! compact = false
//! ```

use serde::Deserialize;
use std::path::Path;
use waypoint_core::FactorRange;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".waypointrc.toml";

/// Root configuration structure.
///
/// All sections are optional and fall back to defaults.
#[derive(Debug, Deserialize, Default)]
pub struct WaypointConfig {
    /// Simulated traffic used by `waypoint route --traffic`.
    #[serde(default)]
    pub traffic: TrafficConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Traffic simulation settings.
///
/// Every edge weight is multiplied by a factor drawn from
/// `[min_factor, max_factor]` each time the router looks at it.
#[derive(Debug, Deserialize, Default)]
pub struct TrafficConfig {
    /// Lower bound of the traffic factor. Default: `1.0`.
    #[serde(default)]
    pub min_factor: Option<f64>,

    /// Upper bound of the traffic factor. Default: `3.0`.
    #[serde(default)]
    pub max_factor: Option<f64>,

    /// Fixed seed for reproducible traffic. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g. `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json`, `csv` or `tree`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Defaults to `true` on a TTY.
    #[serde(default)]
    pub color: Option<bool>,

    /// Borderless tables and single-line JSON. `--compact` also enables it.
    #[serde(default)]
    pub compact: bool,
}

impl WaypointConfig {
    /// Load configuration from an explicit file or `.waypointrc.toml` in `root`.
    ///
    /// Missing files yield defaults. Read and parse errors are logged as
    /// warnings and also yield defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Self {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => root.join(CONFIG_FILE_NAME),
        };
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", config_path.display(), e);
                }
            }
        } else if explicit.is_some() {
            tracing::warn!("Config file {} not found", config_path.display());
        }
        Self::default()
    }

    /// Traffic factor range with CLI overrides applied on top of the config.
    ///
    /// The result is not validated; the traffic resolver rejects bad ranges.
    pub fn factor_range(&self, min_override: Option<f64>, max_override: Option<f64>) -> FactorRange {
        let defaults = FactorRange::default();
        FactorRange {
            min: min_override
                .or(self.traffic.min_factor)
                .unwrap_or(defaults.min),
            max: max_override
                .or(self.traffic.max_factor)
                .unwrap_or(defaults.max),
        }
    }

    /// Traffic seed, CLI flag first.
    pub fn traffic_seed(&self, seed_override: Option<u64>) -> Option<u64> {
        seed_override.or(self.traffic.seed)
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Check if colored output should be used.
    ///
    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn compact(&self) -> bool {
        self.output.compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = WaypointConfig::default();
        assert!(config.traffic.seed.is_none());
        assert!(!config.compact());
        assert!(config.output.format.is_none());
        assert_eq!(config.factor_range(None, None), FactorRange::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[traffic]
min_factor = 1.5
max_factor = 2.5
seed = 7

[output]
format = "json"
color = false
compact = true
"#;
        let config: WaypointConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(
            config.factor_range(None, None),
            FactorRange { min: 1.5, max: 2.5 }
        );
        assert_eq!(config.traffic_seed(None), Some(7));
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
        assert!(config.compact());
    }

    #[test]
    fn test_cli_overrides_config() {
        let toml_content = r#"
[traffic]
min_factor = 1.5
seed = 7
"#;
        let config: WaypointConfig = toml::from_str(toml_content).unwrap();
        let range = config.factor_range(Some(1.0), Some(4.0));
        assert_eq!(range, FactorRange { min: 1.0, max: 4.0 });
        assert_eq!(config.traffic_seed(Some(99)), Some(99));

        // Partial override keeps the other bound from config/defaults
        let range = config.factor_range(None, Some(2.0));
        assert_eq!(range, FactorRange { min: 1.5, max: 2.0 });
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[output]\nformat = \"csv\"\n",
        )
        .unwrap();

        let config = WaypointConfig::load(None, dir.path());
        assert_eq!(config.default_format(), Some("csv"));
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[traffic\nseed = ").unwrap();

        let config = WaypointConfig::load(Some(&path), dir.path());
        assert!(config.traffic.seed.is_none());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = WaypointConfig::load(None, dir.path());
        assert!(config.output.color.is_none());
    }
}
