//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rl_core::{Categorizer, DistanceTable, DistanceTableError, IdScheme, Normalizer};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Race records read when a command is given no input path.
    pub input_path: PathBuf,

    /// Synthesize `race-{index}` ids instead of tagging them with a per-run token.
    #[serde(default)]
    pub stable_ids: bool,

    /// Per-category mile overrides keyed by category label, e.g. `"50K" = 31.1`.
    #[serde(default)]
    pub distances: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            input_path: data_dir.join("races.json"),
            stable_ids: false,
            distances: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RL_*)
        figment = figment.merge(Env::prefixed("RL_"));

        figment.extract()
    }

    /// Categorizer using the standard table with this config's overrides.
    pub fn categorizer(&self) -> Result<Categorizer, DistanceTableError> {
        DistanceTable::with_overrides(&self.distances).map(Categorizer::new)
    }

    /// Normalizer for one run; `batch_token` tags synthesized ids unless
    /// `stable_ids` is set.
    pub fn normalizer(&self, batch_token: &str) -> Result<Normalizer, DistanceTableError> {
        let ids = if self.stable_ids {
            IdScheme::Positional
        } else {
            IdScheme::Token(batch_token.to_string())
        };
        Ok(Normalizer::new(self.categorizer()?, ids))
    }
}

/// Returns the platform-specific config directory for rl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rl"))
}

/// Returns the platform-specific data directory for rl.
///
/// On Linux: `~/.local/share/rl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rl_core::RaceCategory;

    #[test]
    fn test_dirs_data_path_ends_with_rl() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "rl");
    }

    #[test]
    fn test_default_config_reads_races_from_data_dir() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.input_path, data_dir.join("races.json"));
        assert!(!config.stable_ids);
        assert!(config.distances.is_empty());
    }

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "input_path = \"/data/races.jsonl\"\nstable_ids = true\n\n[distances]\n\"50K\" = 31.1\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.input_path, PathBuf::from("/data/races.jsonl"));
        assert!(config.stable_ids);
        assert_eq!(config.distances.get("50K"), Some(&31.1));
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "override values are exact literals")]
    fn test_categorizer_applies_distance_overrides() {
        let mut config = Config::default();
        config.distances.insert("Marathon".to_string(), 26.22);
        let categorizer = config.categorizer().unwrap();
        assert_eq!(categorizer.table().miles(RaceCategory::Marathon), 26.22);
    }

    #[test]
    fn test_categorizer_rejects_unknown_override() {
        let mut config = Config::default();
        config.distances.insert("Ultra".to_string(), 40.0);
        assert!(config.categorizer().is_err());
    }
}
