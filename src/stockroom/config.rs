use crate::error::{Result, StockError};
use crate::inventory::MergeDecision;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "inventory_data/inventory.json";

/// How an add with an already-known name is handled when the user was not asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Ask every time.
    #[default]
    Ask,
    Always,
    Never,
}

impl MergePolicy {
    /// The decision this policy makes on its own, if any.
    pub fn decision(&self) -> Option<MergeDecision> {
        match self {
            MergePolicy::Ask => None,
            MergePolicy::Always => Some(MergeDecision::Merge),
            MergePolicy::Never => Some(MergeDecision::Decline),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MergePolicy::Ask => "ask",
            MergePolicy::Always => "always",
            MergePolicy::Never => "never",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ask" => Ok(MergePolicy::Ask),
            "always" | "yes" => Ok(MergePolicy::Always),
            "never" | "no" => Ok(MergePolicy::Never),
            other => Err(format!(
                "Invalid merge policy '{}' (expected ask, always or never)",
                other
            )),
        }
    }
}

/// Configuration for stockroom, stored in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockConfig {
    /// Catalog file, relative paths resolve against the working directory
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// What `add` does with a name that already exists
    #[serde(default)]
    pub merge_duplicates: MergePolicy,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            merge_duplicates: MergePolicy::default(),
        }
    }
}

impl StockConfig {
    pub const KEYS: [&'static str; 2] = ["data-file", "merge"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockError::Io)?;
        let config: StockConfig =
            serde_json::from_str(&content).map_err(StockError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockError::Serialization)?;
        fs::write(config_path, content).map_err(StockError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.display().to_string()),
            "merge" => Some(self.merge_duplicates.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "data-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("data-file cannot be empty".to_string());
                }
                self.data_file = PathBuf::from(value);
                Ok(())
            }
            "merge" => {
                self.merge_duplicates = value.parse()?;
                Ok(())
            }
            other => Err(format!("Unknown config key: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.data_file, PathBuf::from("inventory_data/inventory.json"));
        assert_eq!(config.merge_duplicates, MergePolicy::Ask);
    }

    #[test]
    fn test_set_and_get_keys() {
        let mut config = StockConfig::default();
        config.set("merge", "Always").unwrap();
        config.set("data-file", "stock/catalog.json").unwrap();
        assert_eq!(config.get("merge").as_deref(), Some("always"));
        assert_eq!(config.get("data-file").as_deref(), Some("stock/catalog.json"));
        assert!(config.set("merge", "sometimes").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config.get("colour"), None);
    }

    #[test]
    fn test_policy_decisions() {
        assert_eq!(MergePolicy::Ask.decision(), None);
        assert_eq!(MergePolicy::Always.decision(), Some(MergeDecision::Merge));
        assert_eq!(MergePolicy::Never.decision(), Some(MergeDecision::Decline));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = env::temp_dir().join("stockroom_test_config_missing");
        let _ = fs::remove_dir_all(&temp_dir);

        let config = StockConfig::load(&temp_dir).unwrap();
        assert_eq!(config, StockConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = env::temp_dir().join("stockroom_test_config_save");
        let _ = fs::remove_dir_all(&temp_dir);

        let mut config = StockConfig::default();
        config.set("merge", "never").unwrap();
        config.save(&temp_dir).unwrap();

        let loaded = StockConfig::load(&temp_dir).unwrap();
        assert_eq!(loaded.merge_duplicates, MergePolicy::Never);

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: StockConfig = serde_json::from_str(r#"{"merge_duplicates":"always"}"#).unwrap();
        assert_eq!(parsed.data_file, default_data_file());
        assert_eq!(parsed.merge_duplicates, MergePolicy::Always);
    }
}
