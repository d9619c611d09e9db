use crate::error::{Result, SiftError};
use crate::resolve::IndexStripping;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`SiftConfig::get`] and [`SiftConfig::set`], in display order.
pub const CONFIG_KEYS: [&str; 3] = ["index_stripping", "schema_path", "output_format"];

/// How rendered documents are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid output format '{}': expected 'yaml' or 'json'",
                other
            )),
        }
    }
}

/// Configuration for yamlsift, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiftConfig {
    /// Index normalization used by the fallback keyword scan
    #[serde(default)]
    pub index_stripping: IndexStripping,

    /// Schema file replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,

    #[serde(default)]
    pub output_format: OutputFormat,
}

impl SiftConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SiftError::Io)?;
        let config: SiftConfig =
            serde_json::from_str(&content).map_err(SiftError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SiftError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SiftError::Serialization)?;
        fs::write(config_path, content).map_err(SiftError::Io)?;
        Ok(())
    }

    /// Display value for a config key; `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "index_stripping" => Some(self.index_stripping.to_string()),
            "schema_path" => Some(
                self.schema_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "output_format" => Some(self.output_format.to_string()),
            _ => None,
        }
    }

    /// Validates and stores `value` under `key`. An empty `schema_path`
    /// clears it back to the built-in schema.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "index_stripping" => self.index_stripping = value.parse()?,
            "schema_path" => {
                self.schema_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "output_format" => self.output_format = value.parse()?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SiftConfig::default();
        assert_eq!(config.index_stripping, IndexStripping::Legacy);
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert!(config.schema_path.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = SiftConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, SiftConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested");

        let mut config = SiftConfig::default();
        config.set("index_stripping", "all-indices").unwrap();
        config.set("output_format", "json").unwrap();
        config.save(&target).unwrap();

        let loaded = SiftConfig::load(&target).unwrap();
        assert_eq!(loaded.index_stripping, IndexStripping::AllIndices);
        assert_eq!(loaded.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"output_format": "json"}"#,
        )
        .unwrap();
        let config = SiftConfig::load(dir.path()).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.index_stripping, IndexStripping::Legacy);
    }

    #[test]
    fn test_invalid_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();
        assert!(matches!(
            SiftConfig::load(dir.path()),
            Err(SiftError::Serialization(_))
        ));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = SiftConfig::default();
        assert!(config.set("index_stripping", "some").is_err());
        assert!(config.set("output_format", "xml").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, SiftConfig::default());
    }

    #[test]
    fn test_schema_path_set_and_clear() {
        let mut config = SiftConfig::default();
        config.set("schema_path", "/tmp/schema.yaml").unwrap();
        assert_eq!(config.get("schema_path").unwrap(), "/tmp/schema.yaml");
        config.set("schema_path", "").unwrap();
        assert!(config.schema_path.is_none());
        assert_eq!(config.get("schema_path").unwrap(), "");
    }

    #[test]
    fn test_list_all_order() {
        let keys: Vec<&str> = SiftConfig::default()
            .list_all()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, CONFIG_KEYS.to_vec());
    }
}
