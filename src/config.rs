use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit log lines as JSON instead of human-readable text.
    pub json_logs: bool,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:chains.sqlite".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

/// What to do when two chains produce the same key in one mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The chain with the higher id wins.
    #[default]
    LastWriteWins,

    /// The chain with the lower id wins.
    FirstWriteWins,

    /// Abort the export.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,

    pub shikimori2animego_file: String,

    pub kinopoisk2shikimori_file: String,

    pub readme_path: String,

    pub duplicate_policy: DuplicatePolicy,

    /// Spaces per JSON indentation level (default: 4)
    pub indent: usize,

    /// Create `output_dir` when it is missing instead of failing the write.
    pub create_output_dir: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./json".to_string(),
            shikimori2animego_file: "shikimori2animego.json".to_string(),
            kinopoisk2shikimori_file: "kinopoisk2shikimori.json".to_string(),
            readme_path: "./README.md".to_string(),
            duplicate_policy: DuplicatePolicy::LastWriteWins,
            indent: 4,
            create_output_dir: false,
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn shikimori2animego_path(&self) -> PathBuf {
        Path::new(&self.output_dir).join(&self.shikimori2animego_file)
    }

    #[must_use]
    pub fn kinopoisk2shikimori_path(&self) -> PathBuf {
        Path::new(&self.output_dir).join(&self.kinopoisk2shikimori_file)
    }
}

impl Config {
    /// First existing file in the lookup order, if any.
    #[must_use]
    pub fn find_config_file() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|path| path.exists())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("animechains").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".animechains").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.max_db_connections == 0 {
            anyhow::bail!("max_db_connections must be at least 1");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        if self.export.shikimori2animego_file.trim().is_empty()
            || self.export.kinopoisk2shikimori_file.trim().is_empty()
            || self.export.readme_path.trim().is_empty()
        {
            anyhow::bail!("Export output file names cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.database_path, "sqlite:chains.sqlite");
        assert_eq!(config.export.indent, 4);
        assert_eq!(config.export.duplicate_policy, DuplicatePolicy::LastWriteWins);
        assert!(!config.export.create_output_dir);
        assert_eq!(
            config.export.shikimori2animego_path(),
            PathBuf::from("./json/shikimori2animego.json")
        );
        assert_eq!(
            config.export.kinopoisk2shikimori_path(),
            PathBuf::from("./json/kinopoisk2shikimori.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[export]"));
        assert!(toml_str.contains("duplicate_policy = \"last-write-wins\""));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [export]
            output_dir = "out"
            duplicate_policy = "reject"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.export.output_dir, "out");
        assert_eq!(config.export.duplicate_policy, DuplicatePolicy::Reject);

        assert_eq!(config.general.database_path, "sqlite:chains.sqlite");
        assert_eq!(config.export.readme_path, "./README.md");
    }

    #[test]
    fn test_load_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("animechains-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[general]\ndatabase_path = \"sqlite:other.sqlite\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.general.database_path, "sqlite:other.sqlite");
        assert_eq!(config.export.indent, 4);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let path = std::env::temp_dir().join("animechains-no-such-dir").join("config.toml");
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.max_db_connections = 0;
        config.general.min_db_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_output_names() {
        let mut config = Config::default();
        config.export.kinopoisk2shikimori_file = String::new();
        assert!(config.validate().is_err());
    }
}
