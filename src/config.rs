//! Configuration management for ipshard.
//!
//! The config file is optional. When present it supplies defaults for values
//! that would otherwise have to be repeated on every invocation, such as the
//! seed shared by all workers of one run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ShardError;

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ipshard/config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Seed used when `--seed` is not given
    pub seed: Option<i64>,

    /// Exclusion list used when `--blacklist` is not given
    pub exclude_file: Option<PathBuf>,

    /// Directory that relative `--results` paths are resolved against
    pub results_dir: Option<PathBuf>,

    /// Skip CIDR lines expanding to more than this many addresses
    pub max_range_size: Option<u64>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ShardError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShardError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| ShardError::Config(format!("{:?}: {}", path, e)))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ShardError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate YAML content. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_range_size == Some(0) {
            return Err("max_range_size must be at least 1".to_string());
        }
        Ok(())
    }

    /// Seed from the command line, falling back to the config file.
    pub fn resolve_seed(&self, cli_seed: Option<i64>) -> Result<i64, ShardError> {
        cli_seed.or(self.seed).ok_or_else(|| {
            ShardError::Config("No seed given: pass --seed or set 'seed' in the config file".into())
        })
    }

    /// Exclusion file from the command line, falling back to the config file.
    pub fn resolve_exclude_file(&self, cli_exclude: Option<&Path>) -> Option<PathBuf> {
        cli_exclude
            .map(Path::to_path_buf)
            .or_else(|| self.exclude_file.clone())
    }

    /// Place a relative results path under `results_dir` when one is set.
    pub fn resolve_results_path(&self, results: &Path) -> PathBuf {
        match &self.results_dir {
            Some(dir) if results.is_relative() => dir.join(results),
            _ => results.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.exclude_file, None);
        assert_eq!(config.results_dir, None);
        assert_eq!(config.max_range_size, None);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
seed: 42
exclude_file: /etc/ipshard/exclude.txt
results_dir: /var/lib/ipshard
max_range_size: 65536
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(
            config.exclude_file,
            Some(PathBuf::from("/etc/ipshard/exclude.txt"))
        );
        assert_eq!(config.results_dir, Some(PathBuf::from("/var/lib/ipshard")));
        assert_eq!(config.max_range_size, Some(65536));
    }

    #[test]
    fn test_parse_partial_and_empty() {
        let config = Config::from_yaml("seed: -3\n").unwrap();
        assert_eq!(config.seed, Some(-3));
        assert_eq!(config.exclude_file, None);

        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = Config::from_yaml("seeds: 42\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_range_size() {
        let result = Config::from_yaml("max_range_size: 0\n");
        assert!(result.unwrap_err().contains("max_range_size"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = Config {
            seed: Some(7),
            exclude_file: None,
            results_dir: Some(PathBuf::from("out")),
            max_range_size: Some(1024),
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/ipshard/config.yaml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "seed: [not, a, number]\n").unwrap();

        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ShardError::Config(_)));
    }

    #[test]
    fn test_resolve_seed() {
        let config = Config {
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(config.resolve_seed(Some(9)).unwrap(), 9);
        assert_eq!(config.resolve_seed(None).unwrap(), 5);

        let err = Config::default().resolve_seed(None).unwrap_err();
        assert!(matches!(err, ShardError::Config(_)));
    }

    #[test]
    fn test_resolve_exclude_file() {
        let config = Config {
            exclude_file: Some(PathBuf::from("/etc/ipshard/exclude.txt")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_exclude_file(Some(Path::new("mine.txt"))),
            Some(PathBuf::from("mine.txt"))
        );
        assert_eq!(
            config.resolve_exclude_file(None),
            Some(PathBuf::from("/etc/ipshard/exclude.txt"))
        );
        assert_eq!(Config::default().resolve_exclude_file(None), None);
    }

    #[test]
    fn test_resolve_results_path() {
        let config = Config {
            results_dir: Some(PathBuf::from("/var/lib/ipshard")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_results_path(Path::new("run1/shard")),
            PathBuf::from("/var/lib/ipshard/run1/shard")
        );
        assert_eq!(
            config.resolve_results_path(Path::new("/tmp/shard.txt")),
            PathBuf::from("/tmp/shard.txt")
        );
        assert_eq!(
            Config::default().resolve_results_path(Path::new("shard.txt")),
            PathBuf::from("shard.txt")
        );
    }
}
