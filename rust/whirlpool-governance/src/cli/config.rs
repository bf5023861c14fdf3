// CLI Configuration - Convert CLI args to governor config
// Principle: Clear mapping between user input and internal configuration

use crate::cli::Cli;
use crate::storage::DatabaseOptions;
use std::path::PathBuf;

/// Configuration derived from CLI arguments and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernorConfig {
    /// Base data path
    pub base_path: PathBuf,
    /// RocksDB tuning
    pub database: DatabaseOptions,
}

impl GovernorConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let base_path = cli.base_path.clone().unwrap_or_else(default_base_path);

        if base_path.exists() && !base_path.is_dir() {
            return Err(ConfigError::BasePathNotDirectory(base_path));
        }

        // -1 = unlimited; 0 and other negatives are meaningless to RocksDB
        if cli.db_max_open_files == 0 || cli.db_max_open_files < -1 {
            return Err(ConfigError::InvalidMaxOpenFiles(cli.db_max_open_files));
        }

        Ok(Self {
            base_path,
            database: DatabaseOptions {
                max_open_files: cli.db_max_open_files,
            },
        })
    }

    /// RocksDB directory
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("db")
    }
}

/// Platform-specific data directory
pub fn default_base_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("whirlpool-governance")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Base path is not a directory: {0}")]
    BasePathNotDirectory(PathBuf),

    #[error("Invalid database max open files: {0} (use -1 for unlimited)")]
    InvalidMaxOpenFiles(i32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["whirlpool-gov"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_config_from_explicit_base_path() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap();
        let cli = parse(&["list", "pools", "-d", base]);

        let config = GovernorConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_path, temp_dir.path());
        assert_eq!(config.db_path(), temp_dir.path().join("db"));
        assert_eq!(config.database, DatabaseOptions::default());
    }

    #[test]
    fn test_default_base_path() {
        let path = default_base_path();
        assert!(path.to_string_lossy().contains("whirlpool-governance"));
    }

    #[test]
    fn test_base_path_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let cli = parse(&["list", "pools", "-d", file.to_str().unwrap()]);
        assert!(matches!(
            GovernorConfig::from_cli(&cli),
            Err(ConfigError::BasePathNotDirectory(_))
        ));
    }

    #[test]
    fn test_invalid_max_open_files() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap();

        let cli = parse(&["list", "pools", "-d", base, "--db-max-open-files", "0"]);
        assert!(matches!(
            GovernorConfig::from_cli(&cli),
            Err(ConfigError::InvalidMaxOpenFiles(0))
        ));

        let cli = parse(&["list", "pools", "-d", base, "--db-max-open-files", "-1"]);
        assert_eq!(GovernorConfig::from_cli(&cli).unwrap().database.max_open_files, -1);
    }
}
