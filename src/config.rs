//! Configuration management for fcst.
//!
//! This module provides the [`Config`] struct which controls what the driver
//! prints and which files it picks up. Configuration can be loaded from:
//! - TOML files (`fcst.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being inspected up to the filesystem root, plus the user's home directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Config file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["fcst.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// What the driver prints for each input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    /// One line per token with position and kind
    Tokens,
    /// One line per logical line
    Lines,
    /// One line per classified node
    #[default]
    Nodes,
    /// The block tree, indented by depth
    Tree,
}

impl DumpFormat {
    pub const NAMES: [&'static str; 4] = ["tokens", "lines", "nodes", "tree"];
}

impl FromStr for DumpFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tokens" => Ok(DumpFormat::Tokens),
            "lines" => Ok(DumpFormat::Lines),
            "nodes" => Ok(DumpFormat::Nodes),
            "tree" => Ok(DumpFormat::Tree),
            other => bail!(
                "unknown format '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            ),
        }
    }
}

impl fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DumpFormat::Tokens => "tokens",
            DumpFormat::Lines => "lines",
            DumpFormat::Nodes => "nodes",
            DumpFormat::Tree => "tree",
        };
        f.write_str(name)
    }
}

// Serde default functions
fn default_tree_indent() -> usize {
    2
}
fn default_true() -> bool {
    true
}
fn default_max_file_size() -> u64 {
    100 * 1024 * 1024
}

/// Main configuration struct for fcst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output format (default: nodes)
    #[serde(default)]
    pub format: DumpFormat,

    /// Spaces per depth level in the tree dump (default: 2)
    #[serde(default = "default_tree_indent")]
    pub tree_indent: usize,

    /// Print each node's previous significant kind (default: true)
    #[serde(default = "default_true")]
    pub show_prev_kind: bool,

    /// Extra Fortran file extensions, with or without leading dot
    #[serde(default)]
    pub fortran_extensions: Vec<String>,

    /// Glob patterns for files/directories to skip
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Files larger than this many bytes are skipped (default: 100 MiB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub format: Option<DumpFormat>,
    pub tree_indent: Option<usize>,
    pub show_prev_kind: Option<bool>,
    pub fortran_extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: DumpFormat::default(),
            tree_indent: default_tree_indent(),
            show_prev_kind: true,
            fortran_extensions: Vec::new(),
            exclude: Vec::new(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Config {
    /// Maximum reasonable tree indent
    const MAX_TREE_INDENT: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.tree_indent == 0 {
            return Some("tree_indent must be at least 1".to_string());
        }
        if self.tree_indent > Self::MAX_TREE_INDENT {
            return Some(format!(
                "tree_indent {} exceeds maximum of {}",
                self.tree_indent,
                Self::MAX_TREE_INDENT
            ));
        }
        if self.max_file_size == 0 {
            return Some("max_file_size must be greater than 0".to_string());
        }
        if let Some(bad) = self.exclude.iter().find(|p| glob::Pattern::new(p).is_err()) {
            return Some(format!("invalid exclude pattern '{bad}'"));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let partial: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let mut config = Self::default();
        config.apply_partial(partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.format {
            self.format = v;
        }
        if let Some(v) = partial.tree_indent {
            self.tree_indent = v;
        }
        if let Some(v) = partial.show_prev_kind {
            self.show_prev_kind = v;
        }
        if let Some(v) = partial.max_file_size {
            self.max_file_size = v;
        }
        // Lists accumulate across files
        if let Some(v) = partial.fortran_extensions {
            self.fortran_extensions.extend(v);
        }
        if let Some(v) = partial.exclude {
            self.exclude.extend(v);
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Returns config file paths least specific first: the home directory,
    /// then each ancestor from the root down to the path's own directory.
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home().and_then(|home| std::path::absolute(home).ok()) {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Relative paths are resolved first: the parent of `a.f90` is "",
        // whose only ancestor is itself
        let start_path =
            std::path::absolute(start_path).unwrap_or_else(|_| start_path.to_path_buf());
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path)
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<&Path> = dir.ancestors().collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones. Unreadable or malformed files are
    /// skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_path) {
            let partial = std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|contents| Ok(toml::from_str::<PartialConfig>(&contents)?));
            match partial {
                Ok(partial) => config.apply_partial(partial),
                Err(e) => warn!("skipping config {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(toml_src: &str) -> PartialConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.format, DumpFormat::Nodes);
        assert_eq!(config.tree_indent, 2);
        assert!(config.show_prev_kind);
        assert!(config.exclude.is_empty());
        assert_eq!(config.max_file_size, 100 * 1024 * 1024);
    }

    #[test]
    fn test_dump_format_from_str() {
        assert_eq!("tree".parse::<DumpFormat>().unwrap(), DumpFormat::Tree);
        assert_eq!("TOKENS".parse::<DumpFormat>().unwrap(), DumpFormat::Tokens);
        assert!("xml".parse::<DumpFormat>().is_err());
    }

    #[test]
    fn test_dump_format_names_round_trip_display() {
        for name in DumpFormat::NAMES {
            assert_eq!(name.parse::<DumpFormat>().unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_config_apply_partial() {
        let mut config = Config::default();
        config.apply_partial(partial("format = \"tree\"\ntree_indent = 4\n"));
        assert_eq!(config.format, DumpFormat::Tree);
        assert_eq!(config.tree_indent, 4);
        assert!(config.show_prev_kind);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut config = Config::default();
        config.show_prev_kind = false;
        config.apply_partial(partial("tree_indent = 3\n"));
        assert!(!config.show_prev_kind);
        assert_eq!(config.format, DumpFormat::Nodes);
    }

    #[test]
    fn test_config_lists_accumulate() {
        let mut config = Config::default();
        config.apply_partial(partial("exclude = [\"build\"]\n"));
        config.apply_partial(partial("exclude = [\"*.gen.f90\"]\nfortran_extensions = [\"inc\"]\n"));
        assert_eq!(config.exclude, vec!["build", "*.gen.f90"]);
        assert_eq!(config.fortran_extensions, vec!["inc"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<PartialConfig>("indent = 3\n").is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fcst.toml");
        std::fs::write(&path, "format = \"lines\"\nshow_prev_kind = false\n").unwrap();
        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.format, DumpFormat::Lines);
        assert!(!config.show_prev_kind);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_toml_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_discovery_nearest_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("fcst.toml"), "format = \"tree\"\ntree_indent = 5\n").unwrap();
        std::fs::write(nested.join("fcst.toml"), "format = \"tokens\"\n").unwrap();
        let file = nested.join("a.f90");
        std::fs::write(&file, "x = 1\n").unwrap();

        let found = Config::discover_config_files(&file);
        let outer = found.iter().position(|p| p == &dir.path().join("fcst.toml"));
        let inner = found.iter().position(|p| p == &nested.join("fcst.toml"));
        assert!(outer.unwrap() < inner.unwrap());

        let config = Config::from_discovered_files(&file);
        assert_eq!(config.format, DumpFormat::Tokens);
        assert_eq!(config.tree_indent, 5);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_none());
    }

    #[test]
    fn test_validate_tree_indent() {
        let mut config = Config::default();
        config.tree_indent = 0;
        assert!(config.validate().unwrap().contains("at least 1"));
        config.tree_indent = 17;
        assert!(config.validate().unwrap().contains("exceeds maximum"));
    }

    #[test]
    fn test_validate_max_file_size() {
        let mut config = Config::default();
        config.max_file_size = 0;
        assert!(config.validate().is_some());
    }

    #[test]
    fn test_validate_exclude_pattern() {
        let mut config = Config::default();
        config.exclude.push("[unclosed".to_string());
        assert!(config.validate().unwrap().contains("invalid exclude pattern"));
    }
}
