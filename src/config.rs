use crate::error::{GitBumpError, Result};
use crate::store::SearchMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gitbump.toml";

/// Represents the complete configuration for git-bump.
///
/// Contains the commit classification rules and the publish defaults that
/// command-line flags may override.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Returns the default list of recognised conventional commit types.
fn default_commit_types() -> Vec<String> {
    vec![
        "feat".to_string(),
        "feature".to_string(),
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "test".to_string(),
        "chore".to_string(),
        "build".to_string(),
        "ci".to_string(),
        "perf".to_string(),
        "revert".to_string(),
    ]
}

fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string(), "feature".to_string()]
}

fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string(), "perf".to_string(), "refactor".to_string()]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

fn default_skip_markers() -> Vec<String> {
    vec!["[skip hint]".to_string()]
}

fn default_exit_pre_release_markers() -> Vec<String> {
    vec!["[exit beta]".to_string(), "[exit prerelease]".to_string()]
}

/// Rules for turning commit messages into version signals.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Conventional types that are recognised but never bump the version
    /// on their own.
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,

    /// Subject markers that make a commit carry no version hint
    #[serde(default = "default_skip_markers")]
    pub skip_markers: Vec<String>,

    /// Message markers that let a commit leave the pre-1.0 phase
    #[serde(default = "default_exit_pre_release_markers")]
    pub exit_pre_release_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            types: default_commit_types(),
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
            skip_markers: default_skip_markers(),
            exit_pre_release_markers: default_exit_pre_release_markers(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Defaults for the publish step.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub tag_prefix: String,

    #[serde(default)]
    pub tag_suffix: String,

    #[serde(default)]
    pub search: SearchMode,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            remote: default_remote(),
            tag_prefix: String::new(),
            tag_suffix: String::new(),
            search: SearchMode::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return load_config_file(Path::new(path));
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return load_config_file(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            return load_config_file(&user_config);
        }
    }

    Ok(Config::default())
}

fn load_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        GitBumpError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| GitBumpError::config(format!("Cannot parse '{}': {}", path.display(), e)))
}
