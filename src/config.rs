use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::marker::{DEFAULT_PREFIX, MarkerSchema};

pub const CONFIG_FILE_NAME: &str = ".rbacgenrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &["**/*_test.go", "**/testdata/**"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_role_name")]
    pub role_name: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_role_name() -> String {
    "manager-role".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["go".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            role_name: default_role_name(),
            includes: Vec::new(),
            ignores: Vec::new(),
            extensions: default_extensions(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// The prefix must be non-empty and end with `:`, the role name must be non-empty,
    /// and glob patterns in `ignores` / `includes` must compile.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            bail!("'prefix' must not be empty");
        }
        if self.prefix.chars().any(char::is_whitespace) {
            bail!("'prefix' must not contain whitespace: \"{}\"", self.prefix);
        }
        if !self.prefix.ends_with(':') {
            bail!("'prefix' must end with ':': \"{}\"", self.prefix);
        }
        if self.role_name.trim().is_empty() {
            bail!("'roleName' must not be empty");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }

    /// Immutable marker schema for one generation run.
    pub fn marker_schema(&self) -> MarkerSchema {
        MarkerSchema::new(self.prefix.clone())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
