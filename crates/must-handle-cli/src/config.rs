//! Project configuration (`must-handle.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use must_handle_checker::AnalysisOptions;
use serde::Deserialize;

use crate::error::CliError;

pub const CONFIG_FILE: &str = "must-handle.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RulesConfig {
    pub explicit_handling: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            explicit_handling: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Tree files whose path contains any of these fragments are skipped
    pub exclude: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find the nearest `must-handle.toml` in `start` or its ancestors
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>, CliError> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            enabled: self.rules.explicit_handling,
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.paths
            .exclude
            .iter()
            .any(|fragment| !fragment.is_empty() && path.contains(fragment.as_str()))
    }
}
