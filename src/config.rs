use crate::error::{Error, Result};
use crate::model::RankDirection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up next to the invocation by default
pub const DEFAULT_CONFIG_FILE: &str = "surveyor.toml";

/// Document written when no output path is configured
pub const DEFAULT_OUTPUT_PATH: &str = "doc/architecture.json";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
}

/// Project metadata carried onto the exported document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub pretty: bool,
}

/// Layout settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: RankDirection,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Architecture".to_string(),
            description: String::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pretty: true,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        direction: Option<RankDirection>,
        compact: bool,
    ) {
        if let Some(out) = output {
            self.output.path = out;
        }

        if let Some(direction) = direction {
            self.layout.direction = direction;
        }

        if compact {
            self.output.pretty = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(Error::config_validation("project name cannot be empty"));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(Error::config_validation("output path cannot be empty"));
        }

        Ok(())
    }
}
