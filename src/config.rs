use crate::error::Result;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub update_check: UpdateCheckSettings,

    /// Verbose mode (not stored in the config file)
    #[serde(skip)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default AUTHOR substitution when --author is not given
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding user templates, one subdirectory per template
    #[serde(default = "default_templates_dir")]
    pub dir: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

fn default_templates_dir() -> String {
    "~/.init-agent/templates".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCheckSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

impl Default for UpdateCheckSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: default_interval_hours(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval_hours() -> u64 {
    24
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied by the command handlers)
    /// 2. Environment variables
    /// 3. Global config (~/.init-agent.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                config = config.merge(Self::from_file(&path)?);
            }
        }

        Ok(config.merge_env())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".init-agent.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(mut self, other: Self) -> Self {
        if !other.defaults.author.is_empty() {
            self.defaults.author = other.defaults.author;
        }
        if other.templates.dir != default_templates_dir() {
            self.templates.dir = other.templates.dir;
        }
        self.update_check.enabled = other.update_check.enabled;
        if other.update_check.interval_hours != default_interval_hours() {
            self.update_check.interval_hours = other.update_check.interval_hours;
        }
        self
    }

    /// Apply environment variable overrides
    fn merge_env(mut self) -> Self {
        if let Ok(author) = std::env::var("INIT_AGENT_AUTHOR") {
            if !author.is_empty() {
                self.defaults.author = author;
            }
        }

        if let Ok(dir) = std::env::var("INIT_AGENT_TEMPLATES_DIR") {
            if !dir.is_empty() {
                self.templates.dir = dir;
            }
        }

        if let Ok(value) = std::env::var("INIT_AGENT_UPDATE_CHECK") {
            match value.as_str() {
                "0" | "false" | "off" => self.update_check.enabled = false,
                "1" | "true" | "on" => self.update_check.enabled = true,
                _ => {}
            }
        }

        self
    }

    /// The user templates directory with ~ expanded, or None if it
    /// cannot be resolved (unset HOME, unknown ~user)
    pub fn templates_dir(&self) -> Option<PathBuf> {
        if self.templates.dir.is_empty() {
            return None;
        }
        expand_tilde(&self.templates.dir)
    }
}
