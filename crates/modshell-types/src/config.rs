//! Interpreter configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// How a typed module name is compared against registered names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleMatch {
    /// Names must be identical.
    #[default]
    Exact,
    /// Only the first `module_name_max_len` characters are compared.
    Prefix,
}

/// Interpreter configuration (`modshell.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Prompt shown when no default module is selected.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Capacity of the module registry.
    #[serde(default = "default_max_modules")]
    pub max_modules: usize,
    /// Maximum number of arguments on one line.
    #[serde(default = "default_max_args")]
    pub max_args: usize,
    /// Number of line buffers cycling between producer and interpreter.
    #[serde(default = "default_max_queued")]
    pub max_queued: usize,
    /// Capacity of one line buffer, in bytes.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Longest accepted module name.
    #[serde(default = "default_module_name_max_len")]
    pub module_name_max_len: usize,
    #[serde(default)]
    pub module_match: ModuleMatch,
    /// Module selected at startup, if any.
    #[serde(default)]
    pub default_module: Option<String>,
}

fn default_prompt() -> String {
    "shell> ".to_string()
}
fn default_max_modules() -> usize {
    8
}
fn default_max_args() -> usize {
    20
}
fn default_max_queued() -> usize {
    2
}
fn default_max_line_len() -> usize {
    256
}
fn default_module_name_max_len() -> usize {
    20
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            max_modules: default_max_modules(),
            max_args: default_max_args(),
            max_queued: default_max_queued(),
            max_line_len: default_max_line_len(),
            module_name_max_len: default_module_name_max_len(),
            module_match: ModuleMatch::default(),
            default_module: None,
        }
    }
}

impl ShellConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loading shell config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Reject configurations the interpreter cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() {
            return Err(ShellError::Config("prompt must not be empty".to_string()));
        }
        let capacities = [
            ("max_modules", self.max_modules),
            ("max_args", self.max_args),
            ("max_queued", self.max_queued),
            ("max_line_len", self.max_line_len),
            ("module_name_max_len", self.module_name_max_len),
        ];
        for (name, value) in capacities {
            if value == 0 {
                return Err(ShellError::Config(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }

    /// Length limit handed to the registry's bounded name comparison.
    pub fn module_compare_len(&self) -> usize {
        match self.module_match {
            ModuleMatch::Exact => usize::MAX,
            ModuleMatch::Prefix => self.module_name_max_len,
        }
    }
}
