use anyhow::{Context, Result};
use form_coach::{EngineConfig, ExerciseKind, Side};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_exercise")]
    pub exercise: String,

    #[serde(default = "default_side")]
    pub side: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How replay results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_exercise() -> String {
    ExerciseKind::PushUp.name().to_string()
}

fn default_side() -> String {
    Side::Left.name().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            session: SessionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exercise: default_exercise(),
            side: default_side(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
        }
    }
}

impl SessionConfig {
    pub fn exercise_kind(&self) -> Result<ExerciseKind> {
        self.exercise
            .parse()
            .context("Invalid session.exercise in config")
    }

    pub fn side(&self) -> Result<Side> {
        self.side.parse().context("Invalid session.side in config")
    }
}

impl Config {
    /// Get config directory path (~/.form-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".form-coach"))
    }

    /// Get config file path (~/.form-coach/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Config file path, honouring an explicit override
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from a file, falling back to defaults when it is absent
    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            tracing::info!(path = %config_file.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.engine.validate()?;

        Ok(config)
    }

    pub fn save_to(&self, config_file: &Path) -> Result<()> {
        if let Some(config_dir) = config_file.parent() {
            fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_file, contents).context("Failed to write config file")?;

        Ok(())
    }
}
