//! Configuration settings for the simulator

use crate::game_of_life::grid::{check_dimensions, DEFAULT_MAX_DIMENSION};
use crate::game_of_life::BirthRule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub rules: RulesConfig,
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub max_dimension: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub birth: BirthRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub alive_glyph: char,
    pub dead_glyph: char,
    pub color: bool,
    /// Pause between generations
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub board_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alive_glyph: 'O',
            dead_glyph: '.',
            color: true,
            delay_ms: 500,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.max_dimension == 0 {
            anyhow::bail!("Maximum board dimension must be positive");
        }

        check_dimensions(self.board.width, self.board.height, self.board.max_dimension)
            .context("Board size is out of range")?;

        if self.display.alive_glyph == self.display.dead_glyph {
            anyhow::bail!(
                "Alive and dead glyphs must differ (both are '{}')",
                self.display.alive_glyph
            );
        }

        if let Some(ref board_file) = self.input.board_file {
            if !board_file.exists() {
                anyhow::bail!("Board file does not exist: {}", board_file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(delay_ms) = cli_overrides.delay_ms {
            self.display.delay_ms = delay_ms;
        }
        if let Some(birth) = cli_overrides.birth {
            self.rules.birth = birth;
        }
        if let Some(ref board_file) = cli_overrides.board_file {
            self.input.board_file = Some(board_file.clone());
        }
        if cli_overrides.no_color {
            self.display.color = false;
        }
        if cli_overrides.json {
            self.output.format = OutputFormat::Json;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub delay_ms: Option<u64>,
    pub birth: Option<BirthRule>,
    pub board_file: Option<PathBuf>,
    pub no_color: bool,
    pub json: bool,
}
