//! Game configuration: difficulty levels, optional TOML file, CLI overrides.

use clap::ValueEnum;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::EnumIter;
use tracing::{debug, info, instrument};

use crate::games::minesweeper::validate_dimensions;

/// Default pause between the final reveal and termination.
pub const DEFAULT_END_DELAY_MS: u64 = 5_000;

/// Default capacity of each coordinator request queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Predefined board sizes and mine counts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    /// 9×9 with 10 mines.
    #[default]
    Beginner,
    /// 16×16 with 40 mines.
    Intermediate,
    /// 22×22 with 99 mines.
    Expert,
}

impl Level {
    /// Board side length for this level.
    pub fn board_size(self) -> usize {
        match self {
            Self::Beginner => 9,
            Self::Intermediate => 16,
            Self::Expert => 22,
        }
    }

    /// Mine count for this level.
    pub fn mine_quantity(self) -> usize {
        match self {
            Self::Beginner => 10,
            Self::Intermediate => 40,
            Self::Expert => 99,
        }
    }
}

/// Contents of an optional TOML configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Difficulty level supplying size and mine defaults.
    pub level: Option<Level>,
    /// Board side length.
    pub board_size: Option<usize>,
    /// Number of mines.
    pub mine_quantity: Option<usize>,
    /// Fixed RNG seed for reproducible boards.
    pub seed: Option<u64>,
    /// Pause in milliseconds between the final reveal and termination.
    pub end_delay_ms: Option<u64>,
    /// Capacity of each coordinator request queue.
    pub queue_capacity: Option<usize>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let file: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?file, "Config loaded successfully");
        Ok(file)
    }
}

/// Values given on the command line; these win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Difficulty level.
    pub level: Option<Level>,
    /// Board side length.
    pub board_size: Option<usize>,
    /// Number of mines.
    pub mine_quantity: Option<usize>,
    /// Fixed RNG seed.
    pub seed: Option<u64>,
}

/// Fully resolved, validated game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameConfig {
    /// Board side length (the board is square).
    board_size: usize,
    /// Number of mines, strictly less than `board_size²`.
    mine_quantity: usize,
    /// Fixed RNG seed; `None` seeds from OS entropy per game.
    seed: Option<u64>,
    /// Pause between the final reveal and termination.
    end_delay: Duration,
    /// Capacity of each coordinator request queue.
    queue_capacity: usize,
}

impl GameConfig {
    /// Creates a validated configuration for an explicit size and mine count.
    #[instrument]
    pub fn new(board_size: usize, mine_quantity: usize) -> Result<Self, ConfigError> {
        validate_dimensions(board_size, mine_quantity)?;
        Ok(Self {
            board_size,
            mine_quantity,
            seed: None,
            end_delay: Duration::from_millis(DEFAULT_END_DELAY_MS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        })
    }

    /// Configuration for a predefined level.
    pub fn for_level(level: Level) -> Self {
        Self {
            board_size: level.board_size(),
            mine_quantity: level.mine_quantity(),
            seed: None,
            end_delay: Duration::from_millis(DEFAULT_END_DELAY_MS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Merges level defaults, the config file, and CLI overrides, then validates.
    ///
    /// Precedence is CLI over file over level.
    #[instrument(skip_all)]
    pub fn resolve(
        file: Option<&ConfigFile>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file = file.cloned().unwrap_or_default();
        let level = overrides.level.or(file.level).unwrap_or_default();

        let board_size = overrides
            .board_size
            .or(file.board_size)
            .unwrap_or_else(|| level.board_size());
        let mine_quantity = overrides
            .mine_quantity
            .or(file.mine_quantity)
            .unwrap_or_else(|| level.mine_quantity());

        let queue_capacity = file.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY);
        if queue_capacity == 0 {
            return Err(ConfigError::new("Queue capacity must be at least 1."));
        }

        let mut config = Self::new(board_size, mine_quantity)?;
        config.seed = overrides.seed.or(file.seed);
        config.end_delay = Duration::from_millis(file.end_delay_ms.unwrap_or(DEFAULT_END_DELAY_MS));
        config.queue_capacity = queue_capacity;

        debug!(%level, ?config, "Configuration resolved");
        Ok(config)
    }

    /// Returns a copy with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy with a different end-of-game delay.
    pub fn with_end_delay(mut self, end_delay: Duration) -> Self {
        self.end_delay = end_delay;
        self
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", message)]
pub struct ConfigError {
    /// User-facing error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_level_is_valid() {
        for level in Level::iter() {
            assert!(
                validate_dimensions(level.board_size(), level.mine_quantity()).is_ok(),
                "{level} is invalid"
            );
        }
    }

    #[test]
    fn test_resolve_defaults_to_beginner() {
        let config = GameConfig::resolve(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(*config.board_size(), 9);
        assert_eq!(*config.mine_quantity(), 10);
        assert_eq!(*config.end_delay(), Duration::from_millis(DEFAULT_END_DELAY_MS));
        assert_eq!(config.seed(), &None);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = ConfigFile {
            level: Some(Level::Expert),
            mine_quantity: Some(50),
            seed: Some(1),
            ..ConfigFile::default()
        };
        let overrides = ConfigOverrides {
            mine_quantity: Some(60),
            ..ConfigOverrides::default()
        };
        let config = GameConfig::resolve(Some(&file), &overrides).unwrap();
        assert_eq!(*config.board_size(), 22);
        assert_eq!(*config.mine_quantity(), 60);
        assert_eq!(config.seed(), &Some(1));
    }

    #[test]
    fn test_resolve_rejects_full_board() {
        let overrides = ConfigOverrides {
            board_size: Some(3),
            mine_quantity: Some(9),
            ..ConfigOverrides::default()
        };
        let err = GameConfig::resolve(None, &overrides).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The number of mines must be less than the total number of cells."
        );
    }

    #[test]
    fn test_resolve_rejects_zero_capacity() {
        let file = ConfigFile {
            queue_capacity: Some(0),
            ..ConfigFile::default()
        };
        assert!(GameConfig::resolve(Some(&file), &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_parse_toml() {
        let file: ConfigFile = toml::from_str(
            "level = \"intermediate\"\nseed = 99\nend_delay_ms = 250\n",
        )
        .unwrap();
        assert_eq!(file.level, Some(Level::Intermediate));
        assert_eq!(file.seed, Some(99));
        assert_eq!(file.end_delay_ms, Some(250));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<ConfigFile>("bombs = 3\n").is_err());
    }
}
