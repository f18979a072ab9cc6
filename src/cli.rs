//! Command-line interface for strictly_minesweeper.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigOverrides, Level};

/// Strictly Minesweeper - find the mines without setting one off
#[derive(Parser, Debug)]
#[command(name = "strictly_minesweeper")]
#[command(about = "Terminal minesweeper", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Difficulty level (sets board size and mine count)
    #[arg(short, long, value_enum)]
    pub level: Option<Level>,

    /// Board side length, overriding the level
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Number of mines, overriding the level
    #[arg(short, long)]
    pub mines: Option<usize>,

    /// Fixed seed for a reproducible board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write logs (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Values from the command line that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.level,
            board_size: self.size,
            mine_quantity: self.mines,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_and_overrides() {
        let cli = Cli::parse_from(["strictly_minesweeper", "--level", "expert", "--mines", "50"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.level, Some(Level::Expert));
        assert_eq!(overrides.mine_quantity, Some(50));
        assert_eq!(overrides.board_size, None);
    }

    #[test]
    fn test_defaults_are_empty() {
        let cli = Cli::parse_from(["strictly_minesweeper"]);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(cli.config.is_none());
    }
}
