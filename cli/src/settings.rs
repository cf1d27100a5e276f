use std::{fs, path::Path};

use anyhow::Context;
use clap::Args;
use mineboard_core::{CellCount, GameConfig, Sampling};
use serde::Deserialize;

/// Board settings, read from a TOML file and/or the command line.
#[derive(Args, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Number of board rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of board columns
    #[arg(long)]
    pub cols: Option<usize>,

    /// Number of mines to place, kept within 5..=20
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Never place two mines on the same cell
    #[arg(long)]
    pub distinct_mines: bool,
}

impl Settings {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Combines two sources, values present in `overrides` win.
    pub(crate) fn merge(self, overrides: Self) -> Self {
        Self {
            rows: overrides.rows.or(self.rows),
            cols: overrides.cols.or(self.cols),
            mines: overrides.mines.or(self.mines),
            seed: overrides.seed.or(self.seed),
            distinct_mines: overrides.distinct_mines || self.distinct_mines,
        }
    }

    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        let config = GameConfig::new(
            self.rows.unwrap_or(GameConfig::DEFAULT_ROWS),
            self.cols.unwrap_or(GameConfig::DEFAULT_COLS),
            GameConfig::DEFAULT_MINES,
        )
        .context("invalid board size")?;
        Ok(clamp_mines(
            config,
            self.mines.unwrap_or(GameConfig::DEFAULT_MINES),
        ))
    }

    pub(crate) fn sampling(&self) -> Sampling {
        if self.distinct_mines {
            Sampling::Distinct
        } else {
            Sampling::Independent
        }
    }
}

/// Applies a requested mine count the way the settings menu allows it.
pub(crate) fn clamp_mines(config: GameConfig, requested: CellCount) -> GameConfig {
    let config = config.with_clamped_mines(requested);
    if config.mine_count != requested {
        log::info!(
            "Mine count {} is outside {:?}, using {}",
            requested,
            GameConfig::MINE_COUNT_RANGE,
            config.mine_count
        );
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_source() {
        let config = Settings::default().game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn file_values_are_parsed() {
        let settings: Settings = toml::from_str("rows = 8\ncols = 12\nmines = 15\n").unwrap();
        assert_eq!(settings.rows, Some(8));
        assert_eq!(settings.seed, None);

        let config = settings.game_config().unwrap();
        assert_eq!(config, GameConfig::new(8, 12, 15).unwrap());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Settings>("difficulty = \"hard\"").is_err());
    }

    #[test]
    fn command_line_overrides_file() {
        let file = Settings {
            rows: Some(8),
            mines: Some(6),
            seed: Some(1),
            ..Default::default()
        };
        let flags = Settings {
            mines: Some(12),
            distinct_mines: true,
            ..Default::default()
        };

        let merged = file.merge(flags);

        assert_eq!(merged.rows, Some(8));
        assert_eq!(merged.mines, Some(12));
        assert_eq!(merged.seed, Some(1));
        assert_eq!(merged.sampling(), Sampling::Distinct);
    }

    #[test]
    fn mine_count_is_clamped() {
        let settings = Settings {
            mines: Some(50),
            ..Default::default()
        };
        assert_eq!(settings.game_config().unwrap().mine_count, 20);
        assert_eq!(clamp_mines(GameConfig::default(), 0).mine_count, 5);
    }

    #[test]
    fn empty_board_is_an_error() {
        let settings = Settings {
            rows: Some(0),
            ..Default::default()
        };
        assert!(settings.game_config().is_err());
    }
}
