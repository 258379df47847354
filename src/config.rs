use clap::Parser;
use thiserror::Error;

use crate::GridInt;

pub const DEFAULT_COLS: GridInt = 26;
pub const DEFAULT_ROWS: GridInt = 26;
pub const DEFAULT_TICKS_PER_STEP: u64 = 8;
pub const DEFAULT_FRAME_MS: u64 = 16;

// The starting snake reaches x = 6 and y = 5.
const MIN_COLS: GridInt = 7;
const MIN_ROWS: GridInt = 6;

// Far beyond any terminal, and small enough that the board's screen width
// and cell count stay well inside `u16` and a few MiB.
pub const MAX_COLS: GridInt = 1000;
pub const MAX_ROWS: GridInt = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min_cols}x{min_rows} to fit the starting snake, got {cols}x{rows}")]
    GridTooSmall { cols: GridInt, rows: GridInt, min_cols: GridInt, min_rows: GridInt },

    #[error("grid must be at most {max_cols}x{max_rows}, got {cols}x{rows}")]
    GridTooLarge { cols: GridInt, rows: GridInt, max_cols: GridInt, max_rows: GridInt },

    #[error("ticks per step must be at least 1")]
    ZeroCadence,
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gridsnake")]
#[command(about = "Snake on a fixed grid, in the terminal")]
pub struct GameConfig {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: GridInt,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: GridInt,

    /// Frames between two simulation steps
    #[arg(long = "ticks-per-step", default_value_t = DEFAULT_TICKS_PER_STEP)]
    pub ticks_per_step: u64,

    /// Milliseconds per frame
    #[arg(long = "frame-ms", default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            ticks_per_step: DEFAULT_TICKS_PER_STEP,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.cols < MIN_COLS || self.rows < MIN_ROWS {
            return Err(ConfigError::GridTooSmall {
                cols: self.cols,
                rows: self.rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }

        if self.cols > MAX_COLS || self.rows > MAX_ROWS {
            return Err(ConfigError::GridTooLarge {
                cols: self.cols,
                rows: self.rows,
                max_cols: MAX_COLS,
                max_rows: MAX_ROWS,
            });
        }

        if self.ticks_per_step == 0 {
            return Err(ConfigError::ZeroCadence);
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_board() {
        let parsed = GameConfig::try_parse_from(vec!["gridsnake"]).unwrap();

        assert_eq!(parsed, GameConfig::default());
        assert_eq!((parsed.cols, parsed.rows, parsed.ticks_per_step), (26, 26, 8));
    }

    #[test]
    fn parses_flags() {
        let parsed = GameConfig::try_parse_from(vec![
            "gridsnake", "--cols", "40", "--rows", "20", "--ticks-per-step", "4", "--frame-ms", "10",
        ])
        .unwrap();

        assert_eq!(parsed, GameConfig { cols: 40, rows: 20, ticks_per_step: 4, frame_ms: 10 });
    }

    #[test]
    fn rejects_tiny_grids_and_zero_cadence() {
        let tiny = GameConfig { cols: 6, ..GameConfig::default() };
        assert!(matches!(tiny.validate(), Err(ConfigError::GridTooSmall { cols: 6, .. })));

        let short = GameConfig { rows: 5, ..GameConfig::default() };
        assert!(short.validate().is_err());

        let frozen = GameConfig { ticks_per_step: 0, ..GameConfig::default() };
        assert_eq!(frozen.validate(), Err(ConfigError::ZeroCadence));

        assert!(GameConfig { cols: 7, rows: 6, ..GameConfig::default() }.validate().is_ok());
    }

    #[test]
    fn rejects_huge_grids() {
        let wide = GameConfig { cols: 40000, ..GameConfig::default() };
        assert!(matches!(wide.validate(), Err(ConfigError::GridTooLarge { cols: 40000, .. })));

        let tall = GameConfig { rows: 1001, ..GameConfig::default() };
        assert!(matches!(tall.validate(), Err(ConfigError::GridTooLarge { rows: 1001, .. })));

        let everything = GameConfig { cols: u16::MAX, rows: u16::MAX, ..GameConfig::default() };
        assert!(everything.validate().is_err());

        let largest = GameConfig { cols: MAX_COLS, rows: MAX_ROWS, ..GameConfig::default() };
        assert!(largest.validate().is_ok());
    }
}
