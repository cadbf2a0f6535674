//! Command-line configuration module.
//!
//! This module contains the options the binary accepts: the grid layout, the playback timing and
//! where log records go.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::LevelFilter;

use crate::{
    animation::FrameDelays,
    grid::{Grid, GridError, Position},
};

/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 20;
/// Default number of grid columns.
pub const DEFAULT_COLS: usize = 50;
/// Largest accepted number of rows or columns; the layout measures the grid in `u16` cells.
pub const MAX_DIMENSION: usize = 1_000;
/// Default start cell.
pub const DEFAULT_START: Position = Position::new(10, 15);
/// Default finish cell.
pub const DEFAULT_FINISH: Position = Position::new(10, 35);
/// Default delay before each visited cell is revealed, in milliseconds.
pub const DEFAULT_VISITED_DELAY_MS: u64 = 10;
/// Default delay before each shortest-path cell is revealed, in milliseconds.
pub const DEFAULT_PATH_DELAY_MS: u64 = 50;
/// Default event poll timeout, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 16;

/// Draw walls on a grid and watch Dijkstra's algorithm find the shortest path through them.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of rows in the grid.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,
    /// Number of columns in the grid.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,
    /// Start cell as "row,col".
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: Position,
    /// Finish cell as "row,col".
    #[arg(long, default_value_t = DEFAULT_FINISH)]
    pub finish: Position,
    /// Delay before each visited cell is revealed, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_VISITED_DELAY_MS)]
    pub visited_delay_ms: u64,
    /// Delay before each shortest-path cell is revealed, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_PATH_DELAY_MS)]
    pub path_delay_ms: u64,
    /// How long to wait for input before advancing the playback, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,
    /// File to append log records to; logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Most verbose level written to the log file.
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: DEFAULT_START,
            finish: DEFAULT_FINISH,
            visited_delay_ms: DEFAULT_VISITED_DELAY_MS,
            path_delay_ms: DEFAULT_PATH_DELAY_MS,
            tick_ms: DEFAULT_TICK_MS,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Builds the empty grid described by this configuration.
    ///
    /// # Errors
    ///
    /// This function returns [`GridError::TooLarge`] when a dimension exceeds [`MAX_DIMENSION`],
    /// and otherwise the [`GridError`] raised by [`Grid::new`] when the dimensions or the endpoints
    /// are unusable.
    pub fn build_grid(&self) -> Result<Grid, GridError> {
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(GridError::TooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_DIMENSION,
            });
        }

        Grid::new(self.rows, self.cols, self.start, self.finish)
    }

    /// Returns the configured playback delays.
    #[must_use]
    pub const fn frame_delays(&self) -> FrameDelays {
        FrameDelays {
            visited: Duration::from_millis(self.visited_delay_ms),
            path: Duration::from_millis(self.path_delay_ms),
        }
    }

    /// Returns the event poll timeout.
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
