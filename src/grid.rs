//! Grid model module.
//!
//! This module contains the rectangular cell grid the maze is drawn on, the per-cell state the
//! search writes into, and the typed errors raised when a grid is misconfigured.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Coordinates of a single cell in the grid.
///
/// Positions are plain `(row, col)` pairs and are used everywhere a cell has to be referenced,
/// including the predecessor links written by the search, so no cell ever borrows another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row index, counted from the top of the grid.
    pub row: usize,
    /// Zero-based column index, counted from the left of the grid.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the number of orthogonal steps between two positions.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{},{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = GridError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidPosition(input.to_owned());

        let (row, col) = input.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_err| invalid())?;
        let col = col.trim().parse().map_err(|_err| invalid())?;

        Ok(Self { row, col })
    }
}

/// Errors raised when a grid or a search is configured with unusable positions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid was requested with zero rows or zero columns.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
    },
    /// The grid was requested with more rows or columns than the terminal can lay out.
    #[error("grid dimensions must not exceed {max}, got {rows}x{cols}")]
    TooLarge {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
        /// Largest accepted dimension.
        max: usize,
    },
    /// A position lies outside of the grid.
    #[error("position {position} is outside of a {rows}x{cols} grid")]
    OutOfBounds {
        /// Offending position.
        position: Position,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },
    /// Start and finish were placed on the same cell.
    #[error("start and finish must differ, both are {0}")]
    StartEqualsFinish(Position),
    /// A search endpoint is covered by a wall.
    #[error("search endpoint {0} is a wall")]
    WallOnEndpoint(Position),
    /// A position could not be parsed from text.
    #[error("invalid position {0:?}, expected \"row,col\"")]
    InvalidPosition(String),
}

/// State of one grid position.
///
/// The first group of fields describes the maze itself and survives between runs; the remaining
/// three are search bookkeeping that [`Grid::reset_bookkeeping`] restores before every search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Where the cell sits in the grid.
    pub position: Position,
    /// Whether the search starts from this cell.
    pub is_start: bool,
    /// Whether the search is looking for this cell.
    pub is_finish: bool,
    /// Whether the cell blocks traversal.
    pub is_wall: bool,
    /// Shortest known number of steps from the start; `None` stands for infinity.
    pub distance: Option<usize>,
    /// Whether the search has finalized this cell.
    pub is_visited: bool,
    /// Predecessor on a shortest path from the start, once relaxed.
    pub previous: Option<Position>,
}

impl Cell {
    /// Creates an open cell with cleared bookkeeping.
    const fn new(position: Position, is_start: bool, is_finish: bool) -> Self {
        Self {
            position,
            is_start,
            is_finish,
            is_wall: false,
            distance: None,
            is_visited: false,
            previous: None,
        }
    }

    /// Clears the search bookkeeping, leaving the maze flags alone.
    fn reset(&mut self) {
        self.distance = None;
        self.is_visited = false;
        self.previous = None;
    }
}

/// Rectangular grid of cells stored row-major in a flat vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Position of the unique start cell.
    start: Position,
    /// Position of the unique finish cell.
    finish: Position,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid of open cells with the given start and finish.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    /// - Either dimension is zero
    /// - The start or the finish lies outside of the grid
    /// - The start and the finish are the same cell
    pub fn new(
        rows: usize,
        cols: usize,
        start: Position,
        finish: Position,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        for position in [start, finish] {
            if position.row >= rows || position.col >= cols {
                return Err(GridError::OutOfBounds {
                    position,
                    rows,
                    cols,
                });
            }
        }
        if start == finish {
            return Err(GridError::StartEqualsFinish(start));
        }

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Position::new(row, col)))
            .map(|position| Cell::new(position, position == start, position == finish))
            .collect();

        Ok(Self {
            rows,
            cols,
            start,
            finish,
            cells,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the position of the start cell.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the position of the finish cell.
    #[must_use]
    pub const fn finish(&self) -> Position {
        self.finish
    }

    /// Returns every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Tells whether a position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Returns the cell at a position, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|idx| self.cells.get(idx))
    }

    /// Mutable counterpart of [`Grid::cell`].
    pub(crate) fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index(position).and_then(|idx| self.cells.get_mut(idx))
    }

    /// Tells whether the cell at a position exists and is a wall.
    #[must_use]
    pub fn is_wall(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|cell| cell.is_wall)
    }

    /// Returns how many cells are currently walls.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_wall).count()
    }

    /// Returns a copy of the grid with the wall flag of one cell flipped.
    ///
    /// Every other cell is carried over untouched. Start and finish are not special-cased; keeping
    /// walls off them is up to the caller.
    ///
    /// # Errors
    ///
    /// This function returns [`GridError::OutOfBounds`] if the position lies outside of the grid.
    pub fn toggle_wall(&self, position: Position) -> Result<Self, GridError> {
        let mut grid = self.clone();
        let (rows, cols) = (grid.rows, grid.cols);
        let cell = grid.cell_mut(position).ok_or(GridError::OutOfBounds {
            position,
            rows,
            cols,
        })?;
        cell.is_wall = !cell.is_wall;

        Ok(grid)
    }

    /// Returns the in-bounds orthogonal neighbours of a position.
    ///
    /// The order is always up, down, left, right. The search relies on it to break ties the same
    /// way on every run.
    #[must_use]
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        let Position { row, col } = position;
        let candidates = [
            row.checked_sub(1).map(|row| Position::new(row, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|col| Position::new(row, col)),
            Some(Position::new(row, col + 1)),
        ];

        candidates
            .into_iter()
            .flatten()
            .filter(|candidate| self.contains(*candidate))
            .collect()
    }

    /// Restores the search bookkeeping of every cell to its initial state.
    pub fn reset_bookkeeping(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Converts a position into an offset into the flat cell vector.
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }
}
