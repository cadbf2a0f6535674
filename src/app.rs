//! Core application state and logic for the visualizer.

use std::time::Instant;

use color_eyre::eyre::Result;
use log::{info, warn};
use ratatui::{layout::Rect, DefaultTerminal};

use crate::{
    animation::AnimationManager,
    config::Config,
    events,
    grid::{Grid, Position},
    pathfinding,
    types::{MainMenuItem, Screen, Session, Speed},
    ui,
};

/// Application state container for the visualizer.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the interface and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Options the application was started with.
    ///
    /// The grid layout is rebuilt from this on every reset, and the playback delays are derived
    /// from it together with the selected [`Speed`].
    pub(crate) config: Config,
    /// Grid being edited.
    ///
    /// The search never writes into this grid; it explores its own copy, so the walls drawn here
    /// are the only state that outlives a playback.
    pub(crate) grid: Grid,
    /// Where the current session is in its edit, search and replay cycle.
    pub(crate) session: Session,
    /// Selected animation speed preset.
    pub(crate) speed: Speed,
    /// Whether the last search reached the finish, once one has run.
    pub(crate) last_success: Option<bool>,
    /// Cell under the keyboard cursor.
    pub(crate) cursor: Position,
    /// Whether the left mouse button is held down over the grid.
    pub(crate) mouse_pressed: bool,
    /// Last cell toggled while dragging, so a drag toggles each entered cell once.
    pub(crate) last_dragged: Option<Position>,
    /// Screen area the grid was drawn into during the last redraw.
    ///
    /// Mouse coordinates are translated into cells relative to this area.
    pub(crate) grid_area: Rect,
    /// Animation manager for the search playback.
    pub(crate) animation_manager: AnimationManager,
}

impl App {
    /// Creates a new instance of the App structure from the given configuration.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configuration describes an unusable grid.
    pub fn new(config: Config) -> Result<Self> {
        let grid = config.build_grid()?;
        let cursor = grid.start();
        let animation_manager = AnimationManager::new(config.frame_delays());

        info!(
            "grid ready: {}x{}, start {}, finish {}",
            grid.rows(),
            grid.cols(),
            grid.start(),
            grid.finish()
        );

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Visualize),
            config,
            grid,
            session: Session::Idle,
            speed: Speed::Normal,
            last_success: None,
            cursor,
            mouse_pressed: false,
            last_dragged: None,
            grid_area: Rect::default(),
            animation_manager,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Flips the wall at `position` if the session and the cell allow it.
    ///
    /// Edits are ignored outside of the idle state, on the start and finish cells and outside of the
    /// grid. Returns whether the grid changed.
    pub(crate) fn toggle_wall(&mut self, position: Position) -> bool {
        if !self.session.allows_edits() {
            return false;
        }
        if position == self.grid.start() || position == self.grid.finish() {
            warn!("refusing to place a wall on endpoint {position}");
            return false;
        }

        match self.grid.toggle_wall(position) {
            Ok(grid) => {
                self.grid = grid;
                true
            }
            Err(err) => {
                warn!("ignoring wall edit: {err}");
                false
            }
        }
    }

    /// Searches the current grid and starts replaying the result.
    ///
    /// Nothing happens while a playback is still running. A completed playback is replaced, which
    /// first clears everything the previous one revealed.
    ///
    /// # Errors
    ///
    /// This function returns an error if the grid endpoints cannot be searched from.
    pub(crate) fn visualize(&mut self) -> Result<()> {
        if !self.session.allows_search() {
            return Ok(());
        }

        let outcome =
            pathfinding::run_search(&self.grid, self.grid.start(), self.grid.finish())?;
        info!(
            "search finished: {} cells visited, path of {} cells",
            outcome.visited_order.len(),
            outcome.shortest_path().len()
        );

        self.animation_manager
            .set_delays(self.speed.scale(self.config.frame_delays()));
        self.animation_manager.load(&outcome, Instant::now());
        self.last_success = Some(outcome.success);
        self.mouse_pressed = false;
        self.session = Session::Running;

        Ok(())
    }

    /// Rebuilds the grid from the configuration and unlocks editing.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configuration describes an unusable grid.
    pub(crate) fn reset(&mut self) -> Result<()> {
        self.grid = self.config.build_grid()?;
        self.animation_manager.clear();
        self.last_success = None;
        self.mouse_pressed = false;
        self.last_dragged = None;
        self.session = Session::Idle;

        info!("grid reset");

        Ok(())
    }

    /// Advances a running playback and completes the session once it is over.
    pub(crate) fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances a running playback to `now`.
    pub(crate) fn tick_at(&mut self, now: Instant) {
        if self.session == Session::Running && self.animation_manager.update_at(now) {
            self.session = Session::Completed;
            info!("playback completed");
        }
    }

    /// Reveals the rest of a running playback immediately.
    pub(crate) fn finish_playback(&mut self) {
        if self.session == Session::Running {
            self.animation_manager.skip_to_end();
            self.session = Session::Completed;
        }
    }

    /// Moves the keyboard cursor by one cell, staying inside the grid.
    pub(crate) fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let row = self
            .cursor
            .row
            .checked_add_signed(row_delta)
            .filter(|row| *row < self.grid.rows());
        let col = self
            .cursor
            .col
            .checked_add_signed(col_delta)
            .filter(|col| *col < self.grid.cols());

        if let (Some(row), Some(col)) = (row, col) {
            self.cursor = Position::new(row, col);
        }
    }

    /// Tells whether the last redraw had room for one terminal cell per grid cell.
    ///
    /// A smaller area makes the canvas scale the grid down, and several grid cells then share a
    /// terminal cell.
    pub(crate) fn grid_fits_area(&self) -> bool {
        usize::from(self.grid_area.width) >= self.grid.cols()
            && usize::from(self.grid_area.height) >= self.grid.rows()
    }

    /// Translates a terminal cell into the grid cell drawn there during the last redraw.
    ///
    /// Returns `None` while the grid is drawn scaled down, since a terminal cell no longer names a
    /// single grid cell.
    pub(crate) fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.grid_area;
        if !self.grid_fits_area() || column < area.x || row < area.y {
            return None;
        }
        let position = Position::new(usize::from(row - area.y), usize::from(column - area.x));

        (usize::from(row - area.y) < usize::from(area.height)
            && usize::from(column - area.x) < usize::from(area.width)
            && self.grid.contains(position))
        .then_some(position)
    }
}
