//! Search playback module.
//!
//! This module turns the two sequences produced by a search (the visited order and the shortest
//! path) into timed frames and replays them, so the grid can be repainted one step at a time.

use std::time::{Duration, Instant};

use log::debug;

use crate::{grid::Position, pathfinding::SearchOutcome};

/// Single frame of a search playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStep {
    /// Reveal a cell the search finalized.
    Visit(Position),
    /// Reveal a cell on the shortest path.
    Path(Position),
}

/// Delays applied before each kind of frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDelays {
    /// Delay before each visited cell is revealed.
    pub visited: Duration,
    /// Delay before each shortest-path cell is revealed.
    pub path: Duration,
}

impl Default for FrameDelays {
    fn default() -> Self {
        Self {
            visited: Duration::from_millis(10),
            path: Duration::from_millis(50),
        }
    }
}

/// Playback state for an animated search.
///
/// This structure owns the frames recorded from a search outcome, tracks how many of them have
/// been revealed and when the last one was, and keeps the revealed cells split by kind so the UI can
/// paint them without walking the frames again.
#[derive(Debug)]
pub struct AnimationManager {
    /// Frames in playback order: every visited cell first, then every path cell.
    steps: Vec<AnimationStep>,
    /// Index of the next frame to reveal.
    current_index: usize,
    /// Time at which the last frame became due.
    last_update_time: Instant,
    /// Delays between frames.
    delays: FrameDelays,
    /// Visited cells revealed so far.
    visited: Vec<Position>,
    /// Path cells revealed so far.
    path: Vec<Position>,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new(FrameDelays::default())
    }
}

impl AnimationManager {
    /// Creates an empty playback with the given frame delays.
    #[must_use]
    pub fn new(delays: FrameDelays) -> Self {
        Self {
            steps: Vec::new(),
            current_index: 0,
            last_update_time: Instant::now(),
            delays,
            visited: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Records the frames of a search outcome and rewinds to the first one, due one delay from
    /// `now`.
    pub fn load(&mut self, outcome: &SearchOutcome, now: Instant) {
        self.steps = outcome
            .visited_order
            .iter()
            .copied()
            .map(AnimationStep::Visit)
            .chain(outcome.shortest_path().into_iter().map(AnimationStep::Path))
            .collect();
        self.rewind(now);

        debug!("playback loaded with {} frames", self.steps.len());
    }

    /// Rewinds the playback to its first frame.
    pub fn rewind(&mut self, now: Instant) {
        self.current_index = 0;
        self.visited.clear();
        self.path.clear();
        self.last_update_time = now;
    }

    /// Drops every recorded frame and everything revealed.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.rewind(Instant::now());
    }

    /// Replaces the frame delays used from now on.
    pub fn set_delays(&mut self, delays: FrameDelays) {
        self.delays = delays;
    }

    /// Returns the recorded frames.
    #[must_use]
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Returns the visited cells revealed so far.
    #[must_use]
    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    /// Returns the path cells revealed so far.
    #[must_use]
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Tells whether every recorded frame has been revealed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.steps.len()
    }

    /// Advances the playback to `now`.
    ///
    /// Every frame whose delay has elapsed is revealed, so a slow tick catches up on all frames due
    /// since the previous one instead of lagging behind. Returns `true` once every frame has been
    /// revealed.
    pub fn update_at(&mut self, now: Instant) -> bool {
        while let Some(step) = self.steps.get(self.current_index).copied() {
            let delay = match step {
                AnimationStep::Visit(_) => self.delays.visited,
                AnimationStep::Path(_) => self.delays.path,
            };
            let due = self.last_update_time + delay;
            if now < due {
                break;
            }

            match step {
                AnimationStep::Visit(position) => self.visited.push(position),
                AnimationStep::Path(position) => self.path.push(position),
            }
            self.last_update_time = due;
            self.current_index += 1;
        }

        self.is_finished()
    }

    /// Reveals every remaining frame at once.
    pub fn skip_to_end(&mut self) {
        for step in self.steps.iter().skip(self.current_index) {
            match *step {
                AnimationStep::Visit(position) => self.visited.push(position),
                AnimationStep::Path(position) => self.path.push(position),
            }
        }
        self.current_index = self.steps.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::Grid, pathfinding::run_search};

    /// Searches an open 3x3 grid corner to corner.
    fn outcome() -> SearchOutcome {
        let grid = Grid::new(3, 3, Position::new(0, 0), Position::new(2, 2)).expect("valid grid");
        run_search(&grid, grid.start(), grid.finish()).expect("search should run")
    }

    /// Returns the default frame delays spelled out.
    fn delays() -> FrameDelays {
        FrameDelays {
            visited: Duration::from_millis(10),
            path: Duration::from_millis(50),
        }
    }

    #[test]
    fn test_load_records_visited_then_path() {
        let outcome = outcome();
        let mut manager = AnimationManager::new(delays());

        manager.load(&outcome, Instant::now());

        assert_eq!(manager.steps().len(), 9 + 5);
        assert!(manager
            .steps()
            .iter()
            .take(9)
            .all(|step| matches!(step, AnimationStep::Visit(_))));
        assert!(manager
            .steps()
            .iter()
            .skip(9)
            .all(|step| matches!(step, AnimationStep::Path(_))));
        assert!(manager.visited().is_empty(), "nothing is revealed on load");
    }

    #[test]
    fn test_update_reveals_due_frames_only() {
        let outcome = outcome();
        let mut manager = AnimationManager::new(delays());
        let start = Instant::now();
        manager.load(&outcome, start);

        assert!(!manager.update_at(start + Duration::from_millis(5)));
        assert!(manager.visited().is_empty());

        assert!(!manager.update_at(start + Duration::from_millis(35)));
        assert_eq!(manager.visited().len(), 3);
        assert_eq!(manager.visited(), &outcome.visited_order[..3]);
        assert!(manager.path().is_empty());
    }

    #[test]
    fn test_update_plays_path_after_visited() {
        let outcome = outcome();
        let mut manager = AnimationManager::new(delays());
        let start = Instant::now();
        manager.load(&outcome, start);

        // 9 visited frames at 10ms, then 2 path frames at 50ms.
        assert!(!manager.update_at(start + Duration::from_millis(90 + 100)));
        assert_eq!(manager.visited().len(), 9);
        assert_eq!(manager.path().len(), 2);

        assert!(manager.update_at(start + Duration::from_millis(90 + 250)));
        assert_eq!(manager.path(), outcome.shortest_path().as_slice());
        assert!(manager.is_finished());
    }

    #[test]
    fn test_unreachable_outcome_has_no_path_frames() {
        let grid = Grid::new(1, 3, Position::new(0, 0), Position::new(0, 2))
            .and_then(|grid| grid.toggle_wall(Position::new(0, 1)))
            .expect("valid grid");
        let outcome = run_search(&grid, grid.start(), grid.finish()).expect("search should run");
        let mut manager = AnimationManager::new(delays());
        let start = Instant::now();

        manager.load(&outcome, start);

        assert_eq!(manager.steps(), &[AnimationStep::Visit(Position::new(0, 0))]);
        assert!(manager.update_at(start + Duration::from_millis(10)));
        assert!(manager.path().is_empty());
    }

    #[test]
    fn test_skip_to_end_and_rewind() {
        let outcome = outcome();
        let mut manager = AnimationManager::new(delays());
        let start = Instant::now();
        manager.load(&outcome, start);

        manager.skip_to_end();
        assert!(manager.is_finished());
        assert_eq!(manager.visited().len(), 9);
        assert_eq!(manager.path().len(), 5);

        manager.rewind(start);
        assert!(!manager.is_finished());
        assert!(manager.visited().is_empty());
        assert!(manager.path().is_empty());
    }

    #[test]
    fn test_clear_drops_frames() {
        let outcome = outcome();
        let mut manager = AnimationManager::default();
        manager.load(&outcome, Instant::now());

        manager.clear();

        assert!(manager.steps().is_empty());
        assert!(manager.is_finished(), "an empty playback is trivially finished");
    }
}
