//! Shortest-path search module.
//!
//! This module contains the uniform-cost search run over the grid and the reconstruction of the
//! shortest path from the predecessor links it leaves behind. Every edge costs one step, so the
//! search behaves like a breadth-first traversal ordered by distance.

use std::{cmp::Reverse, collections::BinaryHeap};

use log::debug;

use crate::grid::{Grid, GridError, Position};

/// Result of a single search run.
///
/// The visited order is what the playback animates first; the explored grid carries the final
/// distances and predecessor links used to rebuild the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cells in the order the search finalized them, ending with the finish when it was reached.
    pub visited_order: Vec<Position>,
    /// Whether the finish cell was reached.
    pub success: bool,
    /// Cell the search started from.
    pub start: Position,
    /// Cell the search was looking for.
    pub finish: Position,
    /// Copy of the input grid holding the bookkeeping written by the search.
    pub grid: Grid,
}

impl SearchOutcome {
    /// Rebuilds the shortest path to the finish, or an empty vector when it was unreachable.
    #[must_use]
    pub fn shortest_path(&self) -> Vec<Position> {
        reconstruct_path(&self.grid, self.finish)
    }
}

/// Runs the shortest-path search from `start` to `finish`.
///
/// The input grid is never modified. The search works on a copy whose bookkeeping is reset before
/// the start distance is seeded, so leftovers from a previous run cannot leak into this one.
///
/// The frontier is ordered by distance and then by the order cells were relaxed in, which makes
/// the visited order deterministic. The run stops as soon as the finish is finalized or when no
/// reachable cell is left; unreachable cells are never marked as visited.
///
/// # Errors
///
/// This function returns an error if:
/// - The start or the finish lies outside of the grid
/// - The start and the finish are the same cell
/// - The start or the finish is a wall
pub fn run_search(
    grid: &Grid,
    start: Position,
    finish: Position,
) -> Result<SearchOutcome, GridError> {
    validate_endpoints(grid, start, finish)?;

    let mut grid = grid.clone();
    grid.reset_bookkeeping();
    if let Some(cell) = grid.cell_mut(start) {
        cell.distance = Some(0);
    }

    let mut frontier = BinaryHeap::new();
    let mut sequence = 0_usize;
    frontier.push(Reverse((0_usize, sequence, start)));

    let mut visited_order = Vec::new();
    let mut success = false;

    while let Some(Reverse((distance, _, current))) = frontier.pop() {
        let Some(cell) = grid.cell_mut(current) else {
            continue;
        };
        // Entries superseded by a later relaxation are skipped.
        if cell.is_visited || cell.distance != Some(distance) {
            continue;
        }

        cell.is_visited = true;
        visited_order.push(current);

        if current == finish {
            success = true;
            break;
        }

        let candidate = distance + 1;
        for neighbor in grid.neighbors(current) {
            let Some(next) = grid.cell_mut(neighbor) else {
                continue;
            };
            if next.is_wall || next.is_visited {
                continue;
            }
            if matches!(next.distance, Some(known) if known <= candidate) {
                continue;
            }

            next.distance = Some(candidate);
            next.previous = Some(current);
            sequence += 1;
            frontier.push(Reverse((candidate, sequence, neighbor)));
        }
    }

    debug!(
        "search from {start} to {finish}: {} cells visited, finish reached: {success}",
        visited_order.len()
    );

    Ok(SearchOutcome {
        visited_order,
        success,
        start,
        finish,
        grid,
    })
}

/// Rebuilds the path ending at `finish` by following predecessor links back to the start.
///
/// The result runs from the search start to `finish`. When `finish` has no predecessor and is not
/// the cell the search was seeded from (distance zero), it was never reached and the result is
/// empty rather than a partial path.
#[must_use]
pub fn reconstruct_path(grid: &Grid, finish: Position) -> Vec<Position> {
    let Some(cell) = grid.cell(finish) else {
        return Vec::new();
    };
    if cell.previous.is_none() && cell.distance != Some(0) {
        return Vec::new();
    }

    let mut path = vec![finish];
    let mut current = cell.previous;
    while let Some(position) = current {
        // A chain longer than the grid can only come from hand-edited cyclic links.
        if path.len() > grid.cells().len() {
            return Vec::new();
        }
        path.push(position);
        current = grid.cell(position).and_then(|cell| cell.previous);
    }
    path.reverse();

    path
}

/// Checks that both endpoints are usable before any traversal happens.
fn validate_endpoints(grid: &Grid, start: Position, finish: Position) -> Result<(), GridError> {
    for position in [start, finish] {
        if !grid.contains(position) {
            return Err(GridError::OutOfBounds {
                position,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        if grid.is_wall(position) {
            return Err(GridError::WallOnEndpoint(position));
        }
    }
    if start == finish {
        return Err(GridError::StartEqualsFinish(start));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates a grid with walls on the given cells.
    fn grid_with_walls(
        rows: usize,
        cols: usize,
        start: Position,
        finish: Position,
        walls: &[Position],
    ) -> Grid {
        let mut grid = Grid::new(rows, cols, start, finish).expect("valid grid");
        for wall in walls {
            grid = grid.toggle_wall(*wall).expect("wall should be in bounds");
        }
        grid
    }

    /// Searches between the grid's own start and finish.
    fn search(grid: &Grid) -> SearchOutcome {
        run_search(grid, grid.start(), grid.finish()).expect("search should run")
    }

    /// Returns the distance the search recorded for a cell.
    fn distance_of(outcome: &SearchOutcome, position: Position) -> Option<usize> {
        outcome
            .grid
            .cell(position)
            .and_then(|cell| cell.distance)
    }

    #[test]
    fn test_open_three_by_three_staircase() {
        let grid = grid_with_walls(3, 3, Position::new(0, 0), Position::new(2, 2), &[]);

        let outcome = search(&grid);

        assert!(outcome.success, "finish should be reached");
        assert_eq!(
            outcome.shortest_path(),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
        assert_eq!(outcome.visited_order.len(), 9);
        assert_eq!(outcome.visited_order.last(), Some(&Position::new(2, 2)));
    }

    #[test]
    fn test_blocked_column_is_unreachable() {
        let grid = grid_with_walls(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &[Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
        );

        let outcome = search(&grid);

        assert!(!outcome.success, "finish should be unreachable");
        assert!(outcome.shortest_path().is_empty());
        assert_eq!(
            outcome.visited_order,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
        for position in [Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)] {
            let cell = outcome.grid.cell(position).expect("cell should exist");
            assert!(!cell.is_visited, "unreachable cells are never visited");
            assert_eq!(cell.distance, None);
        }
    }

    #[test]
    fn test_walled_in_finish_has_no_path() {
        let finish = Position::new(2, 2);
        let grid = grid_with_walls(
            5,
            5,
            Position::new(0, 0),
            finish,
            &[
                Position::new(1, 2),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 3),
            ],
        );

        let outcome = search(&grid);

        assert!(!outcome.success);
        assert!(reconstruct_path(&outcome.grid, finish).is_empty());
        assert_eq!(outcome.visited_order.len(), 25 - 4 - 1);
    }

    #[test]
    fn test_open_grid_paths_match_manhattan_distance() {
        let pairs = [
            (Position::new(0, 0), Position::new(4, 6)),
            (Position::new(4, 6), Position::new(0, 0)),
            (Position::new(2, 3), Position::new(2, 4)),
            (Position::new(0, 6), Position::new(4, 0)),
            (Position::new(3, 1), Position::new(1, 5)),
        ];

        for (start, finish) in pairs {
            let grid = grid_with_walls(5, 7, start, finish, &[]);
            let outcome = search(&grid);
            let path = outcome.shortest_path();

            assert_eq!(
                path.len(),
                start.manhattan(finish) + 1,
                "path from {start} to {finish} should be as long as the manhattan distance"
            );
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&finish));
            for step in path.windows(2) {
                if let [from, to] = step {
                    assert_eq!(from.manhattan(*to), 1, "path steps must be adjacent");
                }
            }

            // Every cell strictly closer than the finish is explored before it.
            let finish_distance = start.manhattan(finish);
            for cell in outcome.grid.cells() {
                let layer = start.manhattan(cell.position);
                if layer < finish_distance {
                    assert!(cell.is_visited, "{} should be visited", cell.position);
                }
                if layer > finish_distance {
                    assert!(!cell.is_visited, "{} should not be visited", cell.position);
                }
            }
        }
    }

    #[test]
    fn test_search_routes_around_walls() {
        // 0 1 2 3
        // S # . F
        // . # . .
        // . . . .
        let grid = grid_with_walls(
            3,
            4,
            Position::new(0, 0),
            Position::new(0, 3),
            &[Position::new(0, 1), Position::new(1, 1)],
        );

        let outcome = search(&grid);
        let path = outcome.shortest_path();

        assert!(outcome.success);
        assert_eq!(path.len(), 8);
        assert!(path.iter().all(|position| !grid.is_wall(*position)));
        assert_eq!(distance_of(&outcome, Position::new(0, 3)), Some(7));
    }

    #[test]
    fn test_finish_ends_the_run() {
        let grid = grid_with_walls(
            6,
            6,
            Position::new(0, 0),
            Position::new(2, 1),
            &[Position::new(1, 1), Position::new(1, 2)],
        );

        let outcome = search(&grid);
        let finish_distance =
            distance_of(&outcome, Position::new(2, 1)).expect("finish should be reached");

        assert_eq!(outcome.visited_order.last(), Some(&Position::new(2, 1)));
        let mut previous = 0;
        for position in &outcome.visited_order {
            let distance = distance_of(&outcome, *position).expect("visited cells have distances");
            assert!(distance >= previous, "cells are finalized in distance order");
            assert!(distance <= finish_distance, "nothing beyond the finish is explored");
            previous = distance;
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let grid = grid_with_walls(
            8,
            8,
            Position::new(1, 1),
            Position::new(6, 5),
            &[
                Position::new(3, 0),
                Position::new(3, 1),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(5, 4),
                Position::new(5, 5),
                Position::new(5, 6),
            ],
        );

        let first = search(&grid);
        let second = search(&grid);

        assert_eq!(first.visited_order, second.visited_order);
        assert_eq!(first.shortest_path(), second.shortest_path());
    }

    #[test]
    fn test_search_ignores_stale_bookkeeping() {
        let grid = grid_with_walls(4, 4, Position::new(0, 0), Position::new(3, 3), &[]);
        let mut stale = grid.clone();
        if let Some(cell) = stale.cell_mut(Position::new(1, 1)) {
            cell.distance = Some(0);
            cell.is_visited = true;
            cell.previous = Some(Position::new(3, 3));
        }

        let clean = search(&grid);
        let dirty = search(&stale);

        assert_eq!(clean.visited_order, dirty.visited_order);
        assert_eq!(clean.shortest_path(), dirty.shortest_path());
    }

    #[test]
    fn test_search_leaves_input_untouched() {
        let grid = grid_with_walls(3, 3, Position::new(0, 0), Position::new(2, 2), &[]);
        let before = grid.clone();

        let _outcome = search(&grid);

        assert_eq!(grid, before);
    }

    #[test]
    fn test_search_rejects_bad_endpoints() {
        let grid = grid_with_walls(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &[Position::new(1, 1)],
        );

        assert_eq!(
            run_search(&grid, Position::new(1, 1), Position::new(2, 2)),
            Err(GridError::WallOnEndpoint(Position::new(1, 1)))
        );
        assert!(matches!(
            run_search(&grid, Position::new(0, 0), Position::new(9, 9)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(
            run_search(&grid, Position::new(0, 0), Position::new(0, 0)),
            Err(GridError::StartEqualsFinish(Position::new(0, 0)))
        );
    }

    #[test]
    fn test_reconstruct_path_from_start_is_the_start() {
        let grid = grid_with_walls(2, 2, Position::new(0, 0), Position::new(1, 1), &[]);
        let outcome = search(&grid);

        assert_eq!(outcome.start, Position::new(0, 0));
        assert_eq!(
            reconstruct_path(&outcome.grid, Position::new(0, 0)),
            vec![Position::new(0, 0)]
        );
        assert!(
            reconstruct_path(&grid, Position::new(0, 0)).is_empty(),
            "an unsearched grid holds no path"
        );
    }

    #[test]
    fn test_unreachable_flagged_start_has_no_path() {
        let grid = grid_with_walls(
            3,
            3,
            Position::new(0, 0),
            Position::new(2, 2),
            &[Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
        );

        let outcome = run_search(&grid, Position::new(2, 2), Position::new(0, 0))
            .expect("search should run");

        assert!(!outcome.success);
        assert_eq!(outcome.start, Position::new(2, 2));
        assert!(outcome.shortest_path().is_empty());
        assert_eq!(
            reconstruct_path(&outcome.grid, Position::new(2, 2)),
            vec![Position::new(2, 2)]
        );
    }

    #[test]
    fn test_swapped_endpoints_find_reverse_path() {
        let grid = grid_with_walls(3, 3, Position::new(0, 0), Position::new(2, 2), &[]);

        let outcome = run_search(&grid, Position::new(2, 2), Position::new(0, 0))
            .expect("search should run");
        let path = outcome.shortest_path();

        assert!(outcome.success);
        assert_eq!(path.first(), Some(&Position::new(2, 2)));
        assert_eq!(path.last(), Some(&Position::new(0, 0)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_reconstruct_path_out_of_bounds_is_empty() {
        let grid = grid_with_walls(2, 2, Position::new(0, 0), Position::new(1, 1), &[]);

        assert!(reconstruct_path(&grid, Position::new(4, 4)).is_empty());
    }

    #[test]
    fn test_reconstruct_path_rejects_cycles() {
        let mut grid = grid_with_walls(2, 2, Position::new(0, 0), Position::new(1, 1), &[]);
        if let Some(cell) = grid.cell_mut(Position::new(1, 1)) {
            cell.previous = Some(Position::new(1, 0));
        }
        if let Some(cell) = grid.cell_mut(Position::new(1, 0)) {
            cell.previous = Some(Position::new(1, 1));
        }

        assert!(reconstruct_path(&grid, Position::new(1, 1)).is_empty());
    }

    #[test]
    fn test_reference_configuration() {
        let grid = grid_with_walls(20, 50, Position::new(10, 15), Position::new(10, 35), &[]);

        let outcome = search(&grid);

        assert!(outcome.success);
        assert_eq!(outcome.shortest_path().len(), 21);
    }
}
