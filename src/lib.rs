//! Terminal maze editor that animates a shortest-path search.
//!
//! Walls are drawn on a rectangular grid with the keyboard or the mouse, then a uniform-cost search
//! runs from the start cell to the finish cell. The cells it finalizes are replayed one frame at a
//! time, followed by the shortest path it found.
//!
//! The [`grid`] and [`pathfinding`] modules hold the model and the search and can be used without
//! the interface: build a [`grid::Grid`], toggle walls on it, hand it to
//! [`pathfinding::run_search`] and rebuild the path with [`pathfinding::reconstruct_path`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod animation;
mod app;
pub mod config;
mod events;
pub mod grid;
pub mod logger;
pub mod pathfinding;
mod types;
mod ui;

pub use app::App;
