//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::Position,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen, Session},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::OptionsMenu(item) => options_menu(app, frame, item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the selected one.
fn menu_entries(frame: &mut Frame, layout: &[Rect], entries: &[(&str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (area, (label, active)) in layout.iter().zip(entries) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(*label).centered().style(style), *area);
    }
}

/// Renders the main menu screen with navigation options.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    menu_entries(
        frame,
        &inner_layout,
        &[
            ("Visualize", item == MainMenuItem::Visualize),
            ("Options", item == MainMenuItem::Options),
            ("Quit", item == MainMenuItem::Quit),
        ],
    );
}

/// Renders the options menu screen with the speed preset and the way back.
pub(crate) fn options_menu(app: &App, frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));

    menu_entries(
        frame,
        &inner_layout,
        &[
            (app.speed.repr(), item == OptionsMenuItem::Speed),
            ("Return", item == OptionsMenuItem::Back),
        ],
    );
}

/// Transforms grid positions into canvas coordinates.
///
/// Columns map straight onto the x axis. Rows are flipped because the canvas y axis grows upwards:
/// row `i` of an `n`-row grid lands on `y = n - 1 - i`.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_grid_to_canvas_coords(
    positions: &[Position],
    rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let top = rows
        .checked_sub(1)
        .ok_or_eyre("cannot place cells on a grid without rows")?;

    positions
        .iter()
        .map(|position| {
            let flipped = top
                .checked_sub(position.row)
                .ok_or_eyre("position lies below the last grid row")?;
            let canvas_x = f64::from(u32::try_from(position.col)?);
            let canvas_y = f64::from(u32::try_from(flipped)?);

            Ok((canvas_x, canvas_y))
        })
        .collect()
}

/// Builds the status line shown under the grid.
///
/// The counters mirror what has been revealed so far rather than the final totals, so they grow
/// along with the playback.
pub(crate) fn status_line(app: &App) -> String {
    let outcome = match (app.session, app.last_success) {
        (Session::Completed, Some(false)) => " / no path to the finish",
        _ => "",
    };

    format!(
        "shortest path: {} / visited nodes: {} / walls: {} / {}{}",
        app.animation_manager.path().len(),
        app.animation_manager.visited().len(),
        app.grid.wall_count(),
        app.session.repr(),
        outcome
    )
}

/// Renders the in-game screen with the grid editor and the search playback.
///
/// This function draws the grid on a [`Canvas`] with one layer per kind of cell, so later layers
/// (the path over the visited cells, the endpoints and the cursor over everything) win where they
/// overlap. The area the grid lands in is stored back into the [`App`] for mouse hit-testing.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion operations.
pub(crate) fn in_game(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let rows = app.grid.rows();
    let cols = app.grid.cols();

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Grid and padding area
        Constraint::Length(1), // Status line
        Constraint::Length(1), // Tooltip
    ])
    .split(frame.area());

    let grid_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get grid content area from layout")?;
    let status_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get status area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let grid_area = Layout::vertical([Constraint::Length(u16::try_from(rows)?)])
        .flex(Flex::Center)
        .split(grid_content_area)
        .first()
        .copied()
        .ok_or_eyre("failed to get grid rows from layout")?;
    let space = Layout::horizontal([Constraint::Length(u16::try_from(cols)?)])
        .flex(Flex::Center)
        .split(grid_area)
        .first()
        .copied()
        .ok_or_eyre("failed to get grid space from horizontal layout")?;
    app.grid_area = space;

    // Pre-compute canvas coordinates to handle errors before closures
    let walls: Vec<Position> = app
        .grid
        .cells()
        .iter()
        .filter(|cell| cell.is_wall)
        .map(|cell| cell.position)
        .collect();
    let wall_coords = transform_grid_to_canvas_coords(&walls, rows)?;
    let visited_coords = transform_grid_to_canvas_coords(app.animation_manager.visited(), rows)?;
    let path_coords = transform_grid_to_canvas_coords(app.animation_manager.path(), rows)?;
    let start_coords = transform_grid_to_canvas_coords(&[app.grid.start()], rows)?;
    let finish_coords = transform_grid_to_canvas_coords(&[app.grid.finish()], rows)?;
    let cursor_coords = if app.session.allows_edits() {
        transform_grid_to_canvas_coords(&[app.cursor], rows)?
    } else {
        Vec::new()
    };

    // A single-cell axis would collapse the bounds to zero width, which the canvas cannot map.
    let x_max = f64::from(u32::try_from(cols.max(2) - 1)?);
    let y_max = f64::from(u32::try_from(rows.max(2) - 1)?);

    let canvas = Canvas::default()
        .x_bounds([0.0, x_max])
        .y_bounds([0.0, y_max])
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &visited_coords,
                color: Color::Cyan,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &path_coords,
                color: Color::Yellow,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &start_coords,
                color: Color::LightGreen,
            });
            ctx.draw(&Points {
                coords: &finish_coords,
                color: Color::Red,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &cursor_coords,
                color: Color::White,
            });
        });

    frame.render_widget(canvas, space);

    frame.render_widget(
        Line::raw(status_line(app))
            .centered()
            .style(Style::default().fg(Color::Green)),
        status_area,
    );

    let tooltip = if app.grid_fits_area() {
        "(space) wall / (v) visualize / (s) skip / (r) reset / (esc) menu / (q) quit"
    } else {
        "terminal too small for mouse edits"
    };
    let tooltip_block = Block::bordered()
        .title(tooltip)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}
