//! Event handling functions for user input and application state updates.

use color_eyre::eyre::Result;
use log::debug;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard and mouse events and dispatches them to the handler for the
/// current screen. The poll timeout doubles as the playback tick, so a running search keeps
/// advancing while the user is idle.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(app.config.tick_rate())? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_events(app, key.code)?,
            Event::Mouse(mouse) => handle_mouse_events(app, mouse),
            _ => {}
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.tick();
    }

    Ok(())
}

/// Dispatches a key press to the menu or the editor handlers.
pub(crate) fn handle_key_events(app: &mut App, code: KeyCode) -> Result<()> {
    if matches!(app.screen, Screen::InGame) {
        return handle_in_game_keys(app, code);
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => handle_j_events(app),
        KeyCode::Char('k') | KeyCode::Up => handle_k_events(app),
        KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app),
        KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation in menus.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Visualize) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Speed) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation in menus.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Visualize);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Speed);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection in menus.
///
/// Selecting the speed entry cycles through the presets in place instead of opening a screen.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Visualize) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Speed);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Speed) => {
            app.speed = app.speed.next();
            debug!("animation speed set to {:?}", app.speed);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Visualize);
        }
        Screen::InGame => {}
    }
}

/// Handles 'h' key press events for backward navigation in menus.
pub(crate) fn handle_h_events(app: &mut App) {
    if matches!(app.screen, Screen::OptionsMenu(_)) {
        app.screen = Screen::MainMenu(MainMenuItem::Options);
    }
}

/// Handles key presses on the editor screen.
///
/// Leaving the editor finishes a running playback at once, so the session is never left running
/// without a screen to tick it.
pub(crate) fn handle_in_game_keys(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Esc => {
            app.finish_playback();
            app.mouse_pressed = false;
            app.screen = Screen::MainMenu(MainMenuItem::Visualize);
        }
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1, 0),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1, 0),
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(0, -1),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(0, 1),
        KeyCode::Char(' ') => {
            let _ = app.toggle_wall(app.cursor);
        }
        KeyCode::Char('v') | KeyCode::Enter => app.visualize()?,
        KeyCode::Char('s') => app.finish_playback(),
        KeyCode::Char('r') => app.reset()?,
        _ => {}
    }

    Ok(())
}

/// Handles mouse input on the editor screen.
///
/// Pressing the left button toggles the cell under the pointer and starts a drag; every other cell
/// entered while the button is held is toggled once; releasing the button ends the drag.
pub(crate) fn handle_mouse_events(app: &mut App, mouse: MouseEvent) {
    if !matches!(app.screen, Screen::InGame) {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !app.session.allows_edits() {
                return;
            }
            if let Some(position) = app.cell_at(mouse.column, mouse.row) {
                app.mouse_pressed = true;
                app.last_dragged = Some(position);
                app.cursor = position;
                let _ = app.toggle_wall(position);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.mouse_pressed => {
            if let Some(position) = app.cell_at(mouse.column, mouse.row) {
                if app.last_dragged != Some(position) {
                    app.last_dragged = Some(position);
                    app.cursor = position;
                    let _ = app.toggle_wall(position);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.mouse_pressed = false;
            app.last_dragged = None;
        }
        _ => {}
    }
}
