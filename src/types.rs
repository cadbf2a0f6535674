//! Type definitions and enums for the application state and navigation.

use std::time::Duration;

use crate::animation::FrameDelays;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen. This is used to determine which
/// screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    OptionsMenu(OptionsMenuItem),
    /// Grid editor and search playback screen.
    ///
    /// This variant represents the screen where walls are drawn and the search is animated.
    InGame,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Visualize" menu option, opening the grid editor.
    Visualize,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// Animation speed preset, cycled on selection.
    Speed,
    /// "Back" navigation option.
    Back,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration, holding its number of entries.
    MainMenu(u8),
    /// Options menu configuration, holding its number of entries.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the display name of the menu, used as the title in its border.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the number of entries in the menu, used to size its container.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

/// Lifecycle of one editing and playback session.
///
/// Walls can only be edited while the session is idle. Running a search moves it to `Running`
/// until the playback has revealed every frame, and only a reset brings it back to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Session {
    /// The grid is editable and no search has been run.
    Idle,
    /// A search playback is in progress.
    Running,
    /// The playback has finished; the grid stays locked until reset.
    Completed,
}

impl Session {
    /// Tells whether walls may be toggled in this state.
    pub(crate) const fn allows_edits(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Tells whether a new search may be started in this state.
    pub(crate) const fn allows_search(self) -> bool {
        matches!(self, Self::Idle | Self::Completed)
    }

    /// Returns the label shown in the status line.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::Idle => "editing",
            Self::Running => "searching",
            Self::Completed => "done",
        }
    }
}

/// Animation speed presets offered in the options menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Speed {
    /// Four times the configured delays.
    Slow,
    /// The configured delays.
    Normal,
    /// A quarter of the configured delays.
    Fast,
}

impl Speed {
    /// Returns the preset selected after this one.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Slow => Self::Normal,
            Self::Normal => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }

    /// Returns the label shown in the options menu.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::Slow => "Speed: Slow",
            Self::Normal => "Speed: Normal",
            Self::Fast => "Speed: Fast",
        }
    }

    /// Scales a set of base delays by this preset.
    pub(crate) fn scale(self, base: FrameDelays) -> FrameDelays {
        let scale = |delay: Duration| match self {
            Self::Slow => delay.saturating_mul(4),
            Self::Normal => delay,
            Self::Fast => delay / 4,
        };

        FrameDelays {
            visited: scale(base.visited),
            path: scale(base.path),
        }
    }
}
