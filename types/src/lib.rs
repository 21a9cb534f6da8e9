//! Shared configuration types for the build library.
//!
//! These types are persisted either by `confy` (settings) or as attributes on
//! the library file root (window layout), so they only carry plain data.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Window Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Window state of the presentation layer, stored by name in the library file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl WindowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Minimized => "Minimized",
            Self::Maximized => "Maximized",
        }
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a window state name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWindowState(pub String);

impl fmt::Display for UnknownWindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown window state: {:?}", self.0)
    }
}

impl std::error::Error for UnknownWindowState {}

impl FromStr for WindowState {
    type Err = UnknownWindowState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Self::Normal),
            "Minimized" => Ok(Self::Minimized),
            "Maximized" => Ok(Self::Maximized),
            other => Err(UnknownWindowState(other.to_string())),
        }
    }
}

/// Window placement handed over by the presentation layer before shutdown.
///
/// The library never interprets these numbers, it only carries them through
/// the library file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowLayout {
    pub state: WindowState,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User settings for the library front-ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Library file location (None = `BuildLibrary.xml` next to the settings)
    pub library_path: Option<PathBuf>,

    /// Store the window layout together with the templates
    pub save_window_state: bool,

    /// Profession name used to filter listings (empty = show everything)
    pub profession_filter: String,

    pub overlay_mode: bool,
    pub full_screen_mode: bool,
    /// Close the presentation layer right after a template was picked
    pub quick_mode: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            library_path: None,
            save_window_state: true,
            profession_filter: String::new(),
            overlay_mode: false,
            full_screen_mode: false,
            quick_mode: false,
        }
    }
}
