//! User settings and default file locations
//!
//! Settings are stored with `confy` as TOML in the platform config directory;
//! the library file and logs live in the platform data directory.

use std::path::PathBuf;

pub use gw2bl_types::LibrarySettings;

use crate::library::LIBRARY_FILE_NAME;

/// Application name used for config and data directories
pub const APP_NAME: &str = "gw2bl";

/// Load settings, falling back to defaults if they are missing or unreadable
pub fn load_settings() -> LibrarySettings {
    match confy::load(APP_NAME, None) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load settings, using defaults");
            LibrarySettings::default()
        }
    }
}

pub fn store_settings(settings: &LibrarySettings) -> Result<(), confy::ConfyError> {
    confy::store(APP_NAME, None, settings)
}

/// Directory for the library file and logs
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_NAME))
}

/// Library file to use: the configured one, else `BuildLibrary.xml` in the
/// data directory, else in the working directory
pub fn library_path(settings: &LibrarySettings) -> PathBuf {
    if let Some(path) = &settings.library_path {
        return path.clone();
    }

    default_data_dir()
        .map(|dir| dir.join(LIBRARY_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LIBRARY_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_library_path_wins() {
        let settings = LibrarySettings {
            library_path: Some(PathBuf::from("/srv/builds.xml")),
            ..Default::default()
        };
        assert_eq!(library_path(&settings), PathBuf::from("/srv/builds.xml"));
    }

    #[test]
    fn default_library_path_uses_file_name() {
        let path = library_path(&LibrarySettings::default());
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LIBRARY_FILE_NAME));
    }
}
