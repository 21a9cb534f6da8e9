use std::path::{Path, PathBuf};

use gw2bl_core::settings::{self, LibrarySettings};
use gw2bl_core::{BuildLibrary, BuildTemplate, DecodeOptions, Profession, decode_with};

use crate::source::{ArgumentSource, StdinSource};

/// Load the library at `path`. A missing file gives an empty library; any
/// other failure is an error so the file is never saved over.
pub fn open_library(path: &Path, options: DecodeOptions, include_layout: bool) -> Result<BuildLibrary, String> {
    let mut library = BuildLibrary::with_decode_options(options);

    match library.try_load(path, include_layout) {
        Ok(()) => Ok(library),
        Err(e) if e.is_not_found() => {
            tracing::info!(path = %path.display(), "Starting a new build library");
            Ok(library)
        }
        Err(e) => Err(format!("Cannot read build library, leaving it untouched: {e}")),
    }
}

// Every command below returns whether the library changed and needs saving.

pub fn list(library: &BuildLibrary, filter: Option<Profession>) -> Result<bool, String> {
    let mut templates: Vec<&BuildTemplate> = match filter {
        Some(profession) => library.get_all(profession).collect(),
        None => library.values().collect(),
    };
    templates.sort_by_key(|t| t.index());

    if templates.is_empty() {
        println!("No build templates");
        return Ok(false);
    }

    for template in templates {
        println!("{}", summary_line(template));
    }
    Ok(false)
}

pub fn show(library: &BuildLibrary, index: i32) -> Result<bool, String> {
    let template = library
        .get(index)
        .ok_or_else(|| format!("No template at index {index}"))?;

    println!("{}", summary_line(template));
    println!("  Code: {}", template.build_data());
    for (i, slot) in template.slots().iter().enumerate() {
        println!("  Slot {}: {slot}", i + 1);
    }
    Ok(false)
}

/// Add a template from `code`, or from stdin when no code is given
pub fn add(library: &mut BuildLibrary, index: Option<i32>, code: Option<String>) -> Result<bool, String> {
    let index = match index {
        Some(index) => index,
        None => library
            .next_free_index()
            .ok_or("No free template index left, pass --index")?,
    };

    let created = match code {
        Some(code) => library.create_from(index, &mut ArgumentSource::new(code)),
        None => library.create_from(index, &mut StdinSource),
    };
    if !created {
        return Err(format!("Not a build template code, nothing stored at index {index}"));
    }

    if let Some(template) = library.get(index) {
        println!("Stored {}", summary_line(template));
    }
    Ok(true)
}

pub fn remove(library: &mut BuildLibrary, index: i32) -> Result<bool, String> {
    if library.get(index).is_none() {
        println!("No template at index {index}");
        return Ok(false);
    }

    library.delete(index);
    println!("Removed template {index}");
    Ok(true)
}

pub fn rename(library: &mut BuildLibrary, index: i32, name: &str) -> Result<bool, String> {
    if library.get(index).is_none() {
        return Err(format!("No template at index {index}"));
    }
    Ok(library.set_name(index, name))
}

pub fn import(library: &mut BuildLibrary, path: &Path) -> Result<bool, String> {
    let count = library
        .merge(path)
        .ok_or_else(|| format!("Could not read build library {}", path.display()))?;

    println!("Imported {count} templates from {}", path.display());
    Ok(count > 0)
}

/// Write the templates to `path` without any window layout
pub fn export(library: &BuildLibrary, path: &Path) -> Result<bool, String> {
    if !library.save(path, false) {
        return Err(format!("Could not write {}", path.display()));
    }

    println!("Exported {} templates to {}", library.len(), path.display());
    Ok(false)
}

pub fn decode(code: &str, options: DecodeOptions) -> Result<bool, String> {
    let decoded = decode_with(code.trim(), options).map_err(|e| e.to_string())?;

    println!("Profession: {}", decoded.profession);
    for (i, slot) in decoded.slots.iter().enumerate() {
        println!("Slot {}: {slot}", i + 1);
    }
    Ok(false)
}

/// Print the settings, storing `library` as the default library file first
pub fn config(current: &mut LibrarySettings, library: Option<PathBuf>) -> Result<(), String> {
    if let Some(path) = library {
        current.library_path = Some(path);
        settings::store_settings(current).map_err(|e| e.to_string())?;
    }

    println!("Library file: {}", settings::library_path(current).display());
    println!("Save window state: {}", current.save_window_state);
    if !current.profession_filter.is_empty() {
        println!("Profession filter: {}", current.profession_filter);
    }
    Ok(())
}

/// Parse a profession filter; an empty name means no filter
pub fn parse_profession(name: &str) -> Result<Option<Profession>, String> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    name.parse().map(Some).map_err(|e: gw2bl_core::UnknownProfession| e.to_string())
}

fn summary_line(template: &BuildTemplate) -> String {
    format!(
        "{:>4}  {:<14} {}",
        template.index(),
        template.profession().to_string(),
        template.display_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARDIAN: &str = "[&DQE+AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=]";
    const WEAVER: &str = "[&DQYfJykVODkAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=]";

    fn library() -> BuildLibrary {
        let mut library = BuildLibrary::new();
        assert!(library.create(0, GUARDIAN));
        assert!(library.create(4, WEAVER));
        library
    }

    #[test]
    fn add_uses_next_free_index() {
        let mut library = library();
        assert_eq!(add(&mut library, None, Some(format!("  {GUARDIAN}\n"))), Ok(true));
        assert_eq!(library.get(5).unwrap().profession(), Profession::GUARDIAN);
    }

    #[test]
    fn add_without_index_fails_when_slots_run_out() {
        let mut library = library();
        assert!(library.create(i32::MAX, WEAVER));
        assert!(add(&mut library, None, Some(GUARDIAN.to_string())).is_err());
        assert_eq!(library.get(i32::MAX).unwrap().profession(), Profession::WEAVER);
    }

    #[test]
    fn add_rejects_bad_code() {
        let mut library = library();
        assert!(add(&mut library, Some(9), Some("hello".to_string())).is_err());
        assert!(library.get(9).is_none());
    }

    #[test]
    fn remove_reports_missing_index() {
        let mut library = library();
        assert_eq!(remove(&mut library, 2), Ok(false));
        assert_eq!(remove(&mut library, 4), Ok(true));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn rename_reports_change() {
        let mut library = library();
        assert_eq!(rename(&mut library, 4, "Fresh Air"), Ok(true));
        assert_eq!(rename(&mut library, 4, "Fresh Air"), Ok(false));
        assert!(rename(&mut library, 8, "Nobody").is_err());
    }

    #[test]
    fn profession_filter_parsing() {
        assert_eq!(parse_profession(""), Ok(None));
        assert_eq!(parse_profession("weaver"), Ok(Some(Profession::WEAVER)));
        assert!(parse_profession("Paladin").is_err());
    }

    #[test]
    fn summary_line_shows_profession_and_name() {
        let library = library();
        let line = summary_line(library.get(4).unwrap());
        assert!(line.contains("Weaver"));
        assert!(line.ends_with("Weaver Build"));
    }

    #[test]
    fn decode_reports_errors() {
        assert_eq!(decode(WEAVER, DecodeOptions::default()), Ok(false));
        assert!(decode("[&AAAA]", DecodeOptions::default()).is_err());
    }

    #[test]
    fn open_library_starts_empty_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let library = open_library(&dir.path().join("new.xml"), DecodeOptions::default(), true).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn unreadable_library_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.xml");
        let contents = format!(
            "<BuildTemplates Version=\"2\">\n  <BuildTemplate Index=\"0\" Name=\"My main\" BuildData=\"{}\" />\n  <BuildTemplate Index=\"1\"",
            GUARDIAN.replace('&', "&amp;")
        );
        std::fs::write(&path, &contents).unwrap();

        assert!(open_library(&path, DecodeOptions::default(), true).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);

        std::fs::write(&path, "<html><body>not a library</body></html>").unwrap();
        assert!(open_library(&path, DecodeOptions::default(), true).is_err());
    }

    #[test]
    fn open_library_reads_saved_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.xml");
        assert!(library().save(&path, true));

        let reopened = open_library(&path, DecodeOptions::default(), true).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get(4).unwrap().profession(), Profession::WEAVER);
    }

    #[test]
    fn export_then_import_copies_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xml");
        assert_eq!(export(&library(), &path), Ok(false));

        let mut other = BuildLibrary::new();
        assert_eq!(import(&mut other, &path), Ok(true));
        assert_eq!(other.len(), 2);
        assert!(import(&mut other, &dir.path().join("missing.xml")).is_err());
    }
}
