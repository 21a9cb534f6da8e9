//! The build template library
//!
//! Owns every stored [`BuildTemplate`], keyed by slot index, and the window
//! layout carried through the library file. Persistence is best effort:
//! failures are logged and leave the in-memory library untouched.

mod persistence;


use std::path::Path;

use gw2bl_types::{WindowLayout, WindowState};
use hashbrown::HashMap;
use tracing::{debug, error, info, warn};

use crate::chat_link::DecodeOptions;
use crate::codes::Profession;
use crate::source::PayloadSource;
use crate::template::BuildTemplate;

pub use persistence::PersistenceError;
use persistence::{LibraryDocument, TemplateElement};

/// Library file version written by this crate.
///
/// Version 1 files never carried the tag; they are read the same way.
pub const LIBRARY_FORMAT_VERSION: u32 = 2;

/// Version assumed when the tag is missing or unreadable
const DEFAULT_FORMAT_VERSION: u32 = 1;

/// Default library file name
pub const LIBRARY_FILE_NAME: &str = "BuildLibrary.xml";

#[derive(Debug, Clone)]
pub struct BuildLibrary {
    templates: HashMap<i32, BuildTemplate>,
    layout: WindowLayout,
    /// Version of the last file loaded
    version: u32,
    decode_options: DecodeOptions,
}

impl Default for BuildLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildLibrary {
    pub fn new() -> Self {
        Self::with_decode_options(DecodeOptions::default())
    }

    pub fn with_decode_options(decode_options: DecodeOptions) -> Self {
        Self {
            templates: HashMap::new(),
            layout: WindowLayout::default(),
            version: LIBRARY_FORMAT_VERSION,
            decode_options,
        }
    }

    // --- Templates ---

    /// Store a template decoded from `raw` at `index`, replacing whatever was
    /// there. Returns false (and stores nothing) if the chat link is rejected.
    pub fn create(&mut self, index: i32, raw: &str) -> bool {
        if index < 0 {
            debug!(index, "Refusing template with negative index");
            return false;
        }

        match BuildTemplate::from_chat_link(index, raw, self.decode_options) {
            Ok(template) => {
                if self.templates.insert(index, template).is_some() {
                    debug!(index, "Replaced existing template");
                }
                true
            }
            Err(e) => {
                debug!(index, error = %e, "Rejected build template");
                false
            }
        }
    }

    /// Create a template from whatever the payload source currently holds
    pub fn create_from(&mut self, index: i32, source: &mut impl PayloadSource) -> bool {
        match source.fetch() {
            Some(raw) => self.create(index, raw.trim()),
            None => false,
        }
    }

    pub fn delete(&mut self, index: i32) {
        self.templates.remove(&index);
    }

    pub fn get(&self, index: i32) -> Option<&BuildTemplate> {
        self.templates.get(&index)
    }

    /// Templates of `profession` or of any profession sharing its base.
    ///
    /// [`Profession::NONE`] only matches templates whose profession is
    /// itself undefined; use [`BuildLibrary::values`] to list everything.
    pub fn get_all(&self, profession: Profession) -> impl Iterator<Item = &BuildTemplate> {
        self.templates
            .values()
            .filter(move |t| t.profession() == profession || t.profession().is_based_on(profession))
    }

    /// Every stored template, in no particular order
    pub fn values(&self) -> impl Iterator<Item = &BuildTemplate> {
        self.templates.values()
    }

    /// Rename the template at `index`. Returns true if a name changed.
    pub fn set_name(&mut self, index: i32, name: &str) -> bool {
        self.templates
            .get_mut(&index)
            .is_some_and(|template| template.set_name(name))
    }

    /// First index after the highest one in use (0 for an empty library).
    /// `None` once a template occupies `i32::MAX`.
    pub fn next_free_index(&self) -> Option<i32> {
        match self.templates.keys().max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    // --- Layout ---

    pub fn window_layout(&self) -> WindowLayout {
        self.layout
    }

    /// Record the presentation layer's window placement for the next save
    pub fn update_window_layout(&mut self, layout: WindowLayout) {
        self.layout = layout;
    }

    /// Format version of the last loaded file
    pub fn version(&self) -> u32 {
        self.version
    }

    // --- Persistence ---

    /// Replace the library with the contents of `location`.
    ///
    /// Templates that no longer decode are dropped. If the file cannot be
    /// read or parsed nothing changes and false is returned.
    pub fn load(&mut self, location: &Path, include_layout: bool) -> bool {
        match self.try_load(location, include_layout) {
            Ok(()) => true,
            Err(e) => {
                log_read_failure(location, &e);
                false
            }
        }
    }

    /// Like [`BuildLibrary::load`], but hands back the failure so callers
    /// can tell a missing file from one they must not overwrite
    pub fn try_load(&mut self, location: &Path, include_layout: bool) -> Result<(), PersistenceError> {
        let document = persistence::read_document(location)?;

        let version = parse_version(document.version.as_deref());
        if include_layout {
            apply_layout(&mut self.layout, &document);
        }
        let templates = self.decode_elements(document.templates);

        info!(
            path = %location.display(),
            version,
            count = templates.len(),
            "Loaded build library"
        );
        self.version = version;
        self.templates = templates;
        Ok(())
    }

    /// Add the templates stored at `location` to this library, replacing
    /// templates with the same index. Returns how many were imported, or
    /// `None` if the file could not be read.
    pub fn merge(&mut self, location: &Path) -> Option<usize> {
        let document = match persistence::read_document(location) {
            Ok(document) => document,
            Err(e) => {
                log_read_failure(location, &e);
                return None;
            }
        };

        let imported = self.decode_elements(document.templates);
        let count = imported.len();
        self.templates.extend(imported);

        info!(path = %location.display(), count, "Imported build templates");
        Some(count)
    }

    /// Write every valid template (and optionally the layout) to `location`.
    /// Returns false if the file could not be written.
    pub fn save(&self, location: &Path, include_layout: bool) -> bool {
        let document = self.to_document(include_layout);
        let count = document.templates.len();

        match persistence::write_document(location, &document) {
            Ok(()) => {
                debug!(path = %location.display(), count, "Saved build library");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to save build library");
                false
            }
        }
    }

    fn decode_elements(&self, elements: Vec<TemplateElement>) -> HashMap<i32, BuildTemplate> {
        let mut templates = HashMap::with_capacity(elements.len());

        for element in elements {
            let Some(index) = element.index.as_deref().and_then(|i| i.trim().parse::<i32>().ok())
            else {
                warn!(index = ?element.index, "Skipping stored template without a usable index");
                continue;
            };
            let build_data = element.build_data.unwrap_or_default();

            match BuildTemplate::from_chat_link(index, &build_data, self.decode_options) {
                Ok(mut template) if template.is_valid() => {
                    if let Some(name) = element.name {
                        template.set_name(&name);
                    }
                    templates.insert(index, template);
                }
                Ok(_) => warn!(index, "Skipping stored template with invalid index"),
                Err(e) => warn!(index, error = %e, "Skipping stored template that no longer decodes"),
            }
        }

        templates
    }

    fn to_document(&self, include_layout: bool) -> LibraryDocument {
        let mut valid: Vec<&BuildTemplate> = self.values().filter(|t| t.is_valid()).collect();
        valid.sort_by_key(|t| t.index());

        let templates = valid
            .into_iter()
            .map(|t| TemplateElement {
                index: Some(t.index().to_string()),
                name: (!t.name().is_empty()).then(|| t.name().to_string()),
                build_data: Some(t.build_data().to_string()),
            })
            .collect();

        let mut document = LibraryDocument {
            version: Some(LIBRARY_FORMAT_VERSION.to_string()),
            templates,
            ..Default::default()
        };

        if include_layout {
            document.window_state = Some(self.layout.state.to_string());
            document.width = Some(self.layout.width.to_string());
            document.height = Some(self.layout.height.to_string());
            document.left = Some(self.layout.left.to_string());
            document.top = Some(self.layout.top.to_string());
        }

        document
    }
}

fn parse_version(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_FORMAT_VERSION)
}

/// Copy every layout attribute that parses; unreadable ones keep their value
fn apply_layout(layout: &mut WindowLayout, document: &LibraryDocument) {
    if let Some(state) = document
        .window_state
        .as_deref()
        .and_then(|s| s.parse::<WindowState>().ok())
    {
        layout.state = state;
    }

    let fields = [
        (&document.width, &mut layout.width),
        (&document.height, &mut layout.height),
        (&document.left, &mut layout.left),
        (&document.top, &mut layout.top),
    ];
    for (raw, value) in fields {
        if let Some(parsed) = raw.as_deref().and_then(|v| v.trim().parse::<f64>().ok()) {
            *value = parsed;
        }
    }
}

fn log_read_failure(location: &Path, error: &PersistenceError) {
    if error.is_not_found() {
        info!(path = %location.display(), "No build library file yet");
    } else {
        warn!(error = %error, "Failed to read build library");
    }
}
