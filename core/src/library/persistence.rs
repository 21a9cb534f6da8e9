//! Library file reading and writing
//!
//! The library file is a flat XML document:
//!
//! ```text
//! <BuildTemplates Version="2" WindowState="Normal" Width=".." Height=".." Left=".." Top="..">
//!   <BuildTemplate Index="0" Name="Power DH" BuildData="[&amp;DQEq...]"/>
//! </BuildTemplates>
//! ```
//!
//! Every attribute is read as text and interpreted by the library, so a single
//! bad value skips that value (or that template) instead of failing the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Name of the root element every library file starts with
pub(crate) const ROOT_ELEMENT: &str = "BuildTemplates";

// ─────────────────────────────────────────────────────────────────────────────
// XML Document Types
// ─────────────────────────────────────────────────────────────────────────────

/// Root `<BuildTemplates>` element
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "BuildTemplates")]
pub(crate) struct LibraryDocument {
    #[serde(rename = "@Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "@WindowState", default, skip_serializing_if = "Option::is_none")]
    pub window_state: Option<String>,
    #[serde(rename = "@Width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(rename = "@Height", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(rename = "@Left", default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(rename = "@Top", default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(rename = "BuildTemplate", default)]
    pub templates: Vec<TemplateElement>,
}

/// One `<BuildTemplate>` element
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct TemplateElement {
    #[serde(rename = "@Index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "@Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@BuildData", default, skip_serializing_if = "Option::is_none")]
    pub build_data: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: quick_xml::DeError,
    },

    #[error("{path:?} is not a build library (root element <{found}>)")]
    UnexpectedRoot { path: PathBuf, found: String },

    #[error("serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: quick_xml::SeError,
    },
}

impl PersistenceError {
    /// True when the file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Read / Write
// ─────────────────────────────────────────────────────────────────────────────

/// Read and parse a library file
pub(crate) fn read_document(path: &Path) -> Result<LibraryDocument, PersistenceError> {
    let contents = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // The deserializer accepts any root element name
    if let Some(found) = root_element(&contents).filter(|name| name != ROOT_ELEMENT) {
        return Err(PersistenceError::UnexpectedRoot {
            path: path.to_path_buf(),
            found,
        });
    }

    from_str(&contents).map_err(|e| PersistenceError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Name of the first element in `contents`, `None` if there is none or the
/// prolog is unreadable (left for the deserializer to report)
fn root_element(contents: &str) -> Option<String> {
    let mut reader = Reader::from_str(contents);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start) | Event::Empty(start)) => {
                return Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

/// Serialize a library document with the XML declaration and indentation
pub(crate) fn to_xml(document: &LibraryDocument) -> Result<String, quick_xml::SeError> {
    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;

    Ok(format!("{XML_DECLARATION}{body}\n"))
}

/// Write a library file.
///
/// The document goes to a sibling temporary file first and is then renamed
/// over `path`, so readers never observe a partially written library.
pub(crate) fn write_document(path: &Path, document: &LibraryDocument) -> Result<(), PersistenceError> {
    let contents = to_xml(document).map_err(|e| PersistenceError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    let io_error = |source: io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = fs::write(&temp_path, contents).and_then(|()| fs::rename(&temp_path, path)) {
        // Best effort, the temporary file may not exist
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(e));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attributes_and_children() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<BuildTemplates Version="2" WindowState="Maximized" Width="1024.5" Height="768" Left="-8" Top="0">
  <BuildTemplate Index="3" Name="Zerk &amp; Co" BuildData="[&amp;DQ==]" />
  <BuildTemplate Index="x" BuildData="[&amp;AA==]" />
</BuildTemplates>"#;

        let doc: LibraryDocument = from_str(xml).unwrap();
        assert_eq!(doc.version.as_deref(), Some("2"));
        assert_eq!(doc.window_state.as_deref(), Some("Maximized"));
        assert_eq!(doc.width.as_deref(), Some("1024.5"));
        assert_eq!(doc.templates.len(), 2);
        assert_eq!(doc.templates[0].index.as_deref(), Some("3"));
        assert_eq!(doc.templates[0].name.as_deref(), Some("Zerk & Co"));
        assert_eq!(doc.templates[0].build_data.as_deref(), Some("[&DQ==]"));
        assert_eq!(doc.templates[1].name, None);
    }

    #[test]
    fn parses_legacy_root_without_attributes() {
        let doc: LibraryDocument = from_str("<BuildTemplates></BuildTemplates>").unwrap();
        assert!(doc.version.is_none());
        assert!(doc.window_state.is_none());
        assert!(doc.templates.is_empty());
    }

    #[test]
    fn writes_attributes_and_escapes_data() {
        let doc = LibraryDocument {
            version: Some("2".to_string()),
            templates: vec![TemplateElement {
                index: Some("0".to_string()),
                name: None,
                build_data: Some("[&DQ==]".to_string()),
            }],
            ..Default::default()
        };

        let xml = to_xml(&doc).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"Version="2""#));
        assert!(xml.contains(r#"BuildData="[&amp;DQ==]""#));
        assert!(!xml.contains("Name="));
        assert!(!xml.contains("Width="));
    }

    #[test]
    fn root_element_skips_prolog() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- saved by hand -->\n<BuildTemplates/>";
        assert_eq!(root_element(xml).as_deref(), Some(ROOT_ELEMENT));
        assert_eq!(root_element("<html><body/></html>").as_deref(), Some("html"));
        assert_eq!(root_element(""), None);
    }

    #[test]
    fn foreign_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.xml");
        fs::write(&path, "<html><body>not a library</body></html>").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::UnexpectedRoot { ref found, .. } if found == "html"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let path = Path::new("/data/BuildLibrary.xml");
        assert_eq!(temp_path_for(path), PathBuf::from("/data/BuildLibrary.xml.tmp"));
    }
}
