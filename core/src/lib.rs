pub mod chat_link;
pub mod codes;
pub mod library;
pub mod settings;
pub mod source;
pub mod template;

// Re-exports for convenience
pub use chat_link::{DecodeError, DecodeOptions, DecodedTemplate, decode, decode_with};
pub use codes::*;
pub use library::{BuildLibrary, LIBRARY_FILE_NAME, LIBRARY_FORMAT_VERSION, PersistenceError};
pub use source::PayloadSource;
pub use template::{BuildTemplate, SpecializationSlot};
