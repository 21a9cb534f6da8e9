//! A single build template stored in the library

mod slot;

pub use slot::SpecializationSlot;

use crate::chat_link::{self, DecodeError, DecodeOptions};
use crate::codes::Profession;

/// A build template held in one library slot.
///
/// The derived fields (profession and slots) always match `build_data`; they
/// only change through [`BuildTemplate::set_build_data`]. Mutators report
/// whether anything changed so callers can refresh their view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTemplate {
    index: i32,
    name: String,
    build_data: String,
    profession: Profession,
    slots: [SpecializationSlot; 3],
}

impl Default for BuildTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTemplate {
    /// An unassigned, empty template (not valid until build data is set)
    pub fn new() -> Self {
        Self {
            index: -1,
            name: String::new(),
            build_data: String::new(),
            profession: Profession::NONE,
            slots: Default::default(),
        }
    }

    /// Build a template for `index` from a chat link
    pub fn from_chat_link(
        index: i32,
        raw: &str,
        options: DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let mut template = Self::new();
        template.set_build_data(index, raw, options)?;
        Ok(template)
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The chat link exactly as it was accepted
    pub fn build_data(&self) -> &str {
        &self.build_data
    }

    pub fn profession(&self) -> Profession {
        self.profession
    }

    pub fn slots(&self) -> &[SpecializationSlot; 3] {
        &self.slots
    }

    pub fn slot1(&self) -> &SpecializationSlot {
        &self.slots[0]
    }

    pub fn slot2(&self) -> &SpecializationSlot {
        &self.slots[1]
    }

    pub fn slot3(&self) -> &SpecializationSlot {
        &self.slots[2]
    }

    /// User label, or "<Profession> Build" when none was given
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{} Build", self.profession)
        } else {
            self.name.clone()
        }
    }

    /// Returns true if the name changed
    pub fn set_name(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_string();
        true
    }

    /// Replace the chat link and re-derive profession and slots.
    ///
    /// On error the template is left exactly as it was.
    pub fn set_build_data(
        &mut self,
        index: i32,
        raw: &str,
        options: DecodeOptions,
    ) -> Result<(), DecodeError> {
        let decoded = chat_link::decode_with(raw, options)?;

        self.index = index;
        self.build_data = raw.to_string();
        self.profession = decoded.profession;
        self.slots = decoded.slots;
        Ok(())
    }

    /// Only valid templates are stored, listed and saved
    pub fn is_valid(&self) -> bool {
        self.index >= 0 && !self.build_data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::Specialization;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    fn weaver_link() -> String {
        let mut bytes = [0u8; 44];
        bytes[..8].copy_from_slice(&[13, 6, 31, 0b10_01_11, 41, 0b01_01_01, 56, 0b11_10_01]);
        format!("[&{}]", STANDARD.encode(bytes))
    }

    #[test]
    fn new_template_is_invalid() {
        let template = BuildTemplate::new();
        assert_eq!(template.index(), -1);
        assert!(!template.is_valid());
    }

    #[test]
    fn from_chat_link_derives_fields() {
        let template = BuildTemplate::from_chat_link(4, &weaver_link(), DecodeOptions::default())
            .unwrap();

        assert!(template.is_valid());
        assert_eq!(template.index(), 4);
        assert_eq!(template.build_data(), weaver_link());
        assert_eq!(template.profession(), Profession::WEAVER);
        assert_eq!(template.slot1().specialization, Specialization::Fire);
        assert_eq!(template.slot1().traits, [3, 1, 2]);
        assert_eq!(template.slot2().specialization, Specialization::Air);
        assert_eq!(template.slot3().specialization, Specialization::Weaver);
        assert_eq!(template.slot3().traits, [1, 2, 3]);
    }

    #[test]
    fn display_name_falls_back_to_profession() {
        let mut template =
            BuildTemplate::from_chat_link(0, &weaver_link(), DecodeOptions::default()).unwrap();
        assert_eq!(template.display_name(), "Weaver Build");

        assert!(template.set_name("Fresh Air"));
        assert!(!template.set_name("Fresh Air"));
        assert_eq!(template.display_name(), "Fresh Air");
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let mut template =
            BuildTemplate::from_chat_link(2, &weaver_link(), DecodeOptions::default()).unwrap();
        let before = template.clone();

        let result = template.set_build_data(9, "[&AAAA]", DecodeOptions::default());
        assert_eq!(result, Err(DecodeError::UnexpectedLength(3)));
        assert_eq!(template, before);
    }

    #[test]
    fn negative_index_is_not_valid() {
        let template =
            BuildTemplate::from_chat_link(-1, &weaver_link(), DecodeOptions::default()).unwrap();
        assert!(!template.is_valid());
    }
}
