use std::fmt;

use crate::codes::Specialization;

/// One of the three specialization lines of a build with its trait choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecializationSlot {
    pub specialization: Specialization,
    /// Adept, master and grandmaster choices (0 = none, 1-3 = top/middle/bottom)
    pub traits: [u8; 3],
}

impl SpecializationSlot {
    /// Unpack a slot from its specialization byte and packed trait byte
    /// (two bits per trait choice, adept in the lowest bits).
    pub fn from_bytes(specialization_byte: u8, traits_byte: u8) -> Self {
        Self {
            specialization: Specialization::from_id(specialization_byte),
            traits: [
                traits_byte & 0b11,
                (traits_byte >> 2) & 0b11,
                (traits_byte >> 4) & 0b11,
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.specialization == Specialization::None
    }

    /// Trait choices, `None` for an empty slot where they carry no meaning
    pub fn trait_choices(&self) -> Option<[u8; 3]> {
        (!self.is_empty()).then_some(self.traits)
    }
}

impl fmt::Display for SpecializationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [adept, master, grandmaster] = self.traits;
        write!(f, "{} - {}|{}|{}", self.specialization, adept, master, grandmaster)
    }
}
