//! Build template chat link decoding
//!
//! A build template link is a base64 payload wrapped in `[&` and `]`:
//!
//! ```text
//! byte  0      link type (13 for build templates)
//! byte  1      profession
//! bytes 2..=7  three (specialization, packed traits) pairs
//! bytes 8..44  skills, pets and legends (not used by the library)
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::codes::{Profession, tier_of};
use crate::template::SpecializationSlot;

pub const CHAT_LINK_PREFIX: &str = "[&";
pub const CHAT_LINK_SUFFIX: &str = "]";

/// Link type byte of build template chat links
pub const BUILD_TEMPLATE_LINK_TYPE: u8 = 13;

/// Decoded size of every build template chat link
pub const BUILD_TEMPLATE_LEN: usize = 44;

/// Why a chat link was rejected, in the order the checks run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("chat link must start with `[&` and end with `]`")]
    MalformedEnvelope,

    #[error("chat link payload is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("build template payload is {0} bytes, expected 44")]
    UnexpectedLength(usize),

    #[error("chat link type {0} is not a build template")]
    WrongLinkType(u8),

    #[error("slot {slot} holds unknown specialization id {id}")]
    UnknownSpecialization { slot: usize, id: u8 },
}

/// Decoder behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Reject specialization ids missing from the lookup tables instead of
    /// keeping them as `Specialization::Unknown`
    pub strict_specializations: bool,
}

/// Fields derived from a build template chat link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedTemplate {
    pub profession: Profession,
    pub slots: [SpecializationSlot; 3],
}

/// Decode a chat link with the default (tolerant) options
pub fn decode(raw: &str) -> Result<DecodedTemplate, DecodeError> {
    decode_with(raw, DecodeOptions::default())
}

pub fn decode_with(raw: &str, options: DecodeOptions) -> Result<DecodedTemplate, DecodeError> {
    let payload = raw
        .strip_prefix(CHAT_LINK_PREFIX)
        .and_then(|rest| rest.strip_suffix(CHAT_LINK_SUFFIX))
        .ok_or(DecodeError::MalformedEnvelope)?;

    let bytes = STANDARD.decode(payload)?;

    if bytes.len() != BUILD_TEMPLATE_LEN {
        return Err(DecodeError::UnexpectedLength(bytes.len()));
    }
    if bytes[0] != BUILD_TEMPLATE_LINK_TYPE {
        return Err(DecodeError::WrongLinkType(bytes[0]));
    }

    let slots = [
        SpecializationSlot::from_bytes(bytes[2], bytes[3]),
        SpecializationSlot::from_bytes(bytes[4], bytes[5]),
        SpecializationSlot::from_bytes(bytes[6], bytes[7]),
    ];

    if options.strict_specializations {
        if let Some((slot, unknown)) =
            slots.iter().enumerate().find(|(_, s)| s.specialization.is_unknown())
        {
            return Err(DecodeError::UnknownSpecialization {
                slot: slot + 1,
                id: unknown.specialization.id(),
            });
        }
    }

    // Only the third (elite) slot decides the expansion tier
    let profession = Profession::compose(bytes[1], tier_of(slots[2].specialization));

    Ok(DecodedTemplate { profession, slots })
}
