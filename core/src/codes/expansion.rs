//! Expansion tiers of elite specializations.
//!
//! The membership sets are generated by `build.rs` from
//! `data/elite_specializations.csv`; regenerate that file when the game adds
//! new elite specializations.

use super::Specialization;

include!(concat!(env!("OUT_DIR"), "/elite_specializations.rs"));

pub const CORE: u8 = 0b0000;
pub const HEART_OF_THORNS: u8 = 0b0001;
pub const PATH_OF_FIRE: u8 = 0b0010;
pub const END_OF_DRAGONS: u8 = 0b0011;

/// Expansion tier a specialization requires (0 for core specializations)
pub fn tier_of(specialization: Specialization) -> u8 {
    let id = specialization.id();

    if HEART_OF_THORNS_SPECIALIZATIONS.contains(&id) {
        return HEART_OF_THORNS;
    }
    if PATH_OF_FIRE_SPECIALIZATIONS.contains(&id) {
        return PATH_OF_FIRE;
    }
    if END_OF_DRAGONS_SPECIALIZATIONS.contains(&id) {
        return END_OF_DRAGONS;
    }

    CORE
}
