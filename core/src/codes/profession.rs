use std::fmt;
use std::str::FromStr;

/// A profession as encoded in the library: low nibble is the base profession,
/// high nibble is the expansion tier of the elite specialization in use.
///
/// `0x21` is Firebrand (Guardian, Path of Fire), `0x01` is core Guardian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Profession(u8);

const BASE_MASK: u8 = 0b0000_1111;

impl Profession {
    pub const NONE: Self = Self(0);

    pub const GUARDIAN: Self = Self(0b0000_0001);
    pub const DRAGONHUNTER: Self = Self(0b0001_0001);
    pub const FIREBRAND: Self = Self(0b0010_0001);

    pub const WARRIOR: Self = Self(0b0000_0010);
    pub const BERSERKER: Self = Self(0b0001_0010);
    pub const SPELLBREAKER: Self = Self(0b0010_0010);

    pub const ENGINEER: Self = Self(0b0000_0011);
    pub const SCRAPPER: Self = Self(0b0001_0011);
    pub const HOLOSMITH: Self = Self(0b0010_0011);

    pub const RANGER: Self = Self(0b0000_0100);
    pub const DRUID: Self = Self(0b0001_0100);
    pub const SOULBEAST: Self = Self(0b0010_0100);

    pub const THIEF: Self = Self(0b0000_0101);
    pub const DAREDEVIL: Self = Self(0b0001_0101);
    pub const DEADEYE: Self = Self(0b0010_0101);

    pub const ELEMENTALIST: Self = Self(0b0000_0110);
    pub const TEMPEST: Self = Self(0b0001_0110);
    pub const WEAVER: Self = Self(0b0010_0110);

    pub const MESMER: Self = Self(0b0000_0111);
    pub const CHRONOMANCER: Self = Self(0b0001_0111);
    pub const MIRAGE: Self = Self(0b0010_0111);

    pub const NECROMANCER: Self = Self(0b0000_1000);
    pub const REAPER: Self = Self(0b0001_1000);
    pub const SCOURGE: Self = Self(0b0010_1000);

    pub const REVENANT: Self = Self(0b0000_1001);
    pub const HERALD: Self = Self(0b0001_1001);
    pub const RENEGADE: Self = Self(0b0010_1001);

    /// Every defined profession, ordered by base profession then tier
    pub const ALL: [Self; 27] = [
        Self::GUARDIAN,
        Self::DRAGONHUNTER,
        Self::FIREBRAND,
        Self::WARRIOR,
        Self::BERSERKER,
        Self::SPELLBREAKER,
        Self::ENGINEER,
        Self::SCRAPPER,
        Self::HOLOSMITH,
        Self::RANGER,
        Self::DRUID,
        Self::SOULBEAST,
        Self::THIEF,
        Self::DAREDEVIL,
        Self::DEADEYE,
        Self::ELEMENTALIST,
        Self::TEMPEST,
        Self::WEAVER,
        Self::MESMER,
        Self::CHRONOMANCER,
        Self::MIRAGE,
        Self::NECROMANCER,
        Self::REAPER,
        Self::SCOURGE,
        Self::REVENANT,
        Self::HERALD,
        Self::RENEGADE,
    ];

    /// Combine a profession byte with an expansion tier.
    ///
    /// Yields [`Profession::NONE`] when the combination is not a defined
    /// profession (unknown profession byte, or an elite tier the profession
    /// has no specialization for).
    pub fn compose(profession_byte: u8, tier: u8) -> Self {
        let bits = (tier << 4) | profession_byte;
        match Self::from_bits(bits) {
            Some(profession) => profession,
            None => {
                tracing::debug!(profession_byte, tier, "No profession defined for byte/tier pair");
                Self::NONE
            }
        }
    }

    /// Reinterpret a raw byte, `None` when it has no defined profession
    pub fn from_bits(bits: u8) -> Option<Self> {
        let candidate = Self(bits);
        (candidate == Self::NONE || candidate.is_defined()).then_some(candidate)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Base profession id (1-9), 0 for [`Profession::NONE`]
    pub fn base_group(&self) -> u8 {
        self.0 & BASE_MASK
    }

    /// Expansion tier (0 = core)
    pub fn tier(&self) -> u8 {
        self.0 >> 4
    }

    /// The core profession this one is an elite of (itself for core professions)
    pub fn base(&self) -> Self {
        Self(self.base_group())
    }

    pub fn is_defined(&self) -> bool {
        Self::ALL.contains(self)
    }

    /// True when both professions share the same base profession, regardless of tier
    pub fn is_based_on(&self, base: Profession) -> bool {
        self.base_group() == base.base_group()
    }

    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::NONE => "None",
            Self::GUARDIAN => "Guardian",
            Self::DRAGONHUNTER => "Dragonhunter",
            Self::FIREBRAND => "Firebrand",
            Self::WARRIOR => "Warrior",
            Self::BERSERKER => "Berserker",
            Self::SPELLBREAKER => "Spellbreaker",
            Self::ENGINEER => "Engineer",
            Self::SCRAPPER => "Scrapper",
            Self::HOLOSMITH => "Holosmith",
            Self::RANGER => "Ranger",
            Self::DRUID => "Druid",
            Self::SOULBEAST => "Soulbeast",
            Self::THIEF => "Thief",
            Self::DAREDEVIL => "Daredevil",
            Self::DEADEYE => "Deadeye",
            Self::ELEMENTALIST => "Elementalist",
            Self::TEMPEST => "Tempest",
            Self::WEAVER => "Weaver",
            Self::MESMER => "Mesmer",
            Self::CHRONOMANCER => "Chronomancer",
            Self::MIRAGE => "Mirage",
            Self::NECROMANCER => "Necromancer",
            Self::REAPER => "Reaper",
            Self::SCOURGE => "Scourge",
            Self::REVENANT => "Revenant",
            Self::HERALD => "Herald",
            Self::RENEGADE => "Renegade",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown({:#04x})", self.0),
        }
    }
}

/// Returned when a profession name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profession: {0:?}")]
pub struct UnknownProfession(pub String);

impl FromStr for Profession {
    type Err = UnknownProfession;

    /// Parse a profession by name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        std::iter::once(Self::NONE)
            .chain(Self::ALL)
            .find(|p| p.name().is_some_and(|name| name.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| UnknownProfession(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_packs_tier_into_high_nibble() {
        assert_eq!(Profession::compose(1, 0), Profession::GUARDIAN);
        assert_eq!(Profession::compose(1, 1), Profession::DRAGONHUNTER);
        assert_eq!(Profession::compose(1, 2), Profession::FIREBRAND);
        assert_eq!(Profession::compose(9, 2), Profession::RENEGADE);
    }

    #[test]
    fn compose_undefined_yields_none() {
        // No End of Dragons specializations are defined yet
        assert_eq!(Profession::compose(1, 3), Profession::NONE);
        assert_eq!(Profession::compose(10, 0), Profession::NONE);
        assert_eq!(Profession::compose(0x0f, 0), Profession::NONE);
    }

    #[test]
    fn accessors_split_the_byte() {
        assert_eq!(Profession::WEAVER.base_group(), 6);
        assert_eq!(Profession::WEAVER.tier(), 2);
        assert_eq!(Profession::WEAVER.base(), Profession::ELEMENTALIST);
        assert_eq!(Profession::NONE.base_group(), 0);
    }

    #[test]
    fn is_based_on_compares_low_nibbles_only() {
        for base in 1..=9u8 {
            let core = Profession::compose(base, 0);
            for tier in 0..=3u8 {
                let raw = Profession((tier << 4) | base);
                assert!(raw.is_based_on(core), "{raw:?} should be based on {core:?}");
                for other in (1..=9u8).filter(|b| *b != base) {
                    assert!(!raw.is_based_on(Profession(other)));
                }
            }
        }
        assert!(!Profession::MIRAGE.is_based_on(Profession::NONE));
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for profession in Profession::ALL {
            let name = profession.to_string();
            assert_eq!(name.parse::<Profession>(), Ok(profession));
        }
        assert_eq!("  soulBEAST ".parse::<Profession>(), Ok(Profession::SOULBEAST));
        assert_eq!("none".parse::<Profession>(), Ok(Profession::NONE));
        assert!("Paragon".parse::<Profession>().is_err());
    }

    #[test]
    fn display_unknown_bits() {
        assert_eq!(Profession(0x3a).to_string(), "Unknown(0x3a)");
    }
}
