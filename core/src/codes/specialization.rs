use std::fmt;

use super::Profession;

/// Generates [`Specialization`] together with its id, name and profession tables.
macro_rules! specializations {
    ($($variant:ident = $id:literal, $name:literal, $profession:ident;)+) => {
        /// A specialization line as identified by the game's API ids.
        ///
        /// Ids that are not (yet) known are kept as [`Specialization::Unknown`]
        /// rather than rejected, so templates made with newer game data survive.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum Specialization {
            #[default]
            None,
            $($variant,)+
            Unknown(u8),
        }

        impl Specialization {
            pub fn from_id(id: u8) -> Self {
                match id {
                    0 => Self::None,
                    $($id => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            pub fn id(&self) -> u8 {
                match self {
                    Self::None => 0,
                    $(Self::$variant => $id,)+
                    Self::Unknown(id) => *id,
                }
            }

            /// Display name, `None` for the empty and unknown values
            pub fn name(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($name),)+
                    Self::None | Self::Unknown(_) => None,
                }
            }

            /// Core profession this specialization belongs to
            pub fn profession(&self) -> Profession {
                match self {
                    $(Self::$variant => Profession::$profession,)+
                    Self::None | Self::Unknown(_) => Profession::NONE,
                }
            }
        }
    };
}

specializations! {
    // Guardian
    Valor = 13, "Valor", GUARDIAN;
    Radiance = 16, "Radiance", GUARDIAN;
    Dragonhunter = 27, "Dragonhunter", GUARDIAN;
    Zeal = 42, "Zeal", GUARDIAN;
    Virtues = 46, "Virtues", GUARDIAN;
    Honor = 49, "Honor", GUARDIAN;
    Firebrand = 62, "Firebrand", GUARDIAN;

    // Warrior
    Strength = 4, "Strength", WARRIOR;
    Tactics = 11, "Tactics", WARRIOR;
    Berserker = 18, "Berserker", WARRIOR;
    Defense = 22, "Defense", WARRIOR;
    Arms = 36, "Arms", WARRIOR;
    Discipline = 51, "Discipline", WARRIOR;
    Spellbreaker = 61, "Spellbreaker", WARRIOR;

    // Engineer
    Explosives = 6, "Explosives", ENGINEER;
    Tools = 21, "Tools", ENGINEER;
    Alchemy = 29, "Alchemy", ENGINEER;
    Firearms = 38, "Firearms", ENGINEER;
    Scrapper = 43, "Scrapper", ENGINEER;
    Inventions = 47, "Inventions", ENGINEER;
    Holosmith = 57, "Holosmith", ENGINEER;

    // Ranger
    Druid = 5, "Druid", RANGER;
    Marksmanship = 8, "Marksmanship", RANGER;
    NatureMagic = 25, "Nature Magic", RANGER;
    Skirmishing = 30, "Skirmishing", RANGER;
    Beastmastery = 32, "Beastmastery", RANGER;
    WildernessSurvival = 33, "Wilderness Survival", RANGER;
    Soulbeast = 55, "Soulbeast", RANGER;

    // Thief
    Daredevil = 7, "Daredevil", THIEF;
    ShadowArts = 20, "Shadow Arts", THIEF;
    DeadlyArts = 28, "Deadly Arts", THIEF;
    CriticalStrikes = 35, "Critical Strikes", THIEF;
    Trickery = 44, "Trickery", THIEF;
    Acrobatics = 54, "Acrobatics", THIEF;
    Deadeye = 58, "Deadeye", THIEF;

    // Elementalist
    Water = 17, "Water", ELEMENTALIST;
    Earth = 26, "Earth", ELEMENTALIST;
    Fire = 31, "Fire", ELEMENTALIST;
    Arcane = 37, "Arcane", ELEMENTALIST;
    Air = 41, "Air", ELEMENTALIST;
    Tempest = 48, "Tempest", ELEMENTALIST;
    Weaver = 56, "Weaver", ELEMENTALIST;

    // Mesmer
    Dueling = 1, "Dueling", MESMER;
    Domination = 10, "Domination", MESMER;
    Inspiration = 23, "Inspiration", MESMER;
    Illusions = 24, "Illusions", MESMER;
    Chronomancer = 40, "Chronomancer", MESMER;
    Chaos = 45, "Chaos", MESMER;
    Mirage = 59, "Mirage", MESMER;

    // Necromancer
    DeathMagic = 2, "Death Magic", NECROMANCER;
    BloodMagic = 19, "Blood Magic", NECROMANCER;
    Reaper = 34, "Reaper", NECROMANCER;
    Curses = 39, "Curses", NECROMANCER;
    SoulReaping = 50, "Soul Reaping", NECROMANCER;
    Spite = 53, "Spite", NECROMANCER;
    Scourge = 60, "Scourge", NECROMANCER;

    // Revenant
    Invocation = 3, "Invocation", REVENANT;
    Retribution = 9, "Retribution", REVENANT;
    Salvation = 12, "Salvation", REVENANT;
    Corruption = 14, "Corruption", REVENANT;
    Devastation = 15, "Devastation", REVENANT;
    Herald = 52, "Herald", REVENANT;
    Renegade = 63, "Renegade", REVENANT;
}

impl Specialization {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Unknown(id) => write!(f, "Unknown({id})"),
            known => f.write_str(known.name().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_up_to_63_is_known() {
        for id in 1..=63u8 {
            let spec = Specialization::from_id(id);
            assert!(!spec.is_unknown(), "id {id} should be a known specialization");
            assert_eq!(spec.id(), id);
            assert!(spec.profession().is_defined());
        }
    }

    #[test]
    fn unmapped_ids_are_preserved() {
        let spec = Specialization::from_id(64);
        assert_eq!(spec, Specialization::Unknown(64));
        assert_eq!(spec.id(), 64);
        assert_eq!(spec.profession(), Profession::NONE);
        assert_eq!(spec.to_string(), "Unknown(64)");
    }

    #[test]
    fn zero_is_none() {
        assert_eq!(Specialization::from_id(0), Specialization::None);
        assert_eq!(Specialization::None.name(), None);
    }

    #[test]
    fn seven_specializations_per_profession() {
        for base in Profession::ALL.iter().filter(|p| p.tier() == 0) {
            let count = (1..=63u8)
                .map(Specialization::from_id)
                .filter(|s| s.profession() == *base)
                .count();
            assert_eq!(count, 7, "{base}");
        }
    }

    #[test]
    fn display_uses_spaced_names() {
        assert_eq!(Specialization::NatureMagic.to_string(), "Nature Magic");
        assert_eq!(Specialization::Firebrand.to_string(), "Firebrand");
    }
}
