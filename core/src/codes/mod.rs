mod expansion;
mod profession;
mod specialization;

pub use expansion::{CORE, END_OF_DRAGONS, HEART_OF_THORNS, PATH_OF_FIRE, tier_of};
pub use profession::{Profession, UnknownProfession};
pub use specialization::Specialization;
