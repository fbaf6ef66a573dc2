//! Domain services - Pure combat operations over encounter structures
//!
//! None of these functions perform I/O. The only side effects are the
//! documented in-place mutations of a participant's hit points and conditions.

mod conditions;
mod dice;
mod difficulty;
mod duration;
mod hit_points;
mod initiative;
mod lookup;

pub use conditions::{add_condition, remove_condition};
pub use dice::{roll_initiative, DiceRoller, RngDiceRoller, D20};
pub use difficulty::calculate_difficulty;
pub use duration::calculate_combat_duration;
pub use hit_points::{apply_damage, heal, validate_participant_hp};
pub use initiative::{initiative_insertion_index, sort_by_initiative, sort_initiative_in_place};
pub use lookup::{find_participant, find_participant_mut};
