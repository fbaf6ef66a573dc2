//! Encounter difficulty estimate from headcount
//!
//! The ratio of all combatants to player characters drives the label:
//!
//! | combatants / players | label   |
//! |----------------------|---------|
//! | <= 1.5               | trivial |
//! | <= 2.0               | easy    |
//! | <= 2.5               | medium  |
//! | <= 3.0               | hard    |
//! | > 3.0                | deadly  |
//!
//! Thresholds are compared in integer arithmetic (both sides doubled).

use crate::domain::value_objects::Difficulty;

/// Classify an encounter. No players at all is always deadly.
pub fn calculate_difficulty(player_count: usize, total_combatants: usize) -> Difficulty {
    if player_count == 0 {
        return Difficulty::Deadly;
    }

    // Compare 2 * total against 2 * players * ratio
    let total = total_combatants.saturating_mul(2);

    if total <= player_count.saturating_mul(3) {
        Difficulty::Trivial
    } else if total <= player_count.saturating_mul(4) {
        Difficulty::Easy
    } else if total <= player_count.saturating_mul(5) {
        Difficulty::Medium
    } else if total <= player_count.saturating_mul(6) {
        Difficulty::Hard
    } else {
        Difficulty::Deadly
    }
}
