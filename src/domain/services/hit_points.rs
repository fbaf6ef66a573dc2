//! Hit point mutation and invariant repair
//!
//! Invariants after any of these operations:
//! `0 <= current_hit_points <= max_hit_points` and `temporary_hit_points >= 0`.
//! `apply_damage` and `heal` assume the participant already satisfies them;
//! `validate_participant_hp` restores them after edits made elsewhere.

use crate::domain::entities::Participant;

/// Apply damage, draining temporary hit points first.
///
/// Returns false without touching the participant if `amount` is negative.
pub fn apply_damage(participant: &mut Participant, amount: i32) -> bool {
    if amount < 0 {
        return false;
    }

    let absorbed = amount.min(participant.temporary_hit_points.max(0));
    let overflow = amount - absorbed;

    participant.temporary_hit_points = (participant.temporary_hit_points - absorbed).max(0);
    participant.current_hit_points = participant
        .current_hit_points
        .saturating_sub(overflow)
        .max(0);
    true
}

/// Restore hit points up to the maximum. Temporary hit points are untouched.
///
/// Returns false without touching the participant if `amount` is negative.
pub fn heal(participant: &mut Participant, amount: i32) -> bool {
    if amount < 0 {
        return false;
    }

    participant.current_hit_points = participant
        .current_hit_points
        .saturating_add(amount)
        .min(participant.max_hit_points);
    true
}

/// Clamp every hit point field back into its legal range. Idempotent.
pub fn validate_participant_hp(participant: &mut Participant) {
    participant.max_hit_points = participant.max_hit_points.max(0);
    participant.current_hit_points = participant
        .current_hit_points
        .clamp(0, participant.max_hit_points);
    participant.temporary_hit_points = participant.temporary_hit_points.max(0);
}
