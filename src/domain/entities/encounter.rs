//! Encounter aggregate - Participants, settings and combat state for one fight

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{create_default_combat_state, CombatState, Participant};
use crate::domain::services::{
    calculate_difficulty, find_participant, find_participant_mut, validate_participant_hp,
};
use crate::domain::value_objects::{
    create_default_encounter_settings, same_identity, CanonicalId, Difficulty, EncounterId,
    EncounterSettings,
};

/// The persisted aggregate for one tabletop encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: EncounterId,
    pub name: String,
    pub description: String,
    pub participants: Vec<Participant>,
    pub settings: EncounterSettings,
    pub combat_state: CombatState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Encounter {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EncounterId::new(),
            name: name.into(),
            description: String::new(),
            participants: Vec::new(),
            settings: create_default_encounter_settings(),
            combat_state: create_default_combat_state(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_settings(mut self, settings: EncounterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.add_participant(participant);
        self
    }

    pub fn participant<I: CanonicalId + ?Sized>(&self, id: &I) -> Option<&Participant> {
        find_participant(&self.participants, id)
    }

    pub fn participant_mut<I: CanonicalId + ?Sized>(&mut self, id: &I) -> Option<&mut Participant> {
        find_participant_mut(&mut self.participants, id)
    }

    /// Add a participant, repairing its hit points on the way in.
    ///
    /// Returns false if a participant with the same identity is already present.
    pub fn add_participant(&mut self, mut participant: Participant) -> bool {
        if self.participant(&participant.character_id).is_some() {
            return false;
        }
        validate_participant_hp(&mut participant);
        self.participants.push(participant);
        true
    }

    /// Remove a participant and its initiative entry.
    ///
    /// When combat is running the turn pointer keeps following the same
    /// combatant; if the removed combatant held the turn, the next one takes it.
    pub fn remove_participant<I: CanonicalId + ?Sized>(&mut self, id: &I) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| same_identity(&p.character_id, id))?;
        let removed = self.participants.remove(index);

        let state = &mut self.combat_state;
        if let Some(entry_index) = state
            .initiative_order
            .iter()
            .position(|e| same_identity(&e.participant_id, id))
        {
            state.remove_entry(entry_index);
        }

        Some(removed)
    }

    /// Bring a document from outside back within the participant invariants:
    /// hit points are clamped and repeated conditions collapse to one.
    pub fn repair_participants(&mut self) {
        for participant in self.participants.iter_mut() {
            validate_participant_hp(participant);
            let mut seen = HashSet::new();
            participant
                .conditions
                .retain(|condition| seen.insert(condition.clone()));
        }
    }

    pub fn player_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.participant_type.is_player_character())
            .count()
    }

    pub fn difficulty(&self) -> Difficulty {
        calculate_difficulty(self.player_count(), self.participants.len())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
