//! Combat state - Transient per-encounter turn bookkeeping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::initiative_insertion_index;
use crate::domain::value_objects::CharacterId;

/// One combatant's position in the turn order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    /// Weak reference to a participant, matched by identity
    pub participant_id: CharacterId,
    pub initiative: i32,
    /// Tie-break only
    pub dexterity: i32,
    pub is_active: bool,
    pub has_acted: bool,
}

impl InitiativeEntry {
    pub fn new(participant_id: CharacterId, initiative: i32, dexterity: i32) -> Self {
        Self {
            participant_id,
            initiative,
            dexterity,
            is_active: false,
            has_acted: false,
        }
    }
}

/// Whether combat is running and where in the turn order it stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub is_active: bool,
    /// 1-based once combat starts, 0 before
    pub current_round: u32,
    /// Index into `initiative_order`
    pub current_turn: usize,
    pub initiative_order: Vec<InitiativeEntry>,
    /// Accumulated combat time in milliseconds, excluding pauses
    pub total_duration: u64,
    /// Start of the currently running timing segment
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paused_at: Option<DateTime<Utc>>,
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            is_active: false,
            current_round: 0,
            current_turn: 0,
            initiative_order: Vec::new(),
            total_duration: 0,
            started_at: None,
            paused_at: None,
        }
    }
}

impl CombatState {
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// The entry whose turn it is, if combat has an order
    pub fn current_entry(&self) -> Option<&InitiativeEntry> {
        self.initiative_order.get(self.current_turn)
    }

    /// Mark the current combatant as done and hand the turn on.
    ///
    /// Returns true when the order wrapped and a new round began. Does nothing
    /// on an empty order.
    pub fn advance_turn(&mut self) -> bool {
        if self.initiative_order.is_empty() {
            return false;
        }
        if let Some(current) = self.initiative_order.get_mut(self.current_turn) {
            current.has_acted = true;
        }

        let next = self.current_turn + 1;
        if next >= self.initiative_order.len() {
            self.begin_next_round();
            return true;
        }
        self.activate(next);
        false
    }

    /// Wrap to the top of the order: bump the round, clear `has_acted`, and
    /// give the first combatant the turn.
    pub fn begin_next_round(&mut self) {
        self.current_round += 1;
        for entry in self.initiative_order.iter_mut() {
            entry.has_acted = false;
        }
        self.activate(0);
    }

    /// Drop the entry for `index`, keeping the turn on the same combatant.
    ///
    /// If the removed entry held the turn during combat, the next combatant
    /// takes it; removing the last one in the order starts the next round.
    pub fn remove_entry(&mut self, index: usize) -> Option<InitiativeEntry> {
        if index >= self.initiative_order.len() {
            return None;
        }
        let held_turn = index == self.current_turn;
        let removed = self.initiative_order.remove(index);

        if index < self.current_turn {
            self.current_turn -= 1;
        }
        if self.current_turn >= self.initiative_order.len() {
            if held_turn && self.is_active && !self.initiative_order.is_empty() {
                self.begin_next_round();
                return Some(removed);
            }
            self.current_turn = 0;
        }
        if held_turn && self.is_active {
            self.activate(self.current_turn);
        }
        Some(removed)
    }

    /// Slot a late joiner into its sorted position without moving the turn.
    ///
    /// Returns the index the entry landed at.
    pub fn insert_entry(&mut self, mut entry: InitiativeEntry) -> usize {
        entry.is_active = false;
        entry.has_acted = false;
        let index = initiative_insertion_index(&self.initiative_order, &entry);
        self.initiative_order.insert(index, entry);
        if index <= self.current_turn && self.initiative_order.len() > 1 {
            self.current_turn += 1;
        }
        index
    }

    fn activate(&mut self, index: usize) {
        for (i, entry) in self.initiative_order.iter_mut().enumerate() {
            entry.is_active = i == index;
        }
        self.current_turn = index;
    }
}

/// Canonical combat state for an encounter that is not fighting
pub fn create_default_combat_state() -> CombatState {
    CombatState::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_combat_state_is_deterministic() {
        let a = create_default_combat_state();
        let b = create_default_combat_state();
        assert_eq!(a, b);
        assert!(!a.is_active);
        assert_eq!(a.current_round, 0);
        assert_eq!(a.current_turn, 0);
        assert!(a.initiative_order.is_empty());
        assert_eq!(a.total_duration, 0);
        assert!(!a.is_paused());
    }

    #[test]
    fn test_current_entry() {
        let mut state = create_default_combat_state();
        assert!(state.current_entry().is_none());

        let id = CharacterId::new();
        state.initiative_order.push(InitiativeEntry::new(id, 15, 12));
        assert_eq!(state.current_entry().map(|e| e.participant_id), Some(id));
    }

    fn running(initiatives: &[i32]) -> CombatState {
        let mut state = create_default_combat_state();
        state.is_active = true;
        state.current_round = 1;
        state.initiative_order = initiatives
            .iter()
            .map(|&roll| InitiativeEntry::new(CharacterId::new(), roll, 10))
            .collect();
        state.initiative_order[0].is_active = true;
        state
    }

    fn active_count(state: &CombatState) -> usize {
        state.initiative_order.iter().filter(|e| e.is_active).count()
    }

    #[test]
    fn test_advance_turn_wraps_into_next_round() {
        let mut state = running(&[18, 12, 6]);

        assert!(!state.advance_turn());
        assert!(!state.advance_turn());
        assert_eq!(state.current_turn, 2);
        assert!(state.initiative_order[0].has_acted);

        assert!(state.advance_turn());
        assert_eq!(state.current_round, 2);
        assert_eq!(state.current_turn, 0);
        assert!(state.initiative_order.iter().all(|e| !e.has_acted));
        assert!(state.initiative_order[0].is_active);
        assert_eq!(active_count(&state), 1);
    }

    #[test]
    fn test_removing_last_combatant_on_turn_starts_next_round() {
        let mut state = running(&[18, 12, 6]);
        state.advance_turn();
        state.advance_turn();
        let second = state.initiative_order[1].participant_id;

        let removed = state.remove_entry(2).unwrap();
        assert_eq!(removed.initiative, 6);

        assert_eq!(state.current_round, 2);
        assert_eq!(state.current_turn, 0);
        assert!(state.initiative_order.iter().all(|e| !e.has_acted));
        assert!(state.initiative_order[0].is_active);
        assert_eq!(active_count(&state), 1);

        // The 12 acts once in round 2, not a second time in round 1
        assert!(!state.advance_turn());
        assert_eq!(state.current_entry().unwrap().participant_id, second);
        assert_eq!(state.current_round, 2);
    }

    #[test]
    fn test_removing_combatant_on_turn_mid_order_stays_in_round() {
        let mut state = running(&[18, 12, 6]);
        state.advance_turn();
        let last = state.initiative_order[2].participant_id;

        state.remove_entry(1).unwrap();

        assert_eq!(state.current_round, 1);
        assert_eq!(state.current_turn, 1);
        assert_eq!(state.current_entry().unwrap().participant_id, last);
        assert!(state.current_entry().unwrap().is_active);
        assert!(state.initiative_order[0].has_acted);
    }

    #[test]
    fn test_remove_entry_out_of_range() {
        let mut state = running(&[18]);
        assert!(state.remove_entry(3).is_none());
        assert_eq!(state.initiative_order.len(), 1);
    }

    #[test]
    fn test_insert_entry_keeps_current_combatant() {
        let mut state = running(&[18, 12, 6]);
        state.advance_turn();
        let current = state.current_entry().unwrap().participant_id;

        let index = state.insert_entry(InitiativeEntry::new(CharacterId::new(), 15, 10));

        assert_eq!(index, 1);
        assert_eq!(state.current_turn, 2);
        assert_eq!(state.current_entry().unwrap().participant_id, current);
        assert!(!state.initiative_order[1].is_active);
        assert_eq!(active_count(&state), 1);

        let index = state.insert_entry(InitiativeEntry::new(CharacterId::new(), 3, 10));
        assert_eq!(index, 4);
        assert_eq!(state.current_entry().unwrap().participant_id, current);
    }
}
