//! Initiative ordering
//!
//! Higher initiative acts first; ties go to the higher dexterity. Entries tied
//! on both keep their input order (the sort is stable).

use std::cmp::Ordering;

use crate::domain::entities::InitiativeEntry;

fn turn_order(a: &InitiativeEntry, b: &InitiativeEntry) -> Ordering {
    b.initiative
        .cmp(&a.initiative)
        .then_with(|| b.dexterity.cmp(&a.dexterity))
}

/// Return the entries in turn order without touching the input
pub fn sort_by_initiative(entries: &[InitiativeEntry]) -> Vec<InitiativeEntry> {
    let mut sorted = entries.to_vec();
    sort_initiative_in_place(&mut sorted);
    sorted
}

pub fn sort_initiative_in_place(entries: &mut [InitiativeEntry]) {
    entries.sort_by(turn_order);
}

/// Where `entry` belongs in an already sorted order.
///
/// A newcomer goes after every entry it ties with, matching the stable sort.
pub fn initiative_insertion_index(entries: &[InitiativeEntry], entry: &InitiativeEntry) -> usize {
    entries.partition_point(|existing| turn_order(existing, entry) != Ordering::Greater)
}
