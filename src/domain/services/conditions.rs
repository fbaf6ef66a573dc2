use crate::domain::entities::Participant;

/// Add a named condition. Returns false if it is already present.
pub fn add_condition(participant: &mut Participant, name: &str) -> bool {
    if participant.has_condition(name) {
        return false;
    }
    participant.conditions.push(name.to_string());
    true
}

/// Remove a named condition. Returns false if it was not present.
pub fn remove_condition(participant: &mut Participant, name: &str) -> bool {
    match participant.conditions.iter().position(|c| c == name) {
        Some(index) => {
            participant.conditions.remove(index);
            true
        }
        None => false,
    }
}
