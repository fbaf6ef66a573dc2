use crate::domain::entities::Participant;
use crate::domain::value_objects::CanonicalId;

/// Find the first participant whose identity matches `id`.
///
/// Matching compares canonical string forms, so a typed id and its stored
/// string representation find the same participant.
pub fn find_participant<'a, I>(participants: &'a [Participant], id: &I) -> Option<&'a Participant>
where
    I: CanonicalId + ?Sized,
{
    let key = id.canonical();
    participants
        .iter()
        .find(|p| p.character_id.canonical() == key)
}

pub fn find_participant_mut<'a, I>(
    participants: &'a mut [Participant],
    id: &I,
) -> Option<&'a mut Participant>
where
    I: CanonicalId + ?Sized,
{
    let key = id.canonical();
    participants
        .iter_mut()
        .find(|p| p.character_id.canonical() == key)
}
