use chrono::{DateTime, Utc};

/// Elapsed combat time in milliseconds.
///
/// With a pause, only the interval from `start` to the pause counts; a pause
/// recorded after `end` is capped at `end`. An end before the start yields 0.
pub fn calculate_combat_duration(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    pause: Option<DateTime<Utc>>,
) -> u64 {
    let stop = match pause {
        Some(paused) => paused.min(end),
        None => end,
    };
    let elapsed = stop.signed_duration_since(start).num_milliseconds();
    u64::try_from(elapsed).unwrap_or(0)
}
