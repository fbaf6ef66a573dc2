use chrono::{DateTime, Utc};

/// Wall clock used to time combat
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
