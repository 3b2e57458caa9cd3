use chrono::{DateTime, Utc};

/// Port for the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
