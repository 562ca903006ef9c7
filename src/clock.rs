use chrono::{DateTime, Utc};

/// ISO-8601 UTC without offset. Microseconds are printed only when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const TIMESTAMP_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Source of the per-record processing timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    if at.timestamp_subsec_micros() == 0 {
        at.format(TIMESTAMP_FORMAT).to_string()
    } else {
        at.format(TIMESTAMP_FORMAT_MICROS).to_string()
    }
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant; used to make output deterministic in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
