use chrono::{Datelike, Utc};

/// Source of the current calendar year used by date-bounded validators
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// Reads the UTC wall clock on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}

/// Always reports the same year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

