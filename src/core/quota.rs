use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remaining likes for the current day
///
/// `remaining` is unsigned and only ever decremented with saturation,
/// so it cannot go negative. Passes never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuota {
    limit: u32,
    remaining: u32,
    enforced: bool,
    day: NaiveDate,
}

impl DailyQuota {
    pub fn new(limit: u32, enforced: bool, today: NaiveDate) -> Self {
        Self {
            limit,
            remaining: limit,
            enforced,
            day: today,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_enforced(&self) -> bool {
        self.enforced
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Value shown to the viewer; `None` when likes are unlimited
    pub fn displayed(&self) -> Option<u32> {
        self.enforced.then_some(self.remaining)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.enforced && self.remaining == 0
    }

    /// Charge one accepted like
    #[inline]
    pub fn consume(&mut self) {
        if self.enforced {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    /// Refill when `today` is past the day the counter belongs to.
    /// Returns `true` if a refill happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today <= self.day {
            return false;
        }
        self.day = today;
        self.remaining = self.limit;
        true
    }
}
