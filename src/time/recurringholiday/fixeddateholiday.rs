use std::collections::HashSet;

use chrono::NaiveDate;

use super::recurringholiday::RecurringHoliday;

/// A holiday on the same calendar day every year, not moved when it falls on a weekend.
#[derive(Debug, Clone, Copy)]
pub struct FixedDateHoliday {
    month: u32,
    day: u32,
}

impl FixedDateHoliday {
    /// `None` when no year has a `month`/`day` combination like this one.
    pub fn new(month: u32, day: u32) -> Option<FixedDateHoliday> {
        // 2000 is a leap year, so 29 Feb is accepted.
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| FixedDateHoliday { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .into_iter()
            .collect()
    }
}
