use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

/// A holiday rule that produces the same holiday(s) every year.
pub trait RecurringHoliday: Send + Sync {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate>;

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        self.get_holiday(d.year()).contains(d)
    }
}
