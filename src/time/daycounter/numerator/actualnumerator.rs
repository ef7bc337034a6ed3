use chrono::NaiveDate;

use crate::time::daycounter::daycounter::DayCounterNumerator;

pub struct ActualNumerator;

impl ActualNumerator {
    pub fn new() -> ActualNumerator {
        ActualNumerator {}
    }
}

impl Default for ActualNumerator {
    fn default() -> Self {
        ActualNumerator::new()
    }
}

impl DayCounterNumerator for ActualNumerator {
    #[inline]
    fn days_between(&self, d1: NaiveDate, d2: NaiveDate) -> f64 {
        (d2 - d1).num_days() as f64
    }
}
