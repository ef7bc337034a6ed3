use std::sync::Arc;

use chrono::NaiveDate;

use super::daycounter::{DayCounterDominator, DayCounterNumerator};

/// Fixed days-per-year basis such as 360 or 365.
pub struct ConstDayCounterDominator {
    dominator_value: f64,
}

impl ConstDayCounterDominator {
    pub fn new(dominator_value: f64) -> ConstDayCounterDominator {
        ConstDayCounterDominator { dominator_value }
    }

    pub fn dominator_value(&self) -> f64 {
        self.dominator_value
    }
}

impl DayCounterDominator for ConstDayCounterDominator {
    #[inline]
    fn year_fraction(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        numerator: &Arc<dyn DayCounterNumerator>,
    ) -> f64 {
        numerator.days_between(start_date, end_date) / self.dominator_value
    }
}
