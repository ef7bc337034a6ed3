use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::time::utility::end_of_month;

const ONE_DAY: Days = Days::new(1);

pub trait HolidayCalendar: Send + Sync {
    fn name(&self) -> &str;

    fn is_holiday(&self, d: NaiveDate) -> bool;

    /// Every non-business day of `year`, weekends included.
    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate>;

    fn is_business_day(&self, d: NaiveDate) -> bool {
        !self.is_holiday(d)
    }

    /// Moves `n` business days away from `horizon`; `n == 0` returns `horizon` untouched.
    fn shift_n_business_day(&self, horizon: NaiveDate, n: i32) -> NaiveDate {
        let step: fn(NaiveDate) -> NaiveDate = if n >= 0 {
            |d: NaiveDate| d + ONE_DAY
        } else {
            |d: NaiveDate| d - ONE_DAY
        };

        let mut remaining = n.unsigned_abs();
        let mut d = horizon;
        while remaining > 0 {
            d = step(d);
            remaining -= self.is_business_day(d) as u32;
        }
        d
    }

    fn next_business_day(&self, d: NaiveDate) -> NaiveDate {
        self.shift_n_business_day(d, 1)
    }

    fn previous_business_day(&self, d: NaiveDate) -> NaiveDate {
        self.shift_n_business_day(d, -1)
    }

    fn last_business_day_of_month(&self, year: i32, month: u32) -> NaiveDate {
        let mut eom = end_of_month(year, month).expect("month index within 1..=12");
        while self.is_holiday(eom) {
            eom = eom - ONE_DAY;
        }
        eom
    }

    fn first_business_day_of_month(&self, year: i32, month: u32) -> NaiveDate {
        let mut fom = NaiveDate::from_ymd_opt(year, month, 1).expect("month index within 1..=12");
        while self.is_holiday(fom) {
            fom = fom + ONE_DAY;
        }
        fom
    }

    fn is_end_of_month(&self, d: NaiveDate) -> bool {
        self.last_business_day_of_month(d.year(), d.month()) == d
    }
}
