use chrono::NaiveDate;

use crate::time::daycounter::daycounter::DayCounter;
use crate::time::schedule::schedule::Schedule;

pub const BASIS_POINT: f64 = 1.0e-4;

/// Dates and accrual fraction of one coupon, independent of how its rate is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coupon {
    pub fixing_date: NaiveDate,
    pub accrual_start: NaiveDate,
    pub accrual_end: NaiveDate,
    pub payment_date: NaiveDate,
    pub accrual: f64,
}

impl Coupon {
    pub fn from_schedule(schedule: &Schedule, day_counter: &DayCounter) -> Vec<Coupon> {
        schedule
            .schedule_periods()
            .iter()
            .map(|p| {
                let period = p.calculation_period();
                Coupon {
                    fixing_date: p.fixing_date(),
                    accrual_start: period.start_date(),
                    accrual_end: period.end_date(),
                    payment_date: p.payment_date(),
                    accrual: day_counter.year_fraction(period.start_date(), period.end_date()),
                }
            })
            .collect()
    }

    /// Paid strictly after `date`. Coupons paid on the date itself count as settled.
    pub fn is_alive(&self, date: NaiveDate) -> bool {
        self.payment_date > date
    }
}
