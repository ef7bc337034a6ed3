use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::instrument::ratehelper::ratehelper::simple_forward_rate;
use crate::market::quote::SimpleQuote;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;
use crate::time::businessdayadjuster::BusinessDayAdjuster;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::daycounter::daycounter::DayCounter;
use crate::time::period::Period;

/// Forward rate agreement `months_to_start` x `months_to_end` off the spot date.
pub struct FraRateHelper {
    quote: Rc<SimpleQuote>,
    months_to_start: u32,
    months_to_end: u32,
    settlement_days: u32,
    calendar: Arc<dyn HolidayCalendar>,
    adjuster: BusinessDayAdjuster,
    day_counter: DayCounter,
    start_date: NaiveDate,
    maturity_date: NaiveDate,
    year_fraction: f64,
}

impl FraRateHelper {
    /// `months_to_end` must be greater than `months_to_start`.
    pub fn new(
        quote: Rc<SimpleQuote>,
        evaluation_date: NaiveDate,
        months_to_start: u32,
        months_to_end: u32,
        settlement_days: u32,
        calendar: Arc<dyn HolidayCalendar>,
        adjuster: BusinessDayAdjuster,
        day_counter: DayCounter,
    ) -> FraRateHelper {
        let spot_date = calendar.shift_n_business_day(evaluation_date, settlement_days as i32);
        let start_date = adjuster.from_tenor_to_date(spot_date, Period::months(months_to_start as i32), &calendar);
        let length = Period::months(months_to_end as i32 - months_to_start as i32);
        let maturity_date = adjuster.from_tenor_to_date(start_date, length, &calendar);
        let year_fraction = day_counter.year_fraction(start_date, maturity_date);
        FraRateHelper {
            quote,
            months_to_start,
            months_to_end,
            settlement_days,
            calendar,
            adjuster,
            day_counter,
            start_date,
            maturity_date,
            year_fraction,
        }
    }

    pub fn quote(&self) -> &Rc<SimpleQuote> {
        &self.quote
    }

    pub fn months_to_start(&self) -> u32 {
        self.months_to_start
    }

    pub fn months_to_end(&self) -> u32 {
        self.months_to_end
    }

    pub fn settlement_days(&self) -> u32 {
        self.settlement_days
    }

    pub fn calendar(&self) -> &Arc<dyn HolidayCalendar> {
        &self.calendar
    }

    pub fn adjuster(&self) -> &BusinessDayAdjuster {
        &self.adjuster
    }

    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn maturity_date(&self) -> NaiveDate {
        self.maturity_date
    }

    pub fn implied_quote(&self, curve: &dyn DiscountCurve) -> Result<f64, CurveError> {
        simple_forward_rate(curve, self.start_date, self.maturity_date, self.year_fraction)
    }
}
