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

/// Short-rate future quoted as a price, `100 × (1 − rate)`, without convexity adjustment.
pub struct FuturesRateHelper {
    quote: Rc<SimpleQuote>,
    months: u32,
    calendar: Arc<dyn HolidayCalendar>,
    adjuster: BusinessDayAdjuster,
    day_counter: DayCounter,
    start_date: NaiveDate,
    maturity_date: NaiveDate,
    year_fraction: f64,
}

impl FuturesRateHelper {
    pub fn new(
        quote: Rc<SimpleQuote>,
        imm_date: NaiveDate,
        months: u32,
        calendar: Arc<dyn HolidayCalendar>,
        adjuster: BusinessDayAdjuster,
        day_counter: DayCounter,
    ) -> FuturesRateHelper {
        let start_date = adjuster.adjust(imm_date, &calendar);
        let maturity_date = adjuster.from_tenor_to_date(start_date, Period::months(months as i32), &calendar);
        let year_fraction = day_counter.year_fraction(start_date, maturity_date);
        FuturesRateHelper {
            quote,
            months,
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

    pub fn months(&self) -> u32 {
        self.months
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

    /// Implied futures price.
    pub fn implied_quote(&self, curve: &dyn DiscountCurve) -> Result<f64, CurveError> {
        let forward = simple_forward_rate(curve, self.start_date, self.maturity_date, self.year_fraction)?;
        Ok(100.0 * (1.0 - forward))
    }
}
