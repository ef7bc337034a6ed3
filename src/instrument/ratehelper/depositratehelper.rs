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

/// Money-market deposit starting `settlement_days` business days after the evaluation date.
pub struct DepositRateHelper {
    quote: Rc<SimpleQuote>,
    tenor: Period,
    settlement_days: u32,
    calendar: Arc<dyn HolidayCalendar>,
    adjuster: BusinessDayAdjuster,
    day_counter: DayCounter,
    start_date: NaiveDate,
    maturity_date: NaiveDate,
    year_fraction: f64,
}

impl DepositRateHelper {
    pub fn new(
        quote: Rc<SimpleQuote>,
        evaluation_date: NaiveDate,
        tenor: Period,
        settlement_days: u32,
        calendar: Arc<dyn HolidayCalendar>,
        adjuster: BusinessDayAdjuster,
        day_counter: DayCounter,
    ) -> DepositRateHelper {
        let start_date = calendar.shift_n_business_day(evaluation_date, settlement_days as i32);
        let maturity_date = adjuster.from_tenor_to_date(start_date, tenor, &calendar);
        let year_fraction = day_counter.year_fraction(start_date, maturity_date);
        DepositRateHelper {
            quote,
            tenor,
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

    pub fn tenor(&self) -> Period {
        self.tenor
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::interestrate::flatforwardcurve::FlatForwardCurve;
    use crate::time::businessdayadjuster::BusinessDayConvention;
    use crate::time::calendar::target::target_calendar;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_month_deposit() -> DepositRateHelper {
        DepositRateHelper::new(
            Rc::new(SimpleQuote::new(0.0372).unwrap()),
            ymd(2001, 11, 6),
            Period::months(1),
            2,
            target_calendar(),
            BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false),
            DayCounter::actual_360(),
        )
    }

    #[test]
    fn dates_follow_settlement_and_rolling() {
        let helper = one_month_deposit();
        assert_eq!(helper.start_date(), ymd(2001, 11, 8));
        assert_eq!(helper.maturity_date(), ymd(2001, 12, 10));
    }

    #[test]
    fn implied_rate_is_simple_forward() {
        let helper = one_month_deposit();
        let curve = FlatForwardCurve::new(ymd(2001, 11, 6), 0.036, DayCounter::actual_365_fixed());
        let tau = 32.0 / 360.0;
        let growth = (0.036 * 32.0 / 365.0_f64).exp();
        assert_relative_eq!(
            helper.implied_quote(&*curve).unwrap(),
            (growth - 1.0) / tau,
            epsilon = 1e-14
        );
    }
}
