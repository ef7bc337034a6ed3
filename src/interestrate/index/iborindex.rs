use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::instrument::instrumenterror::InstrumentError;
use crate::interestrate::compounding::Compounding;
use crate::market::quote::check_finite;
use crate::market::quoteerror::QuoteError;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;
use crate::model::interestrate::termstructurehandle::TermStructureHandle;
use crate::observer::observer::{Observable, Observer, ObserverList};
use crate::time::businessdayadjuster::{BusinessDayAdjuster, BusinessDayConvention};
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::target::target_calendar;
use crate::time::daycounter::daycounter::DayCounter;
use crate::time::period::Period;

/// Interbank offered rate fixing `fixing_days` business days before its value date.
///
/// Future fixings are forecast off the curve linked to `forecast_handle`;
/// past ones must have been stored with [`add_fixing`](IborIndex::add_fixing).
pub struct IborIndex {
    name: String,
    tenor: Period,
    fixing_days: u32,
    calendar: Arc<dyn HolidayCalendar>,
    adjuster: BusinessDayAdjuster,
    day_counter: DayCounter,
    forecast_handle: Rc<TermStructureHandle>,
    past_fixings: RefCell<HashMap<NaiveDate, f64>>,
    observers: ObserverList,
}

impl IborIndex {
    pub fn new(
        family_name: &str,
        tenor: Period,
        fixing_days: u32,
        calendar: Arc<dyn HolidayCalendar>,
        adjuster: BusinessDayAdjuster,
        day_counter: DayCounter,
        forecast_handle: Rc<TermStructureHandle>,
    ) -> Rc<IborIndex> {
        let index = Rc::new(IborIndex {
            name: format!("{family_name}{tenor}"),
            tenor,
            fixing_days,
            calendar,
            adjuster,
            day_counter,
            forecast_handle,
            past_fixings: RefCell::new(HashMap::new()),
            observers: ObserverList::new(),
        });
        let as_observer: Rc<dyn Observer> = index.clone();
        let weak: Weak<dyn Observer> = Rc::downgrade(&as_observer);
        index.forecast_handle.subscribe(weak);
        index
    }

    /// Euribor: TARGET, modified following, Actual/360, two fixing days.
    pub fn euribor(tenor: Period, forecast_handle: Rc<TermStructureHandle>) -> Rc<IborIndex> {
        IborIndex::new(
            "Euribor",
            tenor,
            2,
            target_calendar(),
            BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false),
            DayCounter::actual_360(),
            forecast_handle,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tenor(&self) -> Period {
        self.tenor
    }

    pub fn fixing_days(&self) -> u32 {
        self.fixing_days
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

    pub fn forecast_handle(&self) -> &Rc<TermStructureHandle> {
        &self.forecast_handle
    }

    pub fn fixing_date(&self, value_date: NaiveDate) -> NaiveDate {
        self.calendar.shift_n_business_day(value_date, -(self.fixing_days as i32))
    }

    pub fn value_date(&self, fixing_date: NaiveDate) -> NaiveDate {
        self.calendar.shift_n_business_day(fixing_date, self.fixing_days as i32)
    }

    pub fn maturity_date(&self, value_date: NaiveDate) -> NaiveDate {
        self.adjuster.from_tenor_to_date(value_date, self.tenor, &self.calendar)
    }

    /// Stores a realised fixing and notifies observers if it changes anything.
    ///
    /// A non-finite fixing is rejected and nothing is stored.
    pub fn add_fixing(&self, fixing_date: NaiveDate, value: f64) -> Result<(), QuoteError> {
        check_finite(value)?;
        let previous = self.past_fixings.borrow_mut().insert(fixing_date, value);
        if previous != Some(value) {
            self.notify_observers();
        }
        Ok(())
    }

    pub fn past_fixing(&self, fixing_date: NaiveDate) -> Option<f64> {
        self.past_fixings.borrow().get(&fixing_date).copied()
    }

    pub fn clear_fixings(&self) {
        let removed = std::mem::take(&mut *self.past_fixings.borrow_mut());
        if !removed.is_empty() {
            self.notify_observers();
        }
    }

    /// Simply-compounded forward over `[start, end]` on the linked forecast curve.
    pub fn forecast_rate(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, CurveError> {
        let curve = self.forecast_handle.current_link().ok_or(CurveError::NoCurveLinked)?;
        self.forecast_rate_on(&*curve, start, end)
    }

    pub fn forecast_rate_on<C: DiscountCurve + ?Sized>(
        &self,
        curve: &C,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, CurveError> {
        let tau = self.day_counter.year_fraction(start, end);
        let growth = curve.discount(start)? / curve.discount(end)?;
        Ok(Compounding::Simple.implied_rate(growth, tau))
    }

    /// Rate of a coupon fixing on `fixing_date` and accruing over `[start, end]`.
    ///
    /// Fixings before `evaluation_date` must be stored. A fixing on the
    /// evaluation date uses the stored value when present and is forecast otherwise.
    pub fn fixing(
        &self,
        fixing_date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
        evaluation_date: NaiveDate,
    ) -> Result<f64, InstrumentError> {
        if let Some(rate) = self.stored_fixing(fixing_date, evaluation_date)? {
            return Ok(rate);
        }
        Ok(self.forecast_rate(start, end)?)
    }

    pub fn fixing_on<C: DiscountCurve + ?Sized>(
        &self,
        curve: &C,
        fixing_date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
        evaluation_date: NaiveDate,
    ) -> Result<f64, InstrumentError> {
        if let Some(rate) = self.stored_fixing(fixing_date, evaluation_date)? {
            return Ok(rate);
        }
        Ok(self.forecast_rate_on(curve, start, end)?)
    }

    fn stored_fixing(&self, fixing_date: NaiveDate, evaluation_date: NaiveDate) -> Result<Option<f64>, InstrumentError> {
        if fixing_date > evaluation_date {
            return Ok(None);
        }
        match self.past_fixing(fixing_date) {
            Some(rate) => Ok(Some(rate)),
            None if fixing_date == evaluation_date => Ok(None),
            None => Err(InstrumentError::MissingFixing {
                index: self.name.clone(),
                date: fixing_date,
            }),
        }
    }
}

impl Observable for IborIndex {
    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}

impl Observer for IborIndex {
    fn update(&self) {
        self.notify_observers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::interestrate::flatforwardcurve::FlatForwardCurve;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn euribor_6m() -> Rc<IborIndex> {
        let curve = FlatForwardCurve::new(ymd(2001, 11, 8), 0.04, DayCounter::actual_360());
        IborIndex::euribor(Period::months(6), TermStructureHandle::with_curve(curve))
    }

    #[test]
    fn naming_and_dates() {
        let index = euribor_6m();
        assert_eq!(index.name(), "Euribor6M");
        assert_eq!(index.value_date(ymd(2001, 11, 6)), ymd(2001, 11, 8));
        assert_eq!(index.fixing_date(ymd(2001, 11, 8)), ymd(2001, 11, 6));
        assert_eq!(index.maturity_date(ymd(2001, 11, 8)), ymd(2002, 5, 8));
    }

    #[test]
    fn forecast_is_simple_forward() {
        let index = euribor_6m();
        let tau: f64 = 181.0 / 360.0;
        assert_relative_eq!(
            index.forecast_rate(ymd(2001, 11, 8), ymd(2002, 5, 8)).unwrap(),
            ((0.04 * tau).exp() - 1.0) / tau,
            epsilon = 1e-14
        );
    }

    #[test]
    fn past_fixings_are_required() {
        let index = euribor_6m();
        let (start, end) = (ymd(2001, 11, 8), ymd(2002, 5, 8));
        assert_eq!(
            index.fixing(ymd(2001, 11, 6), start, end, ymd(2001, 11, 7)),
            Err(InstrumentError::MissingFixing {
                index: "Euribor6M".to_owned(),
                date: ymd(2001, 11, 6)
            })
        );

        index.add_fixing(ymd(2001, 11, 6), 0.0345).unwrap();
        assert_eq!(index.fixing(ymd(2001, 11, 6), start, end, ymd(2001, 11, 7)), Ok(0.0345));
        // Stored fixing wins on the evaluation date too.
        assert_eq!(index.fixing(ymd(2001, 11, 6), start, end, ymd(2001, 11, 6)), Ok(0.0345));

        index.clear_fixings();
        let forecast = index.forecast_rate(start, end).unwrap();
        assert_eq!(index.fixing(ymd(2001, 11, 6), start, end, ymd(2001, 11, 6)), Ok(forecast));
    }

    #[test]
    fn non_finite_fixings_are_rejected() {
        let index = euribor_6m();
        assert!(matches!(
            index.add_fixing(ymd(2001, 11, 6), f64::NAN),
            Err(QuoteError::InvalidValue { value }) if value.is_nan()
        ));
        assert!(index.add_fixing(ymd(2001, 11, 6), f64::INFINITY).is_err());
        assert_eq!(index.past_fixing(ymd(2001, 11, 6)), None);
    }

    #[test]
    fn forwards_handle_notifications() {
        struct Flag(Cell<bool>);
        impl Observer for Flag {
            fn update(&self) {
                self.0.set(true);
            }
        }

        let index = euribor_6m();
        let flag = Rc::new(Flag(Cell::new(false)));
        let as_observer: Rc<dyn Observer> = flag.clone();
        index.subscribe(Rc::downgrade(&as_observer));

        index
            .forecast_handle()
            .link_to(FlatForwardCurve::new(ymd(2001, 11, 8), 0.05, DayCounter::actual_360()));
        assert!(flag.0.get());
    }
}
