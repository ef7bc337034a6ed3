use std::rc::{Rc, Weak};

use chrono::NaiveDate;
use tracing::debug;

use crate::market::quote::SimpleQuote;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::{DiscountCurve, InterestRateCurve};
use crate::observer::observer::{Observable, Observer, ObserverList};
use crate::time::daycounter::daycounter::DayCounter;

enum RateSource {
    Fixed(f64),
    Quoted(Rc<SimpleQuote>),
}

/// Constant continuously-compounded rate from the reference date onwards.
pub struct FlatForwardCurve {
    reference_date: NaiveDate,
    rate: RateSource,
    day_counter: DayCounter,
    observers: ObserverList,
}

impl FlatForwardCurve {
    pub fn new(reference_date: NaiveDate, rate: f64, day_counter: DayCounter) -> Rc<FlatForwardCurve> {
        Rc::new(FlatForwardCurve {
            reference_date,
            rate: RateSource::Fixed(rate),
            day_counter,
            observers: ObserverList::new(),
        })
    }

    /// Rate read from `quote` at every call; changes to the quote reach this curve's observers.
    pub fn from_quote(
        reference_date: NaiveDate,
        quote: Rc<SimpleQuote>,
        day_counter: DayCounter,
    ) -> Rc<FlatForwardCurve> {
        let curve = Rc::new(FlatForwardCurve {
            reference_date,
            rate: RateSource::Quoted(quote.clone()),
            day_counter,
            observers: ObserverList::new(),
        });
        let as_observer: Rc<dyn Observer> = curve.clone();
        let weak: Weak<dyn Observer> = Rc::downgrade(&as_observer);
        quote.subscribe(weak);
        curve
    }

    pub fn rate(&self) -> f64 {
        match &self.rate {
            RateSource::Fixed(rate) => *rate,
            RateSource::Quoted(quote) => quote.value(),
        }
    }
}

impl DiscountCurve for FlatForwardCurve {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn discount(&self, d: NaiveDate) -> Result<f64, CurveError> {
        if d < self.reference_date {
            return Err(CurveError::DateOutOfRange {
                date: d,
                min: self.reference_date,
                max: NaiveDate::MAX,
            });
        }
        let t = self.day_counter.year_fraction(self.reference_date, d);
        Ok((-self.rate() * t).exp())
    }
}

impl Observable for FlatForwardCurve {
    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}

impl InterestRateCurve for FlatForwardCurve {
    fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    fn max_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl Observer for FlatForwardCurve {
    fn update(&self) {
        debug!(rate = self.rate(), "flat forward rate changed");
        self.notify_observers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interestrate::compounding::Compounding;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn discount_is_exponential_in_time() {
        let curve = FlatForwardCurve::new(ymd(2001, 11, 8), 0.05, DayCounter::actual_365_fixed());
        assert_eq!(curve.discount(ymd(2001, 11, 8)).unwrap(), 1.0);
        assert_relative_eq!(curve.discount(ymd(2002, 11, 8)).unwrap(), (-0.05_f64).exp());
        assert_relative_eq!(
            curve.zero_rate(ymd(2004, 11, 8), Compounding::Continuous).unwrap(),
            0.05,
            epsilon = 1e-14
        );
        assert_relative_eq!(
            curve.forward_rate(ymd(2002, 11, 8), ymd(2003, 11, 8), Compounding::Continuous).unwrap(),
            0.05,
            epsilon = 1e-14
        );
    }

    #[test]
    fn dates_before_reference_are_rejected() {
        let curve = FlatForwardCurve::new(ymd(2001, 11, 8), 0.05, DayCounter::actual_365_fixed());
        assert!(matches!(
            curve.discount(ymd(2001, 11, 7)),
            Err(CurveError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn quoted_rate_follows_quote() {
        let quote = Rc::new(SimpleQuote::new(0.03).unwrap());
        let curve = FlatForwardCurve::from_quote(ymd(2001, 11, 8), quote.clone(), DayCounter::actual_360());
        let before = curve.discount(ymd(2002, 11, 8)).unwrap();
        quote.set_value(0.04).unwrap();
        let after = curve.discount(ymd(2002, 11, 8)).unwrap();
        assert!(after < before);
        assert_relative_eq!(after, (-0.04 * 365.0 / 360.0_f64).exp());
    }
}
