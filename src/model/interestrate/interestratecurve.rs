use chrono::{Days, NaiveDate};

use crate::interestrate::compounding::Compounding;
use crate::model::interestrate::curveerror::CurveError;
use crate::observer::observer::Observable;
use crate::time::daycounter::daycounter::DayCounter;

/// Read side of a term structure: discount factors by date.
pub trait DiscountCurve {
    fn reference_date(&self) -> NaiveDate;

    /// Discount factor from `d` back to the reference date; `1.0` at the reference date.
    fn discount(&self, d: NaiveDate) -> Result<f64, CurveError>;
}

/// A discount curve that can be observed and quoted in rates.
///
/// Identity is the `Rc` allocation: handles compare curves by pointer.
pub trait InterestRateCurve: DiscountCurve + Observable {
    fn day_counter(&self) -> &DayCounter;

    /// Last date the curve can be read at, `None` when unbounded.
    fn max_date(&self) -> Option<NaiveDate>;

    fn zero_rate(&self, d: NaiveDate, compounding: Compounding) -> Result<f64, CurveError> {
        let reference_date = self.reference_date();
        // The zero rate at the reference date is the one-day rate.
        let d = if d == reference_date {
            d.checked_add_days(Days::new(1)).unwrap_or(d)
        } else {
            d
        };
        let t = self.day_counter().year_fraction(reference_date, d);
        let df = self.discount(d)?;
        Ok(compounding.implied_rate(1.0 / df, t))
    }

    /// Rate earned between `d1` and `d2` implied by the two discount factors.
    fn forward_rate(&self, d1: NaiveDate, d2: NaiveDate, compounding: Compounding) -> Result<f64, CurveError> {
        let d2 = if d1 == d2 {
            d2.checked_add_days(Days::new(1)).unwrap_or(d2)
        } else {
            d2
        };
        let tau = self.day_counter().year_fraction(d1, d2);
        let growth = self.discount(d1)? / self.discount(d2)?;
        Ok(compounding.implied_rate(growth, tau))
    }
}
