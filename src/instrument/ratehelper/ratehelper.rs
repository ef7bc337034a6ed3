use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::instrument::ratehelper::depositratehelper::DepositRateHelper;
use crate::instrument::ratehelper::fraratehelper::FraRateHelper;
use crate::instrument::ratehelper::futuresratehelper::FuturesRateHelper;
use crate::instrument::ratehelper::swapratehelper::SwapRateHelper;
use crate::market::quote::SimpleQuote;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;

/// Simply-compounded forward over `[start, end]` with accrual `year_fraction`.
pub(crate) fn simple_forward_rate(
    curve: &dyn DiscountCurve,
    start: NaiveDate,
    end: NaiveDate,
    year_fraction: f64,
) -> Result<f64, CurveError> {
    Ok((curve.discount(start)? / curve.discount(end)? - 1.0) / year_fraction)
}

/// A market instrument the bootstrapper fits one curve node to.
pub enum RateHelper {
    Deposit(DepositRateHelper),
    ForwardRateAgreement(FraRateHelper),
    Futures(FuturesRateHelper),
    Swap(SwapRateHelper),
}

impl RateHelper {
    /// Pillar date of the node this helper determines.
    pub fn maturity_date(&self) -> NaiveDate {
        match self {
            RateHelper::Deposit(h) => h.maturity_date(),
            RateHelper::ForwardRateAgreement(h) => h.maturity_date(),
            RateHelper::Futures(h) => h.maturity_date(),
            RateHelper::Swap(h) => h.maturity_date(),
        }
    }

    pub fn earliest_date(&self) -> NaiveDate {
        match self {
            RateHelper::Deposit(h) => h.start_date(),
            RateHelper::ForwardRateAgreement(h) => h.start_date(),
            RateHelper::Futures(h) => h.start_date(),
            RateHelper::Swap(h) => h.start_date(),
        }
    }

    pub fn quote(&self) -> &Rc<SimpleQuote> {
        match self {
            RateHelper::Deposit(h) => h.quote(),
            RateHelper::ForwardRateAgreement(h) => h.quote(),
            RateHelper::Futures(h) => h.quote(),
            RateHelper::Swap(h) => h.quote(),
        }
    }

    pub fn quoted_value(&self) -> f64 {
        self.quote().value()
    }

    /// Value of the quoted quantity implied by `curve`, reading no discount
    /// factor beyond [`maturity_date`](Self::maturity_date).
    pub fn implied_quote(&self, curve: &dyn DiscountCurve) -> Result<f64, CurveError> {
        match self {
            RateHelper::Deposit(h) => h.implied_quote(curve),
            RateHelper::ForwardRateAgreement(h) => h.implied_quote(curve),
            RateHelper::Futures(h) => h.implied_quote(curve),
            RateHelper::Swap(h) => h.implied_quote(curve),
        }
    }

    /// `implied_quote - quoted_value`, zero when the curve reprices the helper.
    pub fn quote_error(&self, curve: &dyn DiscountCurve) -> Result<f64, CurveError> {
        Ok(self.implied_quote(curve)? - self.quoted_value())
    }
}

impl fmt::Display for RateHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateHelper::Deposit(h) => write!(f, "{} deposit", h.tenor()),
            RateHelper::ForwardRateAgreement(h) => {
                write!(f, "{}x{} FRA", h.months_to_start(), h.months_to_end())
            }
            RateHelper::Futures(h) => write!(f, "{}M future starting {}", h.months(), h.start_date()),
            RateHelper::Swap(h) => write!(f, "{} swap", h.tenor()),
        }
    }
}

impl fmt::Debug for RateHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateHelper")
            .field("instrument", &self.to_string())
            .field("quote", &self.quoted_value())
            .field("maturity_date", &self.maturity_date())
            .finish()
    }
}

impl From<DepositRateHelper> for RateHelper {
    fn from(helper: DepositRateHelper) -> Self {
        RateHelper::Deposit(helper)
    }
}

impl From<FraRateHelper> for RateHelper {
    fn from(helper: FraRateHelper) -> Self {
        RateHelper::ForwardRateAgreement(helper)
    }
}

impl From<FuturesRateHelper> for RateHelper {
    fn from(helper: FuturesRateHelper) -> Self {
        RateHelper::Futures(helper)
    }
}

impl From<SwapRateHelper> for RateHelper {
    fn from(helper: SwapRateHelper) -> Self {
        RateHelper::Swap(helper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::interestrate::flatforwardcurve::FlatForwardCurve;
    use crate::time::businessdayadjuster::{BusinessDayAdjuster, BusinessDayConvention};
    use crate::time::calendar::target::target_calendar;
    use crate::time::daycounter::daycounter::DayCounter;
    use crate::time::period::Period;
    use approx::assert_abs_diff_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dispatches_to_variant() {
        let quote = Rc::new(SimpleQuote::new(0.0382).unwrap());
        let helper: RateHelper = DepositRateHelper::new(
            quote.clone(),
            ymd(2001, 11, 6),
            Period::weeks(1),
            2,
            target_calendar(),
            BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false),
            DayCounter::actual_360(),
        )
        .into();
        assert_eq!(helper.earliest_date(), ymd(2001, 11, 8));
        assert_eq!(helper.maturity_date(), ymd(2001, 11, 15));
        assert!(Rc::ptr_eq(helper.quote(), &quote));
        assert_eq!(helper.to_string(), "1W deposit");

        quote.set_value(0.0390).unwrap();
        assert_eq!(helper.quoted_value(), 0.0390);

        let curve = FlatForwardCurve::new(ymd(2001, 11, 6), 0.0390, DayCounter::actual_360());
        let implied = helper.implied_quote(&*curve).unwrap();
        assert_abs_diff_eq!(helper.quote_error(&*curve).unwrap(), implied - 0.0390, epsilon = 1e-16);
    }
}
