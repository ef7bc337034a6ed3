use std::rc::Rc;

use chrono::NaiveDate;

use crate::instrument::instrumenterror::InstrumentError;
use crate::instrument::leg::coupon::{BASIS_POINT, Coupon};
use crate::interestrate::index::iborindex::IborIndex;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;
use crate::time::schedule::schedule::Schedule;
use crate::value::cashflows::CashFlows;

/// Coupons paying `nominal × (fixing + spread) × accrual`, accrued on the index day counter.
pub struct FloatingRateLeg {
    schedule: Schedule,
    nominal: f64,
    index: Rc<IborIndex>,
    spread: f64,
    coupons: Vec<Coupon>,
}

impl FloatingRateLeg {
    pub fn new(schedule: Schedule, nominal: f64, index: Rc<IborIndex>, spread: f64) -> FloatingRateLeg {
        let coupons = Coupon::from_schedule(&schedule, index.day_counter());
        FloatingRateLeg {
            schedule,
            nominal,
            index,
            spread,
            coupons,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn index(&self) -> &Rc<IborIndex> {
        &self.index
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Projected amounts paid after `date`, forecasting unfixed coupons off `forecast`.
    pub fn cash_flows<F: DiscountCurve + ?Sized>(
        &self,
        forecast: &F,
        evaluation_date: NaiveDate,
        date: NaiveDate,
    ) -> Result<CashFlows, InstrumentError> {
        self.coupons
            .iter()
            .filter(|c| c.is_alive(date))
            .map(|c| -> Result<(NaiveDate, f64), InstrumentError> {
                let fixing = self.index.fixing_on(
                    forecast,
                    c.fixing_date,
                    c.accrual_start,
                    c.accrual_end,
                    evaluation_date,
                )?;
                Ok((c.payment_date, self.nominal * (fixing + self.spread) * c.accrual))
            })
            .collect()
    }

    /// Value of one basis point of spread.
    pub fn bps<D: DiscountCurve + ?Sized>(&self, discount: &D) -> Result<f64, CurveError> {
        let reference_date = discount.reference_date();
        let annuity = self
            .coupons
            .iter()
            .filter(|c| c.is_alive(reference_date))
            .map(|c| -> Result<f64, CurveError> { Ok(c.accrual * discount.discount(c.payment_date)?) })
            .sum::<Result<f64, CurveError>>()?;
        Ok(self.nominal * annuity * BASIS_POINT)
    }
}
