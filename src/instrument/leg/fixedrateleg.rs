use chrono::NaiveDate;

use crate::instrument::leg::coupon::{BASIS_POINT, Coupon};
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;
use crate::time::daycounter::daycounter::DayCounter;
use crate::time::schedule::schedule::Schedule;
use crate::value::cashflows::CashFlows;

/// Coupons paying `nominal × rate × accrual` on each schedule payment date.
#[derive(Debug, Clone)]
pub struct FixedRateLeg {
    schedule: Schedule,
    nominal: f64,
    rate: f64,
    day_counter: DayCounter,
    coupons: Vec<Coupon>,
}

impl FixedRateLeg {
    pub fn new(schedule: Schedule, nominal: f64, rate: f64, day_counter: DayCounter) -> FixedRateLeg {
        let coupons = Coupon::from_schedule(&schedule, &day_counter);
        FixedRateLeg {
            schedule,
            nominal,
            rate,
            day_counter,
            coupons,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Coupon amounts paid after `date`.
    pub fn cash_flows(&self, date: NaiveDate) -> CashFlows {
        self.coupons
            .iter()
            .filter(|c| c.is_alive(date))
            .map(|c| (c.payment_date, self.nominal * self.rate * c.accrual))
            .collect()
    }

    /// Value of one basis point of coupon rate, `Σ nominal × accrual × D(pay) × 1bp`.
    pub fn bps<C: DiscountCurve + ?Sized>(&self, curve: &C) -> Result<f64, CurveError> {
        let reference_date = curve.reference_date();
        let annuity = self
            .coupons
            .iter()
            .filter(|c| c.is_alive(reference_date))
            .map(|c| -> Result<f64, CurveError> { Ok(c.accrual * curve.discount(c.payment_date)?) })
            .sum::<Result<f64, CurveError>>()?;
        Ok(self.nominal * annuity * BASIS_POINT)
    }
}
