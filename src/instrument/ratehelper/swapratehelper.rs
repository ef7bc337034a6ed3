use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::market::quote::SimpleQuote;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;
use crate::time::businessdayadjuster::{BusinessDayAdjuster, BusinessDayConvention};
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::daycounter::daycounter::DayCounter;
use crate::time::period::Period;
use crate::time::schedule::generationdirection::GenerationDirection;
use crate::time::schedule::schedule::{Schedule, ScheduleGenerator};
use crate::time::schedule::scheduleerror::ScheduleError;

/// Conventions of a vanilla fixed-vs-floating par swap quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapConventions {
    pub settlement_days: u32,
    pub adjuster: BusinessDayAdjuster,
    pub fixed_frequency: Period,
    pub fixed_leg_adjusted: bool,
    pub fixed_day_counter: DayCounter,
    pub floating_frequency: Period,
}

/// Par swap rate. The floating leg is valued on the curve being built, so
/// it is worth `D(start) − D(end)`.
pub struct SwapRateHelper {
    quote: Rc<SimpleQuote>,
    tenor: Period,
    calendar: Arc<dyn HolidayCalendar>,
    conventions: SwapConventions,
    fixed_schedule: Schedule,
    fixed_year_fractions: Vec<f64>,
    start_date: NaiveDate,
    floating_end_date: NaiveDate,
    maturity_date: NaiveDate,
}

impl SwapRateHelper {
    pub fn new(
        quote: Rc<SimpleQuote>,
        evaluation_date: NaiveDate,
        tenor: Period,
        calendar: Arc<dyn HolidayCalendar>,
        conventions: SwapConventions,
    ) -> Result<SwapRateHelper, ScheduleError> {
        let start_date = calendar.shift_n_business_day(evaluation_date, conventions.settlement_days as i32);

        let fixed_accrual_adjuster = if conventions.fixed_leg_adjusted {
            conventions.adjuster
        } else {
            BusinessDayAdjuster::new(BusinessDayConvention::Unadjusted, false)
        };
        let fixed_schedule = ScheduleGenerator::new(
            conventions.fixed_frequency,
            fixed_accrual_adjuster,
            conventions.adjuster,
            GenerationDirection::Backward,
            0,
        )
        .generate_from_tenor(start_date, tenor, &calendar)?;

        let floating_schedule = ScheduleGenerator::new(
            conventions.floating_frequency,
            conventions.adjuster,
            conventions.adjuster,
            GenerationDirection::Backward,
            0,
        )
        .generate_from_tenor(start_date, tenor, &calendar)?;

        let floating_end_date = floating_schedule
            .schedule_periods()
            .last()
            .map(|p| p.calculation_period().end_date())
            .unwrap_or(start_date);
        let maturity_date = fixed_schedule
            .last_payment_date()
            .map_or(floating_end_date, |d| d.max(floating_end_date));

        let fixed_year_fractions = fixed_schedule
            .schedule_periods()
            .iter()
            .map(|p| {
                let period = p.calculation_period();
                conventions
                    .fixed_day_counter
                    .year_fraction(period.start_date(), period.end_date())
            })
            .collect();

        Ok(SwapRateHelper {
            quote,
            tenor,
            calendar,
            conventions,
            fixed_schedule,
            fixed_year_fractions,
            start_date,
            floating_end_date,
            maturity_date,
        })
    }

    pub fn quote(&self) -> &Rc<SimpleQuote> {
        &self.quote
    }

    pub fn tenor(&self) -> Period {
        self.tenor
    }

    pub fn calendar(&self) -> &Arc<dyn HolidayCalendar> {
        &self.calendar
    }

    pub fn conventions(&self) -> &SwapConventions {
        &self.conventions
    }

    pub fn fixed_schedule(&self) -> &Schedule {
        &self.fixed_schedule
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn maturity_date(&self) -> NaiveDate {
        self.maturity_date
    }

    /// `Σ τᵢ D(payᵢ)` over the fixed leg.
    pub fn fixed_annuity(&self, curve: &dyn DiscountCurve) -> Result<f64, CurveError> {
        self.fixed_schedule
            .schedule_periods()
            .iter()
            .zip(self.fixed_year_fractions.iter())
            .map(|(p, tau)| -> Result<f64, CurveError> { Ok(tau * curve.discount(p.payment_date())?) })
            .sum()
    }

    pub fn implied_quote(&self, curve: &dyn DiscountCurve) -> Result<f64, CurveError> {
        let floating_leg = curve.discount(self.start_date)? - curve.discount(self.floating_end_date)?;
        Ok(floating_leg / self.fixed_annuity(curve)?)
    }
}
