use std::sync::Arc;

use chrono::NaiveDate;

use super::generationdirection::GenerationDirection;
use super::scheduleerror::ScheduleError;
use super::scheduleperiod::{CalculationPeriod, SchedulePeriod};
use crate::time::businessdayadjuster::BusinessDayAdjuster;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::period::Period;

/// Builds coupon schedules with regular periods of `frequency`.
///
/// Accrual dates are rolled with `accrual_adjuster` (use an unadjusted one to
/// keep nominal dates), payment dates with `payment_adjuster`, and each fixing
/// date sits `fixing_days` business days before its accrual start.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    frequency: Period,
    accrual_adjuster: BusinessDayAdjuster,
    payment_adjuster: BusinessDayAdjuster,
    direction: GenerationDirection,
    fixing_days: u32,
}

#[derive(Clone)]
pub struct Schedule {
    start_date: NaiveDate,
    end_date: NaiveDate,
    schedule_periods: Vec<SchedulePeriod>,
    calendar: Arc<dyn HolidayCalendar>,
}

impl Schedule {
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Unadjusted termination date the schedule was generated to.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn schedule_periods(&self) -> &[SchedulePeriod] {
        &self.schedule_periods
    }

    pub fn calendar(&self) -> &Arc<dyn HolidayCalendar> {
        &self.calendar
    }

    pub fn len(&self) -> usize {
        self.schedule_periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule_periods.is_empty()
    }

    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.schedule_periods.last().map(|p| p.payment_date())
    }
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schedule")
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("calendar", &self.calendar.name())
            .field("schedule_periods", &self.schedule_periods)
            .finish()
    }
}

impl ScheduleGenerator {
    pub fn new(
        frequency: Period,
        accrual_adjuster: BusinessDayAdjuster,
        payment_adjuster: BusinessDayAdjuster,
        direction: GenerationDirection,
        fixing_days: u32,
    ) -> ScheduleGenerator {
        ScheduleGenerator {
            frequency,
            accrual_adjuster,
            payment_adjuster,
            direction,
            fixing_days,
        }
    }

    pub fn frequency(&self) -> Period {
        self.frequency
    }

    pub fn accrual_adjuster(&self) -> &BusinessDayAdjuster {
        &self.accrual_adjuster
    }

    pub fn payment_adjuster(&self) -> &BusinessDayAdjuster {
        &self.payment_adjuster
    }

    pub fn direction(&self) -> GenerationDirection {
        self.direction
    }

    pub fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    pub fn generate_from_tenor(
        &self,
        start_date: NaiveDate,
        tenor: Period,
        calendar: &Arc<dyn HolidayCalendar>,
    ) -> Result<Schedule, ScheduleError> {
        let end_date = tenor
            .checked_add_to(start_date)
            .ok_or(ScheduleError::DateOverflow { start: start_date, step: tenor })?;
        self.generate(start_date, end_date, calendar)
    }

    pub fn generate(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        calendar: &Arc<dyn HolidayCalendar>,
    ) -> Result<Schedule, ScheduleError> {
        if end_date <= start_date {
            return Err(ScheduleError::EmptySchedule { start: start_date, end: end_date });
        }
        if self.frequency.number() <= 0 {
            return Err(ScheduleError::InvalidFrequency(self.frequency));
        }

        let schedule_periods = self
            .unadjusted_periods(start_date, end_date)?
            .into_iter()
            .map(|period| {
                let accrual_start = self.accrual_adjuster.adjust(period.start_date(), calendar);
                let accrual_end = self.accrual_adjuster.adjust(period.end_date(), calendar);
                let calculation_period = if period.is_stub() {
                    CalculationPeriod::stub(
                        accrual_start,
                        accrual_end,
                        self.accrual_adjuster.adjust(period.regular_start_date(), calendar),
                        self.accrual_adjuster.adjust(period.regular_end_date(), calendar),
                    )
                } else {
                    CalculationPeriod::regular(accrual_start, accrual_end)
                };
                let fixing_date = calendar.shift_n_business_day(accrual_start, -(self.fixing_days as i32));
                let payment_date = self.payment_adjuster.adjust(period.end_date(), calendar);
                SchedulePeriod::new(fixing_date, calculation_period, payment_date)
            })
            .collect();

        Ok(Schedule {
            start_date,
            end_date,
            schedule_periods,
            calendar: calendar.clone(),
        })
    }

    /// Periods on nominal dates, each boundary stepped from the anchor so
    /// month-end clamping does not drift along the schedule.
    fn unadjusted_periods(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<CalculationPeriod>, ScheduleError> {
        let forward = self.direction == GenerationDirection::Forward;
        let (anchor, sign) = if forward { (start_date, 1) } else { (end_date, -1) };
        let roll = |k: i32| {
            let step = self.frequency * (sign * k);
            step.checked_add_to(anchor)
                .ok_or(ScheduleError::DateOverflow { start: anchor, step })
        };
        let beyond = |d: NaiveDate| if forward { d >= end_date } else { d <= start_date };

        let mut periods = Vec::new();
        let mut k = 0;
        let mut d1 = anchor;
        loop {
            k += 1;
            let regular = roll(k)?;
            let done = beyond(regular);
            let (d2, period) = if done {
                let last = if forward { end_date } else { start_date };
                let period = match (forward, regular == last) {
                    (_, true) => ordered_regular(d1, last, forward),
                    (true, false) => CalculationPeriod::stub(d1, last, d1, regular),
                    (false, false) => CalculationPeriod::stub(last, d1, regular, d1),
                };
                (last, period)
            } else {
                (regular, ordered_regular(d1, regular, forward))
            };
            periods.push(period);
            if done {
                break;
            }
            d1 = d2;
        }

        if !forward {
            periods.reverse();
        }
        Ok(periods)
    }
}

fn ordered_regular(d1: NaiveDate, d2: NaiveDate, forward: bool) -> CalculationPeriod {
    if forward {
        CalculationPeriod::regular(d1, d2)
    } else {
        CalculationPeriod::regular(d2, d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::businessdayadjuster::BusinessDayConvention;
    use crate::time::calendar::target::target_calendar;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generator(frequency: Period, accrual: BusinessDayConvention, direction: GenerationDirection) -> ScheduleGenerator {
        ScheduleGenerator::new(
            frequency,
            BusinessDayAdjuster::new(accrual, false),
            BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false),
            direction,
            2,
        )
    }

    #[test]
    fn annual_unadjusted_fixed_leg() {
        let calendar = target_calendar();
        let schedule = generator(Period::years(1), BusinessDayConvention::Unadjusted, GenerationDirection::Backward)
            .generate_from_tenor(ymd(2001, 11, 8), Period::years(2), &calendar)
            .unwrap();
        assert_eq!(schedule.len(), 2);
        let last = schedule.schedule_periods()[1];
        assert_eq!(last.calculation_period(), CalculationPeriod::regular(ymd(2002, 11, 8), ymd(2003, 11, 8)));
        assert_eq!(last.payment_date(), ymd(2003, 11, 10));
        assert_eq!(schedule.last_payment_date(), Some(ymd(2003, 11, 10)));
    }

    #[test]
    fn semiannual_adjusted_floating_leg() {
        let calendar = target_calendar();
        let schedule = generator(Period::months(6), BusinessDayConvention::ModifiedFollowing, GenerationDirection::Backward)
            .generate(ymd(2001, 11, 8), ymd(2003, 11, 8), &calendar)
            .unwrap();
        let ends: Vec<NaiveDate> = schedule
            .schedule_periods()
            .iter()
            .map(|p| p.calculation_period().end_date())
            .collect();
        assert_eq!(ends, vec![ymd(2002, 5, 8), ymd(2002, 11, 8), ymd(2003, 5, 8), ymd(2003, 11, 10)]);
        assert_eq!(schedule.schedule_periods()[0].fixing_date(), ymd(2001, 11, 6));
        assert!(schedule.schedule_periods().iter().all(|p| !p.calculation_period().is_stub()));
    }

    #[test]
    fn stub_lands_opposite_the_anchor() {
        let calendar = target_calendar();
        let start = ymd(2002, 1, 15);
        let end = ymd(2002, 8, 15);

        let forward = generator(Period::months(6), BusinessDayConvention::Unadjusted, GenerationDirection::Forward)
            .generate(start, end, &calendar)
            .unwrap();
        assert_eq!(forward.len(), 2);
        let back_stub = forward.schedule_periods()[1].calculation_period();
        assert!(back_stub.is_stub());
        assert_eq!(back_stub.start_date(), ymd(2002, 7, 15));
        assert_eq!(back_stub.end_date(), end);
        assert_eq!(back_stub.regular_end_date(), ymd(2003, 1, 15));

        let backward = generator(Period::months(6), BusinessDayConvention::Unadjusted, GenerationDirection::Backward)
            .generate(start, end, &calendar)
            .unwrap();
        let front_stub = backward.schedule_periods()[0].calculation_period();
        assert!(front_stub.is_stub());
        assert_eq!(front_stub.start_date(), start);
        assert_eq!(front_stub.end_date(), ymd(2002, 2, 15));
        assert_eq!(front_stub.regular_start_date(), ymd(2001, 8, 15));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let calendar = target_calendar();
        let g = generator(Period::months(6), BusinessDayConvention::Unadjusted, GenerationDirection::Forward);
        assert_eq!(
            g.generate(ymd(2002, 1, 15), ymd(2002, 1, 15), &calendar).unwrap_err(),
            ScheduleError::EmptySchedule { start: ymd(2002, 1, 15), end: ymd(2002, 1, 15) }
        );
        let zero = generator(Period::months(0), BusinessDayConvention::Unadjusted, GenerationDirection::Forward);
        assert_eq!(
            zero.generate(ymd(2002, 1, 15), ymd(2003, 1, 15), &calendar).unwrap_err(),
            ScheduleError::InvalidFrequency(Period::months(0))
        );
    }
}
