use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

/// Weekend days as a bitmask, bit `i` set for `Weekday::num_days_from_monday() == i`.
#[derive(Debug, Clone, Copy)]
struct WeekendMask(u8);

impl WeekendMask {
    fn new(weekends: &[Weekday]) -> Self {
        WeekendMask(
            weekends
                .iter()
                .fold(0u8, |mask, weekday| mask | (1u8 << weekday.num_days_from_monday())),
        )
    }

    #[inline]
    fn is_weekend(&self, weekday: Weekday) -> bool {
        (self.0 & (1u8 << weekday.num_days_from_monday())) != 0
    }

    fn weekend_list(&self) -> Vec<Weekday> {
        (0..7u8)
            .filter(|day| (self.0 & (1u8 << day)) != 0)
            .filter_map(|day| Weekday::try_from(day).ok())
            .collect()
    }
}

/// Calendar made of a weekend mask, recurring holiday rules and one-off dates.
///
/// One-off business days override everything else, which is how exchange
/// openings on a weekend are expressed.
pub struct SimpleCalendar {
    name: String,
    weekends: WeekendMask,
    recurring_holidays: Vec<Arc<dyn RecurringHoliday>>,
    additional_holidays: HashSet<NaiveDate>,
    additional_business_days: HashSet<NaiveDate>,
}

impl SimpleCalendar {
    pub fn new(
        name: impl Into<String>,
        weekends: &[Weekday],
        recurring_holidays: Vec<Arc<dyn RecurringHoliday>>,
        additional_holidays: Vec<NaiveDate>,
        additional_business_days: Vec<NaiveDate>,
    ) -> SimpleCalendar {
        SimpleCalendar {
            name: name.into(),
            weekends: WeekendMask::new(weekends),
            recurring_holidays,
            additional_holidays: additional_holidays.into_iter().collect(),
            additional_business_days: additional_business_days.into_iter().collect(),
        }
    }

    /// Saturday/Sunday weekends and nothing else.
    pub fn weekends_only() -> SimpleCalendar {
        SimpleCalendar::new(
            "WeekendsOnly",
            &[Weekday::Sat, Weekday::Sun],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    #[inline]
    pub fn is_weekend(&self, d: NaiveDate) -> bool {
        self.weekends.is_weekend(d.weekday())
    }

    pub fn is_recurring_holiday(&self, d: NaiveDate) -> bool {
        self.recurring_holidays.iter().any(|r| r.is_holiday(&d))
    }

    #[inline]
    pub fn is_additional_holiday(&self, d: NaiveDate) -> bool {
        self.additional_holidays.contains(&d)
    }

    #[inline]
    pub fn is_additional_business_day(&self, d: NaiveDate) -> bool {
        self.additional_business_days.contains(&d)
    }
}

const SEVEN_DAYS: Days = Days::new(7);

impl HolidayCalendar for SimpleCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, d: NaiveDate) -> bool {
        if self.is_additional_business_day(d) {
            return false;
        }
        self.is_weekend(d) || self.is_additional_holiday(d) || self.is_recurring_holiday(d)
    }

    fn get_holiday_set(&self, year: i32) -> HashSet<NaiveDate> {
        let mut holiday_set = HashSet::with_capacity(120);

        if let (Some(first_day), Some(last_day)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            // Walk each weekend weekday in steps of a week instead of visiting every day.
            for weekday in self.weekends.weekend_list() {
                let lead = (7 + weekday.num_days_from_monday() - first_day.weekday().num_days_from_monday()) % 7;
                let mut current = first_day + Days::new(lead as u64);
                while current <= last_day {
                    holiday_set.insert(current);
                    current = current + SEVEN_DAYS;
                }
            }
        }

        for rule in self.recurring_holidays.iter() {
            holiday_set.extend(rule.get_holiday(year));
        }

        holiday_set.extend(
            self.additional_holidays
                .iter()
                .filter(|d| d.year() == year)
                .copied(),
        );

        holiday_set.retain(|d| !self.additional_business_days.contains(d));
        holiday_set
    }
}
