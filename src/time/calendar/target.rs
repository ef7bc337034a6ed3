use std::sync::Arc;

use chrono::{NaiveDate, Weekday};

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::simplecalendar::SimpleCalendar;
use crate::time::recurringholiday::easterrelatedholiday::EasterRelatedHoliday;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

/// Trans-European Automated Real-time Gross settlement Express Transfer calendar.
pub fn target_calendar() -> Arc<dyn HolidayCalendar> {
    let mut recurring_holidays: Vec<Arc<dyn RecurringHoliday>> = [(1, 1), (5, 1), (12, 25), (12, 26)]
        .into_iter()
        .filter_map(|(month, day)| FixedDateHoliday::new(month, day))
        .map(|holiday| Arc::new(holiday) as Arc<dyn RecurringHoliday>)
        .collect();
    recurring_holidays.push(Arc::new(EasterRelatedHoliday::good_friday()));
    recurring_holidays.push(Arc::new(EasterRelatedHoliday::easter_monday()));

    let millennium_closings: Vec<NaiveDate> = [1998, 1999, 2001]
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 12, 31))
        .collect();

    Arc::new(SimpleCalendar::new(
        "TARGET",
        &[Weekday::Sat, Weekday::Sun],
        recurring_holidays,
        millennium_closings,
        Vec::new(),
    ))
}
