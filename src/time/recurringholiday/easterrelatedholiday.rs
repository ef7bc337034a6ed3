use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::recurringholiday::RecurringHoliday;
use crate::time::period::Period;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum EasterType {
    Western,
    Orthodox,
}

/// A holiday a fixed number of days away from Easter Sunday
/// (Good Friday is `-2`, Easter Monday is `1`).
#[derive(Debug, Clone, Copy)]
pub struct EasterRelatedHoliday {
    easter_type: EasterType,
    shift_period: Period,
}

impl EasterRelatedHoliday {
    pub fn new(easter_type: EasterType, shift_days: i32) -> EasterRelatedHoliday {
        EasterRelatedHoliday {
            easter_type,
            shift_period: Period::days(shift_days),
        }
    }

    pub fn good_friday() -> EasterRelatedHoliday {
        EasterRelatedHoliday::new(EasterType::Western, -2)
    }

    pub fn easter_monday() -> EasterRelatedHoliday {
        EasterRelatedHoliday::new(EasterType::Western, 1)
    }

    pub fn easter_type(&self) -> EasterType {
        self.easter_type
    }

    pub fn shift_period(&self) -> Period {
        self.shift_period
    }

    /// Easter Sunday in the Gregorian calendar, defined for 1583..=4099.
    pub fn easter_sunday(&self, year: i32) -> Option<NaiveDate> {
        if !(1583..=4099).contains(&year) {
            return None;
        }

        let golden = year % 19;
        let (paschal, weekday, julian_shift) = match self.easter_type {
            EasterType::Western => {
                let century = year / 100;
                let skipped_leaps = century / 4;
                let epact = (century - skipped_leaps - (8 * century + 13) / 25 + 19 * golden + 15) % 30;
                let paschal = epact - (epact / 28) * (1 - (epact / 28) * (29 / (epact + 1)) * ((21 - golden) / 11));
                let weekday = (year + year / 4 + paschal + 2 - century + skipped_leaps) % 7;
                (paschal, weekday, 0)
            }
            EasterType::Orthodox => {
                let paschal = (19 * golden + 15) % 30;
                let weekday = (year + year / 4 + paschal) % 7;
                (paschal, weekday, 10 + year / 100 - 16 - (year / 100 - 16) / 4)
            }
        };

        // Easter falls `offset` days after 28 March (Julian calendar for the orthodox rule).
        let offset = paschal - weekday;
        let month = 3 + (offset + 40) / 44;
        let day = offset + 28 - 31 * (month / 4);
        NaiveDate::from_ymd_opt(year, month as u32, day as u32)?
            .checked_add_days(Days::new(julian_shift as u64))
    }
}

impl RecurringHoliday for EasterRelatedHoliday {
    fn get_holiday(&self, year: i32) -> HashSet<NaiveDate> {
        self.easter_sunday(year)
            .map(|easter| easter + self.shift_period)
            .into_iter()
            .collect()
    }
}
