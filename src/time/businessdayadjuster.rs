use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::period::Period;

fn unadjust(d: NaiveDate, _calendar: &Arc<dyn HolidayCalendar>) -> NaiveDate {
    d
}

fn following(d: NaiveDate, calendar: &Arc<dyn HolidayCalendar>) -> NaiveDate {
    calendar.next_business_day(d)
}

fn preceding(d: NaiveDate, calendar: &Arc<dyn HolidayCalendar>) -> NaiveDate {
    calendar.previous_business_day(d)
}

fn modified_following(d: NaiveDate, calendar: &Arc<dyn HolidayCalendar>) -> NaiveDate {
    let eom = calendar.last_business_day_of_month(d.year(), d.month());
    if d > eom {
        eom
    } else {
        calendar.next_business_day(d)
    }
}

fn modified_preceding(d: NaiveDate, calendar: &Arc<dyn HolidayCalendar>) -> NaiveDate {
    let fom = calendar.first_business_day_of_month(d.year(), d.month());
    if d < fom {
        fom
    } else {
        calendar.previous_business_day(d)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BusinessDayConvention {
    Unadjusted,
    Following,
    Preceding,
    ModifiedFollowing,
    ModifiedPreceding,
}

#[derive(Serialize, Deserialize)]
struct AdjusterFields {
    convention: BusinessDayConvention,
    #[serde(default)]
    eom: bool,
}

/// Rolls non-business days according to a [`BusinessDayConvention`].
///
/// With `eom` set, a tenor added to the last business day of a month lands on
/// the last business day of the target month.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(from = "AdjusterFields", into = "AdjusterFields")]
pub struct BusinessDayAdjuster {
    convention: BusinessDayConvention,
    eom: bool,
    adjuster: fn(NaiveDate, &Arc<dyn HolidayCalendar>) -> NaiveDate,
}

impl BusinessDayAdjuster {
    pub fn new(convention: BusinessDayConvention, eom: bool) -> BusinessDayAdjuster {
        let adjuster = match convention {
            BusinessDayConvention::Unadjusted => unadjust,
            BusinessDayConvention::Following => following,
            BusinessDayConvention::Preceding => preceding,
            BusinessDayConvention::ModifiedFollowing => modified_following,
            BusinessDayConvention::ModifiedPreceding => modified_preceding,
        };
        BusinessDayAdjuster { convention, eom, adjuster }
    }

    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    pub fn eom(&self) -> bool {
        self.eom
    }

    /// Business days come back unchanged.
    pub fn adjust(&self, d: NaiveDate, calendar: &Arc<dyn HolidayCalendar>) -> NaiveDate {
        if calendar.is_holiday(d) {
            (self.adjuster)(d, calendar)
        } else {
            d
        }
    }

    pub fn from_tenor_to_date(
        &self,
        horizon: NaiveDate,
        tenor: Period,
        calendar: &Arc<dyn HolidayCalendar>,
    ) -> NaiveDate {
        if self.eom && calendar.is_end_of_month(horizon) {
            let d = horizon + tenor;
            calendar.last_business_day_of_month(d.year(), d.month())
        } else {
            self.adjust(horizon + tenor, calendar)
        }
    }
}

impl std::fmt::Debug for BusinessDayAdjuster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessDayAdjuster")
            .field("convention", &self.convention)
            .field("eom", &self.eom)
            .finish()
    }
}

impl PartialEq for BusinessDayAdjuster {
    fn eq(&self, other: &Self) -> bool {
        self.convention == other.convention && self.eom == other.eom
    }
}

impl From<AdjusterFields> for BusinessDayAdjuster {
    fn from(fields: AdjusterFields) -> Self {
        BusinessDayAdjuster::new(fields.convention, fields.eom)
    }
}

impl From<BusinessDayAdjuster> for AdjusterFields {
    fn from(adjuster: BusinessDayAdjuster) -> Self {
        AdjusterFields {
            convention: adjuster.convention,
            eom: adjuster.eom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::calendar::target::target_calendar;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn conventions_roll_weekend_dates() {
        let target = target_calendar();
        // Saturday 30 Mar 2002 sits between Good Friday and Easter Monday.
        let d = ymd(2002, 3, 30);
        let roll = |c| BusinessDayAdjuster::new(c, false).adjust(d, &target);
        assert_eq!(roll(BusinessDayConvention::Unadjusted), d);
        assert_eq!(roll(BusinessDayConvention::Following), ymd(2002, 4, 2));
        assert_eq!(roll(BusinessDayConvention::ModifiedFollowing), ymd(2002, 3, 28));
        assert_eq!(roll(BusinessDayConvention::Preceding), ymd(2002, 3, 28));
        assert_eq!(roll(BusinessDayConvention::ModifiedPreceding), ymd(2002, 3, 28));
    }

    #[test]
    fn modified_preceding_stays_in_month() {
        let target = target_calendar();
        // Saturday 1 Jun 2002.
        let adjuster = BusinessDayAdjuster::new(BusinessDayConvention::ModifiedPreceding, false);
        assert_eq!(adjuster.adjust(ymd(2002, 6, 1), &target), ymd(2002, 6, 3));
    }

    #[test]
    fn tenor_to_date_adjusts_result() {
        let target = target_calendar();
        let adjuster = BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false);
        assert_eq!(
            adjuster.from_tenor_to_date(ymd(2001, 11, 8), Period::months(1), &target),
            ymd(2001, 12, 10)
        );
        assert_eq!(
            adjuster.from_tenor_to_date(ymd(2001, 11, 8), Period::years(2), &target),
            ymd(2003, 11, 10)
        );
    }

    #[test]
    fn end_of_month_rule_sticks_to_month_end() {
        let target = target_calendar();
        let adjuster = BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, true);
        // 28 Feb 2002 is the last business day of February.
        assert_eq!(
            adjuster.from_tenor_to_date(ymd(2002, 2, 28), Period::months(1), &target),
            ymd(2002, 3, 28)
        );
        assert_eq!(
            adjuster.from_tenor_to_date(ymd(2002, 2, 28), Period::months(3), &target),
            ymd(2002, 5, 31)
        );
    }

    #[test]
    fn deserializes_without_eom_flag() {
        let adjuster: BusinessDayAdjuster =
            serde_json::from_str(r#"{"convention":"ModifiedFollowing"}"#).unwrap();
        assert_eq!(adjuster, BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false));
    }
}
