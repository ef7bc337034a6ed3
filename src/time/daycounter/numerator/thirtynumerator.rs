use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::daycounter::daycounter::DayCounterNumerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YMD {
    y: i32,
    m: i32,
    d: i32,
}

impl YMD {
    fn from_naive_date(date: NaiveDate) -> YMD {
        YMD {
            y: date.year(),
            m: date.month() as i32,
            d: date.day() as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThirtyAdjustmentCondition {
    Always,
    GreaterThanThirty,
    GreaterThanOrEqualToThirty,
}

fn always(_ymd: YMD) -> bool {
    true
}

fn is_greater_than_thirty(ymd: YMD) -> bool {
    ymd.d > 30
}

fn is_greater_than_or_equal_to_thirty(ymd: YMD) -> bool {
    ymd.d >= 30
}

fn get_adjustment_condition_impl(condition: ThirtyAdjustmentCondition) -> fn(YMD) -> bool {
    match condition {
        ThirtyAdjustmentCondition::Always => always,
        ThirtyAdjustmentCondition::GreaterThanThirty => is_greater_than_thirty,
        ThirtyAdjustmentCondition::GreaterThanOrEqualToThirty => is_greater_than_or_equal_to_thirty,
    }
}

fn to_thirty(ymd: YMD) -> YMD {
    YMD { d: 30, ..ymd }
}

/// 30-day-month numerator.
///
/// The start day is moved to 30 when `start_date_condition` holds. The end
/// day is moved to 30 when both `additional_start_date_condition` (checked on
/// the moved start) and `end_date_condition` hold.
pub struct ThirtyNumerator {
    start_date_condition: ThirtyAdjustmentCondition,
    start_date_condition_impl: fn(YMD) -> bool,
    additional_start_date_condition: ThirtyAdjustmentCondition,
    additional_start_date_condition_impl: fn(YMD) -> bool,
    end_date_condition: ThirtyAdjustmentCondition,
    end_date_condition_impl: fn(YMD) -> bool,
}

impl ThirtyNumerator {
    pub fn new(
        start_date_condition: ThirtyAdjustmentCondition,
        additional_start_date_condition: ThirtyAdjustmentCondition,
        end_date_condition: ThirtyAdjustmentCondition,
    ) -> ThirtyNumerator {
        ThirtyNumerator {
            start_date_condition,
            start_date_condition_impl: get_adjustment_condition_impl(start_date_condition),
            additional_start_date_condition,
            additional_start_date_condition_impl: get_adjustment_condition_impl(additional_start_date_condition),
            end_date_condition,
            end_date_condition_impl: get_adjustment_condition_impl(end_date_condition),
        }
    }

    /// 30/360 bond basis: D2 becomes 30 only when D1 ended up on 30.
    pub fn bond_basis() -> ThirtyNumerator {
        ThirtyNumerator::new(
            ThirtyAdjustmentCondition::GreaterThanThirty,
            ThirtyAdjustmentCondition::GreaterThanOrEqualToThirty,
            ThirtyAdjustmentCondition::GreaterThanThirty,
        )
    }

    /// 30E/360: both 31sts become 30.
    pub fn european() -> ThirtyNumerator {
        ThirtyNumerator::new(
            ThirtyAdjustmentCondition::GreaterThanThirty,
            ThirtyAdjustmentCondition::Always,
            ThirtyAdjustmentCondition::GreaterThanThirty,
        )
    }

    pub fn start_date_condition(&self) -> ThirtyAdjustmentCondition {
        self.start_date_condition
    }

    pub fn additional_start_date_condition(&self) -> ThirtyAdjustmentCondition {
        self.additional_start_date_condition
    }

    pub fn end_date_condition(&self) -> ThirtyAdjustmentCondition {
        self.end_date_condition
    }
}

impl DayCounterNumerator for ThirtyNumerator {
    fn days_between(&self, d1: NaiveDate, d2: NaiveDate) -> f64 {
        let mut ymd1 = YMD::from_naive_date(d1);
        let mut ymd2 = YMD::from_naive_date(d2);
        if (self.start_date_condition_impl)(ymd1) {
            ymd1 = to_thirty(ymd1);
        }
        if (self.additional_start_date_condition_impl)(ymd1) && (self.end_date_condition_impl)(ymd2) {
            ymd2 = to_thirty(ymd2);
        }
        (360 * (ymd2.y - ymd1.y) + 30 * (ymd2.m - ymd1.m) + (ymd2.d - ymd1.d)) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bond_basis_keeps_end_31_after_short_start() {
        let numerator = ThirtyNumerator::bond_basis();
        assert_eq!(numerator.days_between(ymd(2002, 1, 15), ymd(2002, 3, 31)), 76.0);
        assert_eq!(numerator.days_between(ymd(2002, 1, 31), ymd(2002, 3, 31)), 60.0);
        assert_eq!(numerator.days_between(ymd(2002, 1, 30), ymd(2002, 3, 31)), 60.0);
    }

    #[test]
    fn european_caps_both_ends() {
        let numerator = ThirtyNumerator::european();
        assert_eq!(numerator.days_between(ymd(2002, 1, 15), ymd(2002, 3, 31)), 75.0);
        assert_eq!(numerator.days_between(ymd(2002, 1, 31), ymd(2002, 3, 31)), 60.0);
    }

    #[test]
    fn february_end_is_not_moved() {
        let numerator = ThirtyNumerator::bond_basis();
        assert_eq!(numerator.days_between(ymd(2002, 1, 31), ymd(2002, 2, 28)), 28.0);
    }
}
