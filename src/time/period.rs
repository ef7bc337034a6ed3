use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    pub fn to_char(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }

    fn from_char(unit: char) -> Option<TimeUnit> {
        match unit.to_ascii_uppercase() {
            'D' => Some(TimeUnit::Days),
            'W' => Some(TimeUnit::Weeks),
            'M' => Some(TimeUnit::Months),
            'Y' => Some(TimeUnit::Years),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePeriodError {
    #[error("empty tenor string")]
    Empty,
    #[error("unknown time unit '{0}' found")]
    UnknownTimeUnit(char),
    #[error("invalid tenor length: {0}")]
    Parse(#[from] ParseIntError),
}

/// A tenor such as `1W`, `6M` or `10Y`.
///
/// Adding a period to a date clamps the day to the end of the target month,
/// so `2001-01-31 + 1M` is `2001-02-28`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    number: i32,
    unit: TimeUnit,
}

impl Period {
    pub fn new(number: i32, unit: TimeUnit) -> Period {
        Period { number, unit }
    }

    pub fn days(number: i32) -> Period {
        Period::new(number, TimeUnit::Days)
    }

    pub fn weeks(number: i32) -> Period {
        Period::new(number, TimeUnit::Weeks)
    }

    pub fn months(number: i32) -> Period {
        Period::new(number, TimeUnit::Months)
    }

    pub fn years(number: i32) -> Period {
        Period::new(number, TimeUnit::Years)
    }

    /// Coupon period for a payment frequency given as payments per year.
    pub fn from_frequency(payments_per_year: u32) -> Option<Period> {
        match payments_per_year {
            1 => Some(Period::years(1)),
            2 | 3 | 4 | 6 | 12 => Some(Period::months(12 / payments_per_year as i32)),
            _ => None,
        }
    }

    pub fn parse(period_str: &str) -> Result<Period, ParsePeriodError> {
        let trimmed = period_str.trim();
        let unit_chr = trimmed.chars().last().ok_or(ParsePeriodError::Empty)?;
        let unit = TimeUnit::from_char(unit_chr).ok_or(ParsePeriodError::UnknownTimeUnit(unit_chr))?;
        let number = trimmed[..trimmed.len() - unit_chr.len_utf8()].parse::<i32>()?;
        Ok(Period::new(number, unit))
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// `horizon + self`, or `None` when the result leaves chrono's date range.
    pub fn checked_add_to(&self, horizon: NaiveDate) -> Option<NaiveDate> {
        let magnitude = self.number.unsigned_abs();
        let forward = self.number >= 0;
        match self.unit {
            TimeUnit::Days => shift_days(horizon, magnitude as u64, forward),
            TimeUnit::Weeks => shift_days(horizon, 7 * magnitude as u64, forward),
            TimeUnit::Months => shift_months(horizon, magnitude, forward),
            TimeUnit::Years => shift_months(horizon, 12 * magnitude, forward),
        }
    }
}

fn shift_days(horizon: NaiveDate, days: u64, forward: bool) -> Option<NaiveDate> {
    if forward {
        horizon.checked_add_days(Days::new(days))
    } else {
        horizon.checked_sub_days(Days::new(days))
    }
}

fn shift_months(horizon: NaiveDate, months: u32, forward: bool) -> Option<NaiveDate> {
    if forward {
        horizon.checked_add_months(Months::new(months))
    } else {
        horizon.checked_sub_months(Months::new(months))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit.to_char())
    }
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = ParsePeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> String {
        period.to_string()
    }
}

impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        Period::new(-self.number, self.unit)
    }
}

impl Mul<i32> for Period {
    type Output = Period;

    fn mul(self, n: i32) -> Period {
        Period::new(self.number * n, self.unit)
    }
}

impl Add<Period> for NaiveDate {
    type Output = Self;

    fn add(self, period: Period) -> Self {
        period
            .checked_add_to(self)
            .expect("`NaiveDate + Period` overflowed")
    }
}

impl Sub<Period> for NaiveDate {
    type Output = Self;

    fn sub(self, period: Period) -> Self {
        self + (-period)
    }
}
