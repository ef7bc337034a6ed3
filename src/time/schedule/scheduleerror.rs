use chrono::NaiveDate;
use thiserror::Error;

use crate::time::period::Period;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule end {end} is not after start {start}")]
    EmptySchedule { start: NaiveDate, end: NaiveDate },
    #[error("frequency {0} does not move dates forward")]
    InvalidFrequency(Period),
    #[error("date arithmetic overflowed rolling {start} by {step}")]
    DateOverflow { start: NaiveDate, step: Period },
}
