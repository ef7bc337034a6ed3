use chrono::NaiveDate;
use thiserror::Error;

use crate::model::interestrate::curveerror::CurveError;
use crate::time::schedule::scheduleerror::ScheduleError;

#[derive(Debug, Error, PartialEq)]
pub enum InstrumentError {
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("no {index} fixing stored for {date}")]
    MissingFixing { index: String, date: NaiveDate },
    #[error("{leg} leg has no coupon left to price")]
    NoRemainingCoupons { leg: &'static str },
}
