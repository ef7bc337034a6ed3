use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    #[error("no rate helpers given")]
    NoHelpers,
    #[error("two rate helpers mature on {date}")]
    DuplicateMaturity { date: NaiveDate },
    #[error("maturities {first} and {second} fall on the same curve time")]
    CoincidentCurveTimes { first: NaiveDate, second: NaiveDate },
    #[error("helper maturity {maturity} is not after the reference date {reference_date}")]
    MaturityNotAfterReference {
        maturity: NaiveDate,
        reference_date: NaiveDate,
    },
    #[error("bootstrap failed at {maturity} for {helper}: {reason}")]
    BootstrapFailure {
        maturity: NaiveDate,
        helper: String,
        reason: String,
    },
    #[error("curve read while its bootstrap is running")]
    BootstrapInProgress,
    #[error("no curve linked to the handle")]
    NoCurveLinked,
    #[error("{date} is outside the curve range [{min}, {max}]")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
    #[error("invalid discount factor {value} on {date}")]
    InvalidDiscountFactor { date: NaiveDate, value: f64 },
}
