use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum QuoteError {
    #[error("quote value must be finite, got {value}")]
    InvalidValue { value: f64 },
}
