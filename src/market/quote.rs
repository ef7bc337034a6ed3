use std::cell::Cell;

use tracing::trace;

use crate::market::quoteerror::QuoteError;
use crate::observer::observer::{Observable, ObserverList};

/// A mutable market value shared through `Rc<SimpleQuote>`.
///
/// Two quotes holding the same number are still different quotes: identity
/// is the allocation, not the value.
#[derive(Debug)]
pub struct SimpleQuote {
    value: Cell<f64>,
    observers: ObserverList,
}

impl SimpleQuote {
    pub fn new(value: f64) -> Result<SimpleQuote, QuoteError> {
        check_finite(value)?;
        Ok(SimpleQuote {
            value: Cell::new(value),
            observers: ObserverList::new(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Stores `value` and notifies observers when it differs from the current one.
    ///
    /// Writing the current value again is a no-op. A non-finite value is
    /// rejected and leaves the quote untouched.
    pub fn set_value(&self, value: f64) -> Result<(), QuoteError> {
        check_finite(value)?;
        let previous = self.value.replace(value);
        if previous != value {
            trace!(previous, value, "quote changed");
            self.notify_observers();
        }
        Ok(())
    }
}

pub(crate) fn check_finite(value: f64) -> Result<(), QuoteError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(QuoteError::InvalidValue { value })
    }
}

impl Observable for SimpleQuote {
    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}
