use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::constdaycounterdominator::ConstDayCounterDominator;
use super::numerator::actualnumerator::ActualNumerator;
use super::numerator::thirtynumerator::ThirtyNumerator;

pub trait DayCounterNumerator: Send + Sync {
    fn days_between(&self, d1: NaiveDate, d2: NaiveDate) -> f64;
}

pub trait DayCounterDominator: Send + Sync {
    fn year_fraction(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        numerator: &Arc<dyn DayCounterNumerator>,
    ) -> f64;
}

/// Market day-count conventions the crate knows how to assemble.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum DayCounterConvention {
    Actual360,
    Actual365Fixed,
    Thirty360BondBasis,
    Thirty360European,
}

impl DayCounterConvention {
    pub fn name(&self) -> &'static str {
        match self {
            DayCounterConvention::Actual360 => "Actual/360",
            DayCounterConvention::Actual365Fixed => "Actual/365 (Fixed)",
            DayCounterConvention::Thirty360BondBasis => "30/360 (Bond Basis)",
            DayCounterConvention::Thirty360European => "30E/360 (Eurobond Basis)",
        }
    }
}

/// Year fraction as a day-count numerator over a dominator.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "DayCounterConvention", into = "DayCounterConvention")]
pub struct DayCounter {
    convention: DayCounterConvention,
    numerator: Arc<dyn DayCounterNumerator>,
    dominator: Arc<dyn DayCounterDominator>,
}

impl DayCounter {
    pub fn new(convention: DayCounterConvention) -> DayCounter {
        let (numerator, dominator): (Arc<dyn DayCounterNumerator>, f64) = match convention {
            DayCounterConvention::Actual360 => (Arc::new(ActualNumerator::new()), 360.0),
            DayCounterConvention::Actual365Fixed => (Arc::new(ActualNumerator::new()), 365.0),
            DayCounterConvention::Thirty360BondBasis => (Arc::new(ThirtyNumerator::bond_basis()), 360.0),
            DayCounterConvention::Thirty360European => (Arc::new(ThirtyNumerator::european()), 360.0),
        };
        DayCounter {
            convention,
            numerator,
            dominator: Arc::new(ConstDayCounterDominator::new(dominator)),
        }
    }

    pub fn actual_360() -> DayCounter {
        DayCounter::new(DayCounterConvention::Actual360)
    }

    pub fn actual_365_fixed() -> DayCounter {
        DayCounter::new(DayCounterConvention::Actual365Fixed)
    }

    pub fn thirty_360() -> DayCounter {
        DayCounter::new(DayCounterConvention::Thirty360BondBasis)
    }

    pub fn convention(&self) -> DayCounterConvention {
        self.convention
    }

    pub fn day_count(&self, d1: NaiveDate, d2: NaiveDate) -> f64 {
        if d1 <= d2 {
            self.numerator.days_between(d1, d2)
        } else {
            -self.numerator.days_between(d2, d1)
        }
    }

    /// Antisymmetric: `year_fraction(d2, d1) == -year_fraction(d1, d2)`.
    pub fn year_fraction(&self, d1: NaiveDate, d2: NaiveDate) -> f64 {
        if d1 == d2 {
            0.0
        } else if d1 > d2 {
            -self.dominator.year_fraction(d2, d1, &self.numerator)
        } else {
            self.dominator.year_fraction(d1, d2, &self.numerator)
        }
    }
}

impl From<DayCounterConvention> for DayCounter {
    fn from(convention: DayCounterConvention) -> Self {
        DayCounter::new(convention)
    }
}

impl From<DayCounter> for DayCounterConvention {
    fn from(day_counter: DayCounter) -> Self {
        day_counter.convention
    }
}

impl PartialEq for DayCounter {
    fn eq(&self, other: &Self) -> bool {
        self.convention == other.convention
    }
}

impl fmt::Debug for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DayCounter").field(&self.convention).finish()
    }
}

impl fmt::Display for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.convention.name())
    }
}
