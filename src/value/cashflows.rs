use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Mul, MulAssign};

use chrono::NaiveDate;

use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;

/// Amounts by payment date. Flows on the same date are netted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashFlows {
    flows: BTreeMap<NaiveDate, f64>,
}

impl CashFlows {
    pub fn new() -> CashFlows {
        CashFlows { flows: BTreeMap::new() }
    }

    pub fn add_flow(&mut self, date: NaiveDate, amount: f64) {
        *self.flows.entry(date).or_insert(0.0) += amount;
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.flows.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.flows.iter().map(|(date, amount)| (*date, *amount))
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.flows.values().sum()
    }

    /// Present value at the curve's reference date.
    pub fn npv<C: DiscountCurve + ?Sized>(&self, curve: &C) -> Result<f64, CurveError> {
        self.flows
            .iter()
            .map(|(date, amount)| -> Result<f64, CurveError> { Ok(amount * curve.discount(*date)?) })
            .sum()
    }
}

impl FromIterator<(NaiveDate, f64)> for CashFlows {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut flows = CashFlows::new();
        for (date, amount) in iter {
            flows.add_flow(date, amount);
        }
        flows
    }
}

impl AddAssign<CashFlows> for CashFlows {
    fn add_assign(&mut self, rhs: CashFlows) {
        for (date, amount) in rhs.flows {
            self.add_flow(date, amount);
        }
    }
}

impl Add<CashFlows> for CashFlows {
    type Output = CashFlows;

    fn add(mut self, rhs: CashFlows) -> Self::Output {
        self += rhs;
        self
    }
}

impl MulAssign<f64> for CashFlows {
    fn mul_assign(&mut self, rhs: f64) {
        for val in self.flows.values_mut() {
            *val *= rhs;
        }
    }
}

impl Mul<f64> for CashFlows {
    type Output = CashFlows;
    fn mul(mut self, rhs: f64) -> Self::Output {
        self *= rhs;
        self
    }
}
