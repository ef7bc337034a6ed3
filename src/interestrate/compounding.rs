use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compounding {
    Simple,
    Continuous,
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
}

impl Compounding {
    fn get_frequency(&self) -> f64 {
        match self {
            Compounding::Annual => 1.0,
            Compounding::Semiannual => 2.0,
            Compounding::Quarterly => 4.0,
            Compounding::Monthly => 12.0,
            Compounding::Simple | Compounding::Continuous => 0.0,
        }
    }

    /// Growth of one unit invested at `rate` for `tau` years.
    pub fn future_value(&self, rate: f64, tau: f64) -> f64 {
        match self {
            Compounding::Simple => 1.0 + rate * tau,
            Compounding::Continuous => (rate * tau).exp(),
            _ => {
                let freq = self.get_frequency();
                (1.0 + rate / freq).powf(tau * freq)
            }
        }
    }

    pub fn discount_factor(&self, rate: f64, tau: f64) -> f64 {
        1.0 / self.future_value(rate, tau)
    }

    /// Rate that grows one unit to `future_value` over `tau` years; `tau` must be non-zero.
    pub fn implied_rate(&self, future_value: f64, tau: f64) -> f64 {
        match self {
            Compounding::Simple => (future_value - 1.0) / tau,
            Compounding::Continuous => future_value.ln() / tau,
            _ => {
                let freq = self.get_frequency();
                (future_value.powf(1.0 / (tau * freq)) - 1.0) * freq
            }
        }
    }
}
