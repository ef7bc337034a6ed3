use serde::{Deserialize, Serialize};

/// Root-finder bounds and tolerances for piecewise bootstrapping.
///
/// Each node's discount factor is searched in `[min_discount, max_discount]`
/// to `accuracy`, for at most `max_iterations` iterations. The solved node
/// must reprice its helper to `residual_tolerance × max(1, |quote|)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapSettings {
    pub accuracy: f64,
    pub max_iterations: u64,
    pub min_discount: f64,
    pub max_discount: f64,
    pub residual_tolerance: f64,
    pub allow_extrapolation: bool,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        BootstrapSettings {
            accuracy: 1e-13,
            max_iterations: 100,
            min_discount: 1e-8,
            max_discount: 1.0,
            residual_tolerance: 1e-10,
            allow_extrapolation: false,
        }
    }
}
