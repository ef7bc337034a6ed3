use argmin::core::{CostFunction, Error as ArgminError, Executor, State, TerminationReason};
use argmin::solver::brent::BrentRoot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError<E: std::error::Error + 'static> {
    #[error("root not bracketed: f({min}) = {f_min}, f({max}) = {f_max}")]
    NoBracket { min: f64, max: f64, f_min: f64, f_max: f64 },
    #[error("no convergence after {iterations} iterations (last x = {x}, f(x) = {fx})")]
    MaxIterations { iterations: u64, x: f64, fx: f64 },
    #[error("objective function failed")]
    Objective(#[source] E),
    #[error("root finder failed: {0}")]
    Solver(String),
}

struct Objective<'a, F> {
    f: &'a F,
}

impl<F, E> CostFunction for Objective<'_, F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, ArgminError> {
        Ok((self.f)(*x)?)
    }
}

/// Brent's bracketing root finder with an iteration budget.
#[derive(Debug, Clone, Copy)]
pub struct BrentSolver {
    accuracy: f64,
    max_iterations: u64,
}

impl BrentSolver {
    pub fn new(accuracy: f64, max_iterations: u64) -> BrentSolver {
        BrentSolver {
            accuracy,
            max_iterations,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Root of `f` inside `[min, max]`.
    ///
    /// `f(min)` and `f(max)` must have opposite signs (or one of them be zero).
    pub fn solve<F, E>(&self, f: F, min: f64, max: f64) -> Result<f64, SolverError<E>>
    where
        F: Fn(f64) -> Result<f64, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let f_min = f(min).map_err(SolverError::Objective)?;
        if f_min == 0.0 {
            return Ok(min);
        }
        let f_max = f(max).map_err(SolverError::Objective)?;
        if f_max == 0.0 {
            return Ok(max);
        }
        if f_min.signum() == f_max.signum() || !(f_min * f_max).is_finite() {
            return Err(SolverError::NoBracket { min, max, f_min, f_max });
        }

        let result = Executor::new(Objective { f: &f }, BrentRoot::new(min, max, self.accuracy))
            .configure(|state| state.max_iters(self.max_iterations))
            .run()
            .map_err(|err| match err.downcast::<E>() {
                Ok(inner) => SolverError::Objective(inner),
                Err(other) => SolverError::Solver(other.to_string()),
            })?;

        let state = result.state();
        let x = state
            .get_param()
            .copied()
            .ok_or_else(|| SolverError::Solver("solver finished without an estimate".to_owned()))?;
        if matches!(state.get_termination_reason(), Some(TerminationReason::MaxItersReached)) {
            let fx = f(x).map_err(SolverError::Objective)?;
            return Err(SolverError::MaxIterations {
                iterations: state.get_iter(),
                x,
                fx,
            });
        }
        Ok(x)
    }
}
