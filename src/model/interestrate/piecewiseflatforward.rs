use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::instrument::ratehelper::ratehelper::RateHelper;
use crate::math::solver::brentsolver::{BrentSolver, SolverError};
use crate::model::interestrate::bootstrapsettings::BootstrapSettings;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::flatforwardnodes::FlatForwardNodes;
use crate::model::interestrate::interestratecurve::{DiscountCurve, InterestRateCurve};
use crate::observer::observer::{Observable, Observer, ObserverList};
use crate::time::daycounter::daycounter::DayCounter;

enum BootstrapState {
    Unsolved,
    Solving,
    Solved(Rc<FlatForwardNodes>),
}

/// Discount curve bootstrapped from rate helpers, one node per helper maturity.
///
/// Nodes are solved lazily on the first read after construction or after any
/// helper quote changes. Each solve fits the nodes in maturity order: earlier
/// nodes stay fixed while the discount factor at the next pillar is searched
/// until its helper reprices. Between nodes the curve is flat-forward.
pub struct PiecewiseFlatForward {
    reference_date: NaiveDate,
    helpers: Vec<RateHelper>,
    day_counter: DayCounter,
    settings: BootstrapSettings,
    state: RefCell<BootstrapState>,
    solve_count: Cell<usize>,
    observers: ObserverList,
}

impl PiecewiseFlatForward {
    pub fn new(
        reference_date: NaiveDate,
        mut helpers: Vec<RateHelper>,
        day_counter: DayCounter,
        settings: BootstrapSettings,
    ) -> Result<Rc<PiecewiseFlatForward>, CurveError> {
        if helpers.is_empty() {
            return Err(CurveError::NoHelpers);
        }
        helpers.sort_by_key(RateHelper::maturity_date);

        let mut previous: Option<(NaiveDate, f64)> = None;
        for helper in &helpers {
            let maturity = helper.maturity_date();
            if maturity <= reference_date {
                return Err(CurveError::MaturityNotAfterReference {
                    maturity,
                    reference_date,
                });
            }
            let t = day_counter.year_fraction(reference_date, maturity);
            if let Some((date, time)) = previous {
                if date == maturity {
                    return Err(CurveError::DuplicateMaturity { date: maturity });
                }
                if t <= time {
                    return Err(CurveError::CoincidentCurveTimes {
                        first: date,
                        second: maturity,
                    });
                }
            }
            previous = Some((maturity, t));
        }

        let curve = Rc::new(PiecewiseFlatForward {
            reference_date,
            helpers,
            day_counter,
            settings,
            state: RefCell::new(BootstrapState::Unsolved),
            solve_count: Cell::new(0),
            observers: ObserverList::new(),
        });
        let as_observer: Rc<dyn Observer> = curve.clone();
        let weak: Weak<dyn Observer> = Rc::downgrade(&as_observer);
        for helper in &curve.helpers {
            helper.quote().subscribe(weak.clone());
        }
        debug!(
            reference_date = %curve.reference_date,
            helpers = curve.helpers.len(),
            "piecewise flat forward curve created"
        );
        Ok(curve)
    }

    /// Helpers in maturity order.
    pub fn helpers(&self) -> &[RateHelper] {
        &self.helpers
    }

    pub fn settings(&self) -> &BootstrapSettings {
        &self.settings
    }

    /// Number of completed bootstrap passes.
    pub fn solve_count(&self) -> usize {
        self.solve_count.get()
    }

    pub fn is_solved(&self) -> bool {
        matches!(*self.state.borrow(), BootstrapState::Solved(_))
    }

    /// Current solution, bootstrapping first if a quote changed since the last one.
    pub fn nodes(&self) -> Result<Rc<FlatForwardNodes>, CurveError> {
        match &*self.state.borrow() {
            BootstrapState::Solved(nodes) => return Ok(Rc::clone(nodes)),
            BootstrapState::Solving => return Err(CurveError::BootstrapInProgress),
            BootstrapState::Unsolved => {}
        }

        self.state.replace(BootstrapState::Solving);
        match self.bootstrap() {
            Ok(nodes) => {
                let nodes = Rc::new(nodes);
                self.state.replace(BootstrapState::Solved(Rc::clone(&nodes)));
                self.solve_count.set(self.solve_count.get() + 1);
                info!(
                    reference_date = %self.reference_date,
                    nodes = nodes.dates().len(),
                    solve_count = self.solve_count.get(),
                    "bootstrap completed"
                );
                Ok(nodes)
            }
            Err(err) => {
                self.state.replace(BootstrapState::Unsolved);
                warn!(reference_date = %self.reference_date, error = %err, "bootstrap failed");
                Err(err)
            }
        }
    }

    /// Node dates, the reference date first.
    pub fn node_dates(&self) -> Result<Vec<NaiveDate>, CurveError> {
        Ok(self.nodes()?.dates().to_vec())
    }

    fn bootstrap(&self) -> Result<FlatForwardNodes, CurveError> {
        let solver = BrentSolver::new(self.settings.accuracy, self.settings.max_iterations);
        let mut dates = Vec::with_capacity(self.helpers.len() + 1);
        let mut discounts = Vec::with_capacity(self.helpers.len() + 1);
        dates.push(self.reference_date);
        discounts.push(1.0);

        for helper in &self.helpers {
            let maturity = helper.maturity_date();
            let trial = |df: f64| {
                let mut trial_dates = dates.clone();
                trial_dates.push(maturity);
                let mut trial_discounts = discounts.clone();
                trial_discounts.push(df);
                FlatForwardNodes::new(self.day_counter.clone(), trial_dates, trial_discounts, true)
            };
            let residual = |df: f64| helper.quote_error(&trial(df)?);

            let df = solver
                .solve(residual, self.settings.min_discount, self.settings.max_discount)
                .map_err(|err| bootstrap_failure(helper, solver_reason(err)))?;

            let error = helper.quote_error(&trial(df)?)?;
            let tolerance = self.settings.residual_tolerance * helper.quoted_value().abs().max(1.0);
            if !(error.abs() <= tolerance) {
                return Err(bootstrap_failure(
                    helper,
                    format!("residual {error:e} exceeds tolerance {tolerance:e}"),
                ));
            }
            dates.push(maturity);
            discounts.push(df);
        }

        FlatForwardNodes::new(
            self.day_counter.clone(),
            dates,
            discounts,
            self.settings.allow_extrapolation,
        )
    }
}

fn bootstrap_failure(helper: &RateHelper, reason: String) -> CurveError {
    CurveError::BootstrapFailure {
        maturity: helper.maturity_date(),
        helper: helper.to_string(),
        reason,
    }
}

fn solver_reason(err: SolverError<CurveError>) -> String {
    match err {
        SolverError::Objective(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

impl DiscountCurve for PiecewiseFlatForward {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn discount(&self, d: NaiveDate) -> Result<f64, CurveError> {
        self.nodes()?.discount(d)
    }
}

impl Observable for PiecewiseFlatForward {
    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}

impl InterestRateCurve for PiecewiseFlatForward {
    fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    fn max_date(&self) -> Option<NaiveDate> {
        if self.settings.allow_extrapolation {
            None
        } else {
            self.helpers.last().map(RateHelper::maturity_date)
        }
    }
}

impl Observer for PiecewiseFlatForward {
    fn update(&self) {
        let previous = self.state.replace(BootstrapState::Unsolved);
        debug!(
            reference_date = %self.reference_date,
            was_solved = matches!(previous, BootstrapState::Solved(_)),
            "piecewise curve invalidated"
        );
        self.notify_observers();
    }
}
