use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::instrument::instrumenterror::InstrumentError;
use crate::instrument::leg::coupon::BASIS_POINT;
use crate::instrument::leg::fixedrateleg::FixedRateLeg;
use crate::instrument::leg::floatingrateleg::FloatingRateLeg;
use crate::instrument::ratehelper::swapratehelper::SwapConventions;
use crate::interestrate::index::iborindex::IborIndex;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::termstructurehandle::TermStructureHandle;
use crate::observer::observer::{Observable, Observer, ObserverList};
use crate::time::businessdayadjuster::{BusinessDayAdjuster, BusinessDayConvention};
use crate::time::period::Period;
use crate::time::schedule::generationdirection::GenerationDirection;
use crate::time::schedule::schedule::ScheduleGenerator;
use crate::time::schedule::scheduleerror::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapType {
    /// Pays the fixed leg, receives the floating leg.
    Payer,
    Receiver,
}

impl SwapType {
    fn fixed_leg_sign(&self) -> f64 {
        match self {
            SwapType::Payer => -1.0,
            SwapType::Receiver => 1.0,
        }
    }
}

/// Everything one pricing pass produces, signed from the holder's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapResults {
    pub npv: f64,
    pub fixed_leg_npv: f64,
    pub floating_leg_npv: f64,
    pub fixed_leg_bps: f64,
    pub floating_leg_bps: f64,
    pub fair_rate: f64,
    pub fair_spread: f64,
}

/// Fixed-vs-Ibor swap priced off two relinkable handles.
///
/// The floating leg is forecast on the index's handle and both legs are
/// discounted on `discount_handle`. Results are cached until either handle,
/// the curves behind them, or the index fixings change.
pub struct VanillaSwap {
    swap_type: SwapType,
    fixed_leg: FixedRateLeg,
    floating_leg: FloatingRateLeg,
    discount_handle: Rc<TermStructureHandle>,
    evaluation_date: NaiveDate,
    results: RefCell<Option<SwapResults>>,
    calculation_count: Cell<usize>,
    observers: ObserverList,
}

impl VanillaSwap {
    pub fn new(
        swap_type: SwapType,
        fixed_leg: FixedRateLeg,
        floating_leg: FloatingRateLeg,
        discount_handle: Rc<TermStructureHandle>,
        evaluation_date: NaiveDate,
    ) -> Rc<VanillaSwap> {
        let swap = Rc::new(VanillaSwap {
            swap_type,
            fixed_leg,
            floating_leg,
            discount_handle,
            evaluation_date,
            results: RefCell::new(None),
            calculation_count: Cell::new(0),
            observers: ObserverList::new(),
        });
        let as_observer: Rc<dyn Observer> = swap.clone();
        let weak: Weak<dyn Observer> = Rc::downgrade(&as_observer);
        swap.discount_handle.subscribe(weak.clone());
        swap.floating_leg.index().subscribe(weak);
        swap
    }

    /// Swap starting on `start_date` and running `tenor`, laid out with the
    /// same conventions a par swap quote uses. The floating leg fixes
    /// `index.fixing_days()` business days before each accrual start.
    pub fn with_conventions(
        swap_type: SwapType,
        nominal: f64,
        start_date: NaiveDate,
        tenor: Period,
        fixed_rate: f64,
        spread: f64,
        conventions: &SwapConventions,
        index: Rc<IborIndex>,
        discount_handle: Rc<TermStructureHandle>,
        evaluation_date: NaiveDate,
    ) -> Result<Rc<VanillaSwap>, ScheduleError> {
        let calendar = index.calendar().clone();
        let fixed_accrual_adjuster = if conventions.fixed_leg_adjusted {
            conventions.adjuster
        } else {
            BusinessDayAdjuster::new(BusinessDayConvention::Unadjusted, false)
        };
        let fixed_schedule = ScheduleGenerator::new(
            conventions.fixed_frequency,
            fixed_accrual_adjuster,
            conventions.adjuster,
            GenerationDirection::Backward,
            0,
        )
        .generate_from_tenor(start_date, tenor, &calendar)?;
        let floating_schedule = ScheduleGenerator::new(
            conventions.floating_frequency,
            conventions.adjuster,
            conventions.adjuster,
            GenerationDirection::Backward,
            index.fixing_days(),
        )
        .generate_from_tenor(start_date, tenor, &calendar)?;

        let fixed_leg = FixedRateLeg::new(fixed_schedule, nominal, fixed_rate, conventions.fixed_day_counter.clone());
        let floating_leg = FloatingRateLeg::new(floating_schedule, nominal, index, spread);
        Ok(VanillaSwap::new(swap_type, fixed_leg, floating_leg, discount_handle, evaluation_date))
    }

    pub fn swap_type(&self) -> SwapType {
        self.swap_type
    }

    pub fn fixed_leg(&self) -> &FixedRateLeg {
        &self.fixed_leg
    }

    pub fn floating_leg(&self) -> &FloatingRateLeg {
        &self.floating_leg
    }

    pub fn nominal(&self) -> f64 {
        self.fixed_leg.nominal()
    }

    pub fn fixed_rate(&self) -> f64 {
        self.fixed_leg.rate()
    }

    pub fn spread(&self) -> f64 {
        self.floating_leg.spread()
    }

    pub fn evaluation_date(&self) -> NaiveDate {
        self.evaluation_date
    }

    pub fn discount_handle(&self) -> &Rc<TermStructureHandle> {
        &self.discount_handle
    }

    /// Number of pricing passes run so far.
    pub fn calculation_count(&self) -> usize {
        self.calculation_count.get()
    }

    pub fn results(&self) -> Result<SwapResults, InstrumentError> {
        if let Some(results) = *self.results.borrow() {
            return Ok(results);
        }
        let results = self.calculate()?;
        self.results.replace(Some(results));
        self.calculation_count.set(self.calculation_count.get() + 1);
        debug!(
            npv = results.npv,
            fair_rate = results.fair_rate,
            calculation_count = self.calculation_count.get(),
            "swap recalculated"
        );
        Ok(results)
    }

    pub fn npv(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.npv)
    }

    /// Fixed rate that sets the NPV to zero.
    pub fn fair_rate(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.fair_rate)
    }

    /// Floating spread that sets the NPV to zero.
    pub fn fair_spread(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.fair_spread)
    }

    pub fn fixed_leg_npv(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.fixed_leg_npv)
    }

    pub fn floating_leg_npv(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.floating_leg_npv)
    }

    pub fn fixed_leg_bps(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.fixed_leg_bps)
    }

    pub fn floating_leg_bps(&self) -> Result<f64, InstrumentError> {
        Ok(self.results()?.floating_leg_bps)
    }

    fn calculate(&self) -> Result<SwapResults, InstrumentError> {
        // One read of each handle for the whole pass.
        let discount = self.discount_handle.current_link().ok_or(CurveError::NoCurveLinked)?;
        let forecast = self
            .floating_leg
            .index()
            .forecast_handle()
            .current_link()
            .ok_or(CurveError::NoCurveLinked)?;

        let fixed_sign = self.swap_type.fixed_leg_sign();
        let floating_sign = -fixed_sign;

        let reference_date = discount.reference_date();
        let fixed_flows = self.fixed_leg.cash_flows(reference_date) * fixed_sign;
        let floating_flows = self
            .floating_leg
            .cash_flows(&*forecast, self.evaluation_date, reference_date)?
            * floating_sign;

        let fixed_leg_npv = fixed_flows.npv(&*discount)?;
        let fixed_leg_bps = fixed_sign * self.fixed_leg.bps(&*discount)?;
        let floating_leg_npv = floating_flows.npv(&*discount)?;
        let floating_leg_bps = floating_sign * self.floating_leg.bps(&*discount)?;

        if fixed_leg_bps == 0.0 {
            return Err(InstrumentError::NoRemainingCoupons { leg: "fixed" });
        }
        if floating_leg_bps == 0.0 {
            return Err(InstrumentError::NoRemainingCoupons { leg: "floating" });
        }

        // Both legs netted by payment date.
        let npv = (fixed_flows + floating_flows).npv(&*discount)?;
        Ok(SwapResults {
            npv,
            fixed_leg_npv,
            floating_leg_npv,
            fixed_leg_bps,
            floating_leg_bps,
            fair_rate: self.fixed_rate() - npv / (fixed_leg_bps / BASIS_POINT),
            fair_spread: self.spread() - npv / (floating_leg_bps / BASIS_POINT),
        })
    }
}

impl Observable for VanillaSwap {
    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}

impl Observer for VanillaSwap {
    fn update(&self) {
        if self.results.replace(None).is_some() {
            debug!("swap results invalidated");
        }
        self.notify_observers();
    }
}
