use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::NaiveDate;
use tracing::debug;

use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::InterestRateCurve;
use crate::observer::observer::{Observable, Observer, ObserverList};

/// Relinkable indirection to an interest rate curve.
///
/// Instruments hold the handle, not the curve, so the curve behind them can
/// be swapped with [`link_to`](TermStructureHandle::link_to). Notifications
/// from the linked curve are forwarded to the handle's observers.
pub struct TermStructureHandle {
    link: RefCell<Option<Rc<dyn InterestRateCurve>>>,
    self_weak: Weak<TermStructureHandle>,
    observers: ObserverList,
}

impl TermStructureHandle {
    pub fn new() -> Rc<TermStructureHandle> {
        Rc::new_cyclic(|self_weak| TermStructureHandle {
            link: RefCell::new(None),
            self_weak: self_weak.clone(),
            observers: ObserverList::new(),
        })
    }

    pub fn with_curve(curve: Rc<dyn InterestRateCurve>) -> Rc<TermStructureHandle> {
        let handle = TermStructureHandle::new();
        handle.link_to(curve);
        handle
    }

    fn as_observer(&self) -> Weak<dyn Observer> {
        self.self_weak.clone()
    }

    /// Points the handle at `curve` and notifies observers. Nothing is computed here.
    pub fn link_to(&self, curve: Rc<dyn InterestRateCurve>) {
        let observer = self.as_observer();
        let previous = self.link.replace(Some(Rc::clone(&curve)));
        if let Some(previous) = &previous {
            previous.unsubscribe(&observer);
        }
        curve.subscribe(observer);
        debug!(
            reference_date = %curve.reference_date(),
            relinked = previous.is_some(),
            "term structure handle linked"
        );
        self.notify_observers();
    }

    /// The linked curve, if any. Holding it keeps one evaluation on a single curve.
    pub fn current_link(&self) -> Option<Rc<dyn InterestRateCurve>> {
        self.link.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.link.borrow().is_none()
    }

    pub fn reference_date(&self) -> Result<NaiveDate, CurveError> {
        Ok(self.linked()?.reference_date())
    }

    pub fn discount(&self, d: NaiveDate) -> Result<f64, CurveError> {
        self.linked()?.discount(d)
    }

    fn linked(&self) -> Result<Rc<dyn InterestRateCurve>, CurveError> {
        self.current_link().ok_or(CurveError::NoCurveLinked)
    }
}

impl Drop for TermStructureHandle {
    fn drop(&mut self) {
        if let Some(curve) = self.link.get_mut().take() {
            curve.unsubscribe(&self.as_observer());
        }
    }
}

impl Observable for TermStructureHandle {
    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}

impl Observer for TermStructureHandle {
    fn update(&self) {
        self.notify_observers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::quote::SimpleQuote;
    use crate::model::interestrate::flatforwardcurve::FlatForwardCurve;
    use crate::model::interestrate::interestratecurve::DiscountCurve;
    use crate::time::daycounter::daycounter::DayCounter;
    use std::cell::Cell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[derive(Default)]
    struct Counter {
        hits: Cell<usize>,
    }

    impl Observer for Counter {
        fn update(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    fn watch(handle: &TermStructureHandle) -> Rc<Counter> {
        let counter = Rc::new(Counter::default());
        let as_observer: Rc<dyn Observer> = counter.clone();
        handle.subscribe(Rc::downgrade(&as_observer));
        counter
    }

    #[test]
    fn empty_handle_has_no_curve() {
        let handle = TermStructureHandle::new();
        assert!(handle.is_empty());
        assert_eq!(handle.discount(ymd(2002, 1, 1)), Err(CurveError::NoCurveLinked));
    }

    #[test]
    fn relinking_switches_curves_and_notifies() {
        let reference = ymd(2001, 11, 8);
        let low = FlatForwardCurve::new(reference, 0.03, DayCounter::actual_360());
        let high = FlatForwardCurve::new(reference, 0.06, DayCounter::actual_360());
        let handle = TermStructureHandle::with_curve(low.clone());
        let counter = watch(&handle);

        let date = ymd(2003, 11, 10);
        assert_eq!(handle.discount(date).unwrap(), low.discount(date).unwrap());

        handle.link_to(high.clone());
        assert_eq!(counter.hits.get(), 1);
        assert_eq!(handle.discount(date).unwrap(), high.discount(date).unwrap());
        assert!(low.observers().is_empty());
        assert_eq!(high.observers().len(), 1);
    }

    #[test]
    fn forwards_curve_notifications() {
        let quote = Rc::new(SimpleQuote::new(0.03).unwrap());
        let curve = FlatForwardCurve::from_quote(ymd(2001, 11, 8), quote.clone(), DayCounter::actual_360());
        let handle = TermStructureHandle::with_curve(curve);
        let counter = watch(&handle);

        quote.set_value(0.031).unwrap();
        assert_eq!(counter.hits.get(), 1);
    }

    #[test]
    fn dropped_handle_leaves_curve() {
        let curve = FlatForwardCurve::new(ymd(2001, 11, 8), 0.03, DayCounter::actual_360());
        {
            let _handle = TermStructureHandle::with_curve(curve.clone());
            assert_eq!(curve.observers().len(), 1);
        }
        assert!(curve.observers().is_empty());
    }
}
