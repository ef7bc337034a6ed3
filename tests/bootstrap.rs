use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use ratecurve::configuration::{Configuration, ConfigurationError, CurveDefinition};
use ratecurve::market::market::Market;
use ratecurve::model::interestrate::curveerror::CurveError;
use ratecurve::model::interestrate::flatforwardcurve::FlatForwardCurve;
use ratecurve::model::interestrate::interestratecurve::{DiscountCurve, InterestRateCurve};
use ratecurve::model::interestrate::piecewiseflatforward::PiecewiseFlatForward;
use ratecurve::model::interestrate::termstructurehandle::TermStructureHandle;
use ratecurve::time::daycounter::daycounter::DayCounter;
use ratecurve::time::period::Period;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn default_curves() -> (Market, Vec<Rc<PiecewiseFlatForward>>) {
    let config = Configuration::default();
    let market = Market::new(&config.market).unwrap();
    let curves = config
        .curves
        .iter()
        .map(|definition| market.build_curve(definition, config.bootstrap).unwrap())
        .collect();
    (market, curves)
}

#[test]
fn every_helper_reprices_on_both_curves() {
    let (_, curves) = default_curves();
    for curve in &curves {
        assert_eq!(curve.reference_date(), ymd(2001, 11, 8));
        for helper in curve.helpers() {
            assert_abs_diff_eq!(
                helper.implied_quote(&**curve).unwrap(),
                helper.quoted_value(),
                epsilon = 1e-8
            );
        }
        assert_eq!(curve.solve_count(), 1);
    }
}

#[test]
fn repeated_reads_are_identical() {
    let (_, curves) = default_curves();
    let curve = &curves[1];
    let dates = [ymd(2002, 5, 8), ymd(2006, 11, 8), ymd(2016, 11, 8)];
    let first: Vec<f64> = dates.iter().map(|d| curve.discount(*d).unwrap()).collect();
    for _ in 0..3 {
        let again: Vec<f64> = dates.iter().map(|d| curve.discount(*d).unwrap()).collect();
        assert_eq!(again, first);
    }
    assert_eq!(curve.solve_count(), 1);
}

#[test]
fn only_a_changed_quote_triggers_a_new_bootstrap() {
    let (market, curves) = default_curves();
    let five_year = market.swap_quote(Period::years(5)).unwrap();
    let d = ymd(2006, 11, 8);
    let before: Vec<f64> = curves.iter().map(|c| c.discount(d).unwrap()).collect();

    five_year.set_value(0.0443).unwrap();
    for curve in &curves {
        assert!(curve.is_solved());
        assert_eq!(curve.solve_count(), 1);
    }

    five_year.set_value(0.046).unwrap();
    for (curve, old) in curves.iter().zip(&before) {
        assert!(!curve.is_solved());
        assert!(curve.discount(d).unwrap() < *old);
        assert_eq!(curve.solve_count(), 2);
    }
    let two_year = ymd(2003, 11, 10);
    let refreshed = curves[1].discount(two_year).unwrap();
    five_year.set_value(0.0443).unwrap();
    assert_abs_diff_eq!(curves[1].discount(two_year).unwrap(), refreshed, epsilon = 1e-12);
}

#[test]
fn relinking_a_handle_switches_curves() {
    let (_, curves) = default_curves();
    let flat = FlatForwardCurve::new(ymd(2001, 11, 8), 0.10, DayCounter::actual_365_fixed());
    let handle = TermStructureHandle::with_curve(curves[0].clone());
    let d = ymd(2005, 11, 8);

    assert_eq!(handle.discount(d).unwrap(), curves[0].discount(d).unwrap());
    handle.link_to(flat.clone());
    assert_eq!(handle.discount(d).unwrap(), flat.discount(d).unwrap());
    assert!((handle.discount(d).unwrap() - curves[0].discount(d).unwrap()).abs() > 1e-3);
    handle.link_to(curves[1].clone());
    assert_eq!(handle.discount(d).unwrap(), curves[1].discount(d).unwrap());
    assert_eq!(handle.reference_date().unwrap(), curves[1].reference_date());
}

#[test]
fn duplicate_maturities_fail_at_construction() {
    let config = Configuration::default();
    let market = Market::new(&config.market).unwrap();
    let clashing = CurveDefinition {
        name: "clashing".to_owned(),
        deposits: vec![Period::weeks(1), Period::months(6)],
        fras: vec![[3, 6]],
        futures: Vec::new(),
        swaps: Vec::new(),
    };
    match market.build_curve(&clashing, config.bootstrap) {
        Err(ConfigurationError::Curve(CurveError::DuplicateMaturity { date })) => {
            assert_eq!(date, ymd(2002, 5, 8));
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("curve with two helpers maturing together was built"),
    }
}

#[test]
fn unsolvable_quote_names_its_maturity() {
    let (market, curves) = default_curves();
    market
        .deposit_quote(Period::months(1))
        .unwrap()
        .set_value(-0.5)
        .unwrap();

    for curve in &curves {
        match curve.discount(ymd(2002, 11, 8)) {
            Err(CurveError::BootstrapFailure { maturity, .. }) => assert_eq!(maturity, ymd(2001, 12, 10)),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!curve.is_solved());
    }

    market
        .deposit_quote(Period::months(1))
        .unwrap()
        .set_value(0.0372)
        .unwrap();
    for curve in &curves {
        assert!(curve.discount(ymd(2002, 11, 8)).is_ok());
        assert_eq!(curve.max_date(), Some(curve.helpers().last().unwrap().maturity_date()));
    }
}
