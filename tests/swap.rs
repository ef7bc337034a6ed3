use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use ratecurve::configuration::Configuration;
use ratecurve::instrument::interestrate::vanillaswap::{SwapType, VanillaSwap};
use ratecurve::instrument::ratehelper::depositratehelper::DepositRateHelper;
use ratecurve::instrument::ratehelper::ratehelper::RateHelper;
use ratecurve::instrument::ratehelper::swapratehelper::SwapRateHelper;
use ratecurve::interestrate::index::iborindex::IborIndex;
use ratecurve::market::market::Market;
use ratecurve::market::quote::SimpleQuote;
use ratecurve::model::interestrate::bootstrapsettings::BootstrapSettings;
use ratecurve::model::interestrate::piecewiseflatforward::PiecewiseFlatForward;
use ratecurve::model::interestrate::termstructurehandle::TermStructureHandle;
use ratecurve::time::businessdayadjuster::{BusinessDayAdjuster, BusinessDayConvention};
use ratecurve::time::calendar::target::target_calendar;
use ratecurve::time::daycounter::daycounter::DayCounter;
use ratecurve::time::period::Period;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn par_rate_recovers_the_quoted_two_year_swap() {
    let today = ymd(2001, 11, 6);
    let settlement = ymd(2001, 11, 8);
    let conventions = Configuration::default().market.swap_conventions;

    let deposit: RateHelper = DepositRateHelper::new(
        Rc::new(SimpleQuote::new(0.0372).unwrap()),
        today,
        Period::months(1),
        2,
        target_calendar(),
        BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false),
        DayCounter::actual_360(),
    )
    .into();
    let swap_helper: RateHelper = SwapRateHelper::new(
        Rc::new(SimpleQuote::new(0.037125).unwrap()),
        today,
        Period::years(2),
        target_calendar(),
        conventions.clone(),
    )
    .unwrap()
    .into();

    let curve = PiecewiseFlatForward::new(
        settlement,
        vec![deposit, swap_helper],
        DayCounter::actual_360(),
        BootstrapSettings::default(),
    )
    .unwrap();
    let handle = TermStructureHandle::with_curve(curve.clone());
    let index = IborIndex::euribor(Period::months(6), handle.clone());
    let swap = VanillaSwap::with_conventions(
        SwapType::Payer,
        1_000_000.0,
        settlement,
        Period::years(2),
        0.04,
        0.0,
        &conventions,
        index,
        handle,
        today,
    )
    .unwrap();

    assert_abs_diff_eq!(swap.fair_rate().unwrap(), 0.037125, epsilon = 1e-8);
    assert!(swap.npv().unwrap() < 0.0);
    assert_eq!(curve.solve_count(), 1);
}

struct Report {
    market: Market,
    curves: Vec<Rc<PiecewiseFlatForward>>,
    discount_handle: Rc<TermStructureHandle>,
    forecast_handle: Rc<TermStructureHandle>,
    swap: Rc<VanillaSwap>,
}

fn five_year_report_swap() -> Report {
    let config = Configuration::default();
    let market = Market::new(&config.market).unwrap();
    let curves = config
        .curves
        .iter()
        .map(|definition| market.build_curve(definition, config.bootstrap).unwrap())
        .collect();
    let discount_handle = TermStructureHandle::new();
    let forecast_handle = TermStructureHandle::new();
    let index = IborIndex::euribor(Period::months(6), forecast_handle.clone());
    let swap = VanillaSwap::with_conventions(
        SwapType::Payer,
        1_000_000.0,
        market.settlement_date(),
        Period::years(5),
        0.04,
        0.0,
        market.swap_conventions(),
        index,
        discount_handle.clone(),
        market.evaluation_date(),
    )
    .unwrap();
    Report {
        market,
        curves,
        discount_handle,
        forecast_handle,
        swap,
    }
}

impl Report {
    fn link(&self, curve: usize) {
        self.discount_handle.link_to(self.curves[curve].clone());
        self.forecast_handle.link_to(self.curves[curve].clone());
    }
}

#[test]
fn swap_follows_relinked_handles() {
    let report = five_year_report_swap();
    report.link(0);
    let on_futures = report.swap.results().unwrap();
    report.link(1);
    let on_fras = report.swap.results().unwrap();
    assert!((on_futures.npv - on_fras.npv).abs() > 1e-6);

    report.link(0);
    let again = report.swap.results().unwrap();
    assert_abs_diff_eq!(again.npv, on_futures.npv, epsilon = 1e-9);
    assert_eq!(report.swap.calculation_count(), 3);

    // The 5Y swap is a curve pillar on both curves, so the spot swap is at par
    // at the quoted rate.
    assert_abs_diff_eq!(again.fair_rate, 0.0443, epsilon = 1e-8);
    assert_abs_diff_eq!(on_fras.fair_rate, 0.0443, epsilon = 1e-8);
    assert!(again.npv > 0.0);
}

#[test]
fn moving_the_swap_quote_reprices_the_swap() {
    let report = five_year_report_swap();
    report.link(1);
    let before = report.swap.results().unwrap();
    assert_eq!(report.swap.results().unwrap(), before);
    assert_eq!(report.swap.calculation_count(), 1);

    report
        .market
        .swap_quote(Period::years(5))
        .unwrap()
        .set_value(0.046)
        .unwrap();
    let after = report.swap.results().unwrap();
    assert_eq!(report.swap.calculation_count(), 2);
    assert!(after.npv > before.npv);
    assert_abs_diff_eq!(after.fair_rate, 0.046, epsilon = 1e-8);
}
