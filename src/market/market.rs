use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::configuration::{ConfigurationError, CurveDefinition, MarketCalendar, MarketConfiguration};
use crate::instrument::ratehelper::depositratehelper::DepositRateHelper;
use crate::instrument::ratehelper::fraratehelper::FraRateHelper;
use crate::instrument::ratehelper::futuresratehelper::FuturesRateHelper;
use crate::instrument::ratehelper::ratehelper::RateHelper;
use crate::instrument::ratehelper::swapratehelper::{SwapConventions, SwapRateHelper};
use crate::market::quote::SimpleQuote;
use crate::model::interestrate::bootstrapsettings::BootstrapSettings;
use crate::model::interestrate::piecewiseflatforward::PiecewiseFlatForward;
use crate::time::businessdayadjuster::BusinessDayAdjuster;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::simplecalendar::SimpleCalendar;
use crate::time::calendar::target::target_calendar;
use crate::time::daycounter::daycounter::DayCounter;
use crate::time::period::Period;

impl MarketCalendar {
    pub fn calendar(&self) -> Arc<dyn HolidayCalendar> {
        match self {
            MarketCalendar::Target => target_calendar(),
            MarketCalendar::WeekendsOnly => Arc::new(SimpleCalendar::weekends_only()),
        }
    }
}

/// Live quotes of one money market.
///
/// Every quote is created once and shared by all helpers built from it, so
/// moving a quote reaches every curve that uses it.
pub struct Market {
    evaluation_date: NaiveDate,
    calendar: Arc<dyn HolidayCalendar>,
    settlement_days: u32,
    adjuster: BusinessDayAdjuster,
    money_market_day_counter: DayCounter,
    curve_day_counter: DayCounter,
    swap_conventions: SwapConventions,
    deposits: Vec<(Period, Rc<SimpleQuote>)>,
    fras: Vec<([u32; 2], Rc<SimpleQuote>)>,
    futures: Vec<(NaiveDate, u32, Rc<SimpleQuote>)>,
    swaps: Vec<(Period, Rc<SimpleQuote>)>,
}

impl Market {
    pub fn new(config: &MarketConfiguration) -> Result<Market, ConfigurationError> {
        let mut deposits = Vec::with_capacity(config.deposits.len());
        for d in &config.deposits {
            deposits.push((d.tenor, new_quote(d.rate)?));
        }
        let mut fras = Vec::with_capacity(config.fras.len());
        for f in &config.fras {
            fras.push(([f.months_to_start, f.months_to_end], new_quote(f.rate)?));
        }
        let mut futures = Vec::with_capacity(config.futures.len());
        for f in &config.futures {
            futures.push((f.start_date, f.months, new_quote(f.price)?));
        }
        let mut swaps = Vec::with_capacity(config.swaps.len());
        for s in &config.swaps {
            swaps.push((s.tenor, new_quote(s.rate)?));
        }

        Ok(Market {
            evaluation_date: config.evaluation_date,
            calendar: config.calendar.calendar(),
            settlement_days: config.settlement_days,
            adjuster: config.adjuster,
            money_market_day_counter: config.money_market_day_counter.clone(),
            curve_day_counter: config.curve_day_counter.clone(),
            swap_conventions: config.swap_conventions.clone(),
            deposits,
            fras,
            futures,
            swaps,
        })
    }

    pub fn evaluation_date(&self) -> NaiveDate {
        self.evaluation_date
    }

    pub fn calendar(&self) -> &Arc<dyn HolidayCalendar> {
        &self.calendar
    }

    pub fn settlement_days(&self) -> u32 {
        self.settlement_days
    }

    pub fn settlement_date(&self) -> NaiveDate {
        self.calendar
            .shift_n_business_day(self.evaluation_date, self.settlement_days as i32)
    }

    pub fn adjuster(&self) -> BusinessDayAdjuster {
        self.adjuster
    }

    pub fn money_market_day_counter(&self) -> &DayCounter {
        &self.money_market_day_counter
    }

    pub fn curve_day_counter(&self) -> &DayCounter {
        &self.curve_day_counter
    }

    pub fn swap_conventions(&self) -> &SwapConventions {
        &self.swap_conventions
    }

    pub fn deposit_quote(&self, tenor: Period) -> Option<&Rc<SimpleQuote>> {
        self.deposits.iter().find(|(t, _)| *t == tenor).map(|(_, q)| q)
    }

    pub fn swap_quote(&self, tenor: Period) -> Option<&Rc<SimpleQuote>> {
        self.swaps.iter().find(|(t, _)| *t == tenor).map(|(_, q)| q)
    }

    /// Helpers for the quotes `definition` selects, in the order it lists them.
    pub fn helpers(&self, definition: &CurveDefinition) -> Result<Vec<RateHelper>, ConfigurationError> {
        let unknown = |kind: &'static str, label: String| ConfigurationError::UnknownQuote {
            curve: definition.name.clone(),
            kind,
            label,
        };
        let mut helpers: Vec<RateHelper> = Vec::new();

        for tenor in &definition.deposits {
            let quote = self
                .deposit_quote(*tenor)
                .ok_or_else(|| unknown("deposit", tenor.to_string()))?;
            helpers.push(
                DepositRateHelper::new(
                    quote.clone(),
                    self.evaluation_date,
                    *tenor,
                    self.settlement_days,
                    self.calendar.clone(),
                    self.adjuster,
                    self.money_market_day_counter.clone(),
                )
                .into(),
            );
        }

        for months in &definition.fras {
            let quote = self
                .fras
                .iter()
                .find(|(m, _)| m == months)
                .map(|(_, q)| q)
                .ok_or_else(|| unknown("FRA", format!("{}x{}", months[0], months[1])))?;
            helpers.push(
                FraRateHelper::new(
                    quote.clone(),
                    self.evaluation_date,
                    months[0],
                    months[1],
                    self.settlement_days,
                    self.calendar.clone(),
                    self.adjuster,
                    self.money_market_day_counter.clone(),
                )
                .into(),
            );
        }

        for start_date in &definition.futures {
            let (_, months, quote) = self
                .futures
                .iter()
                .find(|(d, _, _)| d == start_date)
                .ok_or_else(|| unknown("futures", start_date.to_string()))?;
            helpers.push(
                FuturesRateHelper::new(
                    quote.clone(),
                    *start_date,
                    *months,
                    self.calendar.clone(),
                    self.adjuster,
                    self.money_market_day_counter.clone(),
                )
                .into(),
            );
        }

        for tenor in &definition.swaps {
            let quote = self
                .swap_quote(*tenor)
                .ok_or_else(|| unknown("swap", tenor.to_string()))?;
            helpers.push(
                SwapRateHelper::new(
                    quote.clone(),
                    self.evaluation_date,
                    *tenor,
                    self.calendar.clone(),
                    self.swap_conventions.clone(),
                )?
                .into(),
            );
        }

        Ok(helpers)
    }

    /// Bootstraps `definition` with its reference date on the settlement date.
    pub fn build_curve(
        &self,
        definition: &CurveDefinition,
        settings: BootstrapSettings,
    ) -> Result<Rc<PiecewiseFlatForward>, ConfigurationError> {
        let helpers = self.helpers(definition)?;
        debug!(curve = %definition.name, helpers = helpers.len(), "building curve");
        Ok(PiecewiseFlatForward::new(
            self.settlement_date(),
            helpers,
            self.curve_day_counter.clone(),
            settings,
        )?)
    }
}

fn new_quote(value: f64) -> Result<Rc<SimpleQuote>, ConfigurationError> {
    Ok(Rc::new(SimpleQuote::new(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_market_settles_two_days_later() {
        let market = Market::new(&MarketConfiguration::default()).unwrap();
        assert_eq!(market.settlement_date(), ymd(2001, 11, 8));
        assert_eq!(market.swap_quote(Period::years(5)).unwrap().value(), 0.0443);
        assert!(market.swap_quote(Period::years(7)).is_none());
    }

    #[test]
    fn curves_share_quotes() {
        let config = Configuration::default();
        let market = Market::new(&config.market).unwrap();
        let futures_curve = market.helpers(&config.curves[0]).unwrap();
        let fra_curve = market.helpers(&config.curves[1]).unwrap();
        assert_eq!(futures_curve.len(), 2 + 8 + 4);
        assert_eq!(fra_curve.len(), 3 + 3 + 5);

        let five_year = market.swap_quote(Period::years(5)).unwrap();
        assert!(futures_curve.iter().any(|h| Rc::ptr_eq(h.quote(), five_year)));
        assert!(fra_curve.iter().any(|h| Rc::ptr_eq(h.quote(), five_year)));
    }

    #[test]
    fn unknown_quote_is_reported() {
        let market = Market::new(&MarketConfiguration::default()).unwrap();
        let definition = CurveDefinition {
            name: "broken".to_owned(),
            deposits: vec![Period::months(2)],
            fras: Vec::new(),
            futures: Vec::new(),
            swaps: Vec::new(),
        };
        assert!(matches!(
            market.helpers(&definition),
            Err(ConfigurationError::UnknownQuote { kind: "deposit", .. })
        ));
    }
}
