use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instrument::interestrate::vanillaswap::SwapType;
use crate::instrument::ratehelper::swapratehelper::SwapConventions;
use crate::market::quoteerror::QuoteError;
use crate::model::interestrate::bootstrapsettings::BootstrapSettings;
use crate::model::interestrate::curveerror::CurveError;
use crate::time::businessdayadjuster::{BusinessDayAdjuster, BusinessDayConvention};
use crate::time::daycounter::daycounter::DayCounter;
use crate::time::period::Period;
use crate::time::schedule::scheduleerror::ScheduleError;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error("curve '{curve}' refers to unknown {kind} quote {label}")]
    UnknownQuote {
        curve: String,
        kind: &'static str,
        label: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCalendar {
    Target,
    WeekendsOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub tenor: Period,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraQuote {
    pub months_to_start: u32,
    pub months_to_end: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesQuote {
    pub start_date: NaiveDate,
    pub months: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub tenor: Period,
    pub rate: f64,
}

/// Quotes and conventions of one money market, all settling on `calendar`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfiguration {
    pub evaluation_date: NaiveDate,
    pub calendar: MarketCalendar,
    pub settlement_days: u32,
    pub adjuster: BusinessDayAdjuster,
    pub money_market_day_counter: DayCounter,
    pub curve_day_counter: DayCounter,
    pub deposits: Vec<DepositQuote>,
    pub fras: Vec<FraQuote>,
    pub futures: Vec<FuturesQuote>,
    pub swaps: Vec<SwapQuote>,
    pub swap_conventions: SwapConventions,
}

/// Which market quotes go into one bootstrapped curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDefinition {
    pub name: String,
    #[serde(default)]
    pub deposits: Vec<Period>,
    /// `[months_to_start, months_to_end]` pairs.
    #[serde(default)]
    pub fras: Vec<[u32; 2]>,
    /// Start dates of the futures contracts.
    #[serde(default)]
    pub futures: Vec<NaiveDate>,
    #[serde(default)]
    pub swaps: Vec<Period>,
}

/// Terms of the swaps priced in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapDefinition {
    pub swap_type: SwapType,
    pub nominal: f64,
    pub tenor: Period,
    pub forward_start: Period,
    pub fixed_rate: f64,
    pub spread: f64,
    pub index_tenor: Period,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    pub market: MarketConfiguration,
    pub curves: Vec<CurveDefinition>,
    pub swap: SwapDefinition,
}

impl Configuration {
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl Default for MarketConfiguration {
    /// Euro market of 6 November 2001.
    fn default() -> Self {
        let deposits = [
            (Period::weeks(1), 0.0382),
            (Period::months(1), 0.0372),
            (Period::months(3), 0.0363),
            (Period::months(6), 0.0353),
            (Period::months(9), 0.0348),
            (Period::years(1), 0.0345),
        ]
        .into_iter()
        .map(|(tenor, rate)| DepositQuote { tenor, rate })
        .collect();

        let fras = [(3, 6), (6, 9), (9, 12)]
            .into_iter()
            .map(|(months_to_start, months_to_end)| FraQuote {
                months_to_start,
                months_to_end,
                rate: 0.037125,
            })
            .collect();

        let futures = [
            (ymd(2001, 12, 19), 96.2875),
            (ymd(2002, 3, 20), 96.7875),
            (ymd(2002, 6, 19), 96.9875),
            (ymd(2002, 9, 18), 96.6875),
            (ymd(2002, 12, 18), 96.4875),
            (ymd(2003, 3, 19), 96.3875),
            (ymd(2003, 6, 18), 96.2875),
            (ymd(2003, 9, 17), 96.0875),
        ]
        .into_iter()
        .map(|(start_date, price)| FuturesQuote {
            start_date,
            months: 3,
            price,
        })
        .collect();

        let swaps = [
            (Period::years(2), 0.037125),
            (Period::years(3), 0.0398),
            (Period::years(5), 0.0443),
            (Period::years(10), 0.05165),
            (Period::years(15), 0.055175),
        ]
        .into_iter()
        .map(|(tenor, rate)| SwapQuote { tenor, rate })
        .collect();

        let adjuster = BusinessDayAdjuster::new(BusinessDayConvention::ModifiedFollowing, false);
        MarketConfiguration {
            evaluation_date: ymd(2001, 11, 6),
            calendar: MarketCalendar::Target,
            settlement_days: 2,
            adjuster,
            money_market_day_counter: DayCounter::actual_360(),
            curve_day_counter: DayCounter::actual_360(),
            deposits,
            fras,
            futures,
            swaps,
            swap_conventions: SwapConventions {
                settlement_days: 2,
                adjuster,
                fixed_frequency: Period::years(1),
                fixed_leg_adjusted: false,
                fixed_day_counter: DayCounter::thirty_360(),
                floating_frequency: Period::months(6),
            },
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let swap_tenors = |years: &[i32]| years.iter().map(|y| Period::years(*y)).collect::<Vec<_>>();
        let futures = MarketConfiguration::default()
            .futures
            .iter()
            .map(|f| f.start_date)
            .collect();

        Configuration {
            bootstrap: BootstrapSettings::default(),
            market: MarketConfiguration::default(),
            curves: vec![
                CurveDefinition {
                    name: "depo-fut-swap".to_owned(),
                    deposits: vec![Period::weeks(1), Period::months(1)],
                    fras: Vec::new(),
                    futures,
                    swaps: swap_tenors(&[3, 5, 10, 15]),
                },
                CurveDefinition {
                    name: "depo-FRA-swap".to_owned(),
                    deposits: vec![Period::weeks(1), Period::months(1), Period::months(3)],
                    fras: vec![[3, 6], [6, 9], [9, 12]],
                    futures: Vec::new(),
                    swaps: swap_tenors(&[2, 3, 5, 10, 15]),
                },
            ],
            swap: SwapDefinition {
                swap_type: SwapType::Payer,
                nominal: 1_000_000.0,
                tenor: Period::years(5),
                forward_start: Period::years(1),
                fixed_rate: 0.04,
                spread: 0.0,
                index_tenor: Period::months(6),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::daycounter::daycounter::DayCounterConvention;

    #[test]
    fn default_round_trips_through_json() {
        let config = Configuration::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.curves, config.curves);
        assert_eq!(parsed.swap, config.swap);
        assert_eq!(parsed.market.futures, config.market.futures);
        assert_eq!(parsed.market.swap_conventions.fixed_day_counter.convention(), DayCounterConvention::Thirty360BondBasis);
    }

    #[test]
    fn reads_hand_written_json() {
        let json = r#"{
            "market": {
                "evaluation_date": "2001-11-06",
                "calendar": "Target",
                "settlement_days": 2,
                "adjuster": {"convention": "ModifiedFollowing"},
                "money_market_day_counter": "Actual360",
                "curve_day_counter": "Actual365Fixed",
                "deposits": [{"tenor": "1M", "rate": 0.0372}],
                "fras": [],
                "futures": [],
                "swaps": [{"tenor": "2Y", "rate": 0.037125}],
                "swap_conventions": {
                    "settlement_days": 2,
                    "adjuster": {"convention": "ModifiedFollowing", "eom": false},
                    "fixed_frequency": "1Y",
                    "fixed_leg_adjusted": false,
                    "fixed_day_counter": "Thirty360BondBasis",
                    "floating_frequency": "6M"
                }
            },
            "curves": [{"name": "short", "deposits": ["1M"], "swaps": ["2Y"]}],
            "swap": {
                "swap_type": "Receiver",
                "nominal": 100.0,
                "tenor": "2Y",
                "forward_start": "0D",
                "fixed_rate": 0.03,
                "spread": 0.0,
                "index_tenor": "6M"
            }
        }"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.bootstrap, BootstrapSettings::default());
        assert_eq!(config.market.curve_day_counter.convention(), DayCounterConvention::Actual365Fixed);
        assert_eq!(config.curves[0].swaps, vec![Period::years(2)]);
        assert!(config.curves[0].fras.is_empty());
        assert_eq!(config.swap.swap_type, SwapType::Receiver);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Configuration::from_reader("/nonexistent/ratecurve.json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Io(_)));
    }
}
