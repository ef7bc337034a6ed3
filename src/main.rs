//! `swapreport`: bootstraps the configured curves and prints the NPV, fair
//! spread and fair fixed rate of a spot and a forward-starting swap on each,
//! before and after the swap quote of the swap tenor is moved.

use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ratecurve::configuration::{Configuration, ConfigurationError};
use ratecurve::instrument::instrumenterror::InstrumentError;
use ratecurve::instrument::interestrate::vanillaswap::{SwapType, VanillaSwap};
use ratecurve::interestrate::index::iborindex::IborIndex;
use ratecurve::market::market::Market;
use ratecurve::market::quoteerror::QuoteError;
use ratecurve::model::interestrate::piecewiseflatforward::PiecewiseFlatForward;
use ratecurve::model::interestrate::termstructurehandle::TermStructureHandle;
use ratecurve::time::period::{Period, TimeUnit};
use ratecurve::time::schedule::scheduleerror::ScheduleError;

const COLUMN_WIDTH: usize = 17;
const TAB: &str = "        ";

#[derive(Parser)]
#[command(name = "swapreport")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON configuration file; the built-in market of 6 November 2001 when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rate the swap quote of the swap tenor is moved to before the second report
    #[arg(long, default_value_t = 0.046)]
    bumped_5y_rate: f64,

    /// Log filter, takes precedence over RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Error)]
enum ReportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("market has no {0} swap quote")]
    MissingSwapQuote(Period),
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<(), ReportError> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = match &cli.config {
        Some(path) => Configuration::from_reader(path)?,
        None => Configuration::default(),
    };
    run(&config, cli.bumped_5y_rate)
}

struct PricedSwap {
    title: String,
    swap: Rc<VanillaSwap>,
}

fn run(config: &Configuration, bumped_rate: f64) -> Result<(), ReportError> {
    let market = Market::new(&config.market)?;
    let mut curves: Vec<(String, Rc<PiecewiseFlatForward>)> = Vec::with_capacity(config.curves.len());
    for definition in &config.curves {
        curves.push((definition.name.clone(), market.build_curve(definition, config.bootstrap)?));
    }

    let discount_handle = TermStructureHandle::new();
    let forecast_handle = TermStructureHandle::new();
    let index = IborIndex::new(
        "Euribor",
        config.swap.index_tenor,
        market.settlement_days(),
        market.calendar().clone(),
        market.adjuster(),
        market.money_market_day_counter().clone(),
        forecast_handle.clone(),
    );

    let terms = &config.swap;
    let settlement_date = market.settlement_date();
    let forward_start_date =
        market
            .adjuster()
            .from_tenor_to_date(settlement_date, terms.forward_start, market.calendar());
    info!(%settlement_date, %forward_start_date, index = index.name(), "pricing swaps");

    let new_swap = |start_date: NaiveDate| {
        VanillaSwap::with_conventions(
            terms.swap_type,
            terms.nominal,
            start_date,
            terms.tenor,
            terms.fixed_rate,
            terms.spread,
            market.swap_conventions(),
            index.clone(),
            discount_handle.clone(),
            market.evaluation_date(),
        )
    };
    let direction = match terms.swap_type {
        SwapType::Payer => "paying",
        SwapType::Receiver => "receiving",
    };
    let paying = format!("swap {direction} {}", format_rate(terms.fixed_rate, 2));
    let swaps = [
        PricedSwap {
            title: format!("{} {paying}", plural(terms.tenor)),
            swap: new_swap(settlement_date)?,
        },
        PricedSwap {
            title: format!("{}, {} forward {paying}", plural(terms.tenor), singular(terms.forward_start)),
            swap: new_swap(forward_start_date)?,
        },
    ];

    let quote = market
        .swap_quote(terms.tenor)
        .ok_or(ReportError::MissingSwapQuote(terms.tenor))?
        .clone();

    print_report(terms.tenor, quote.value(), &swaps, &curves, &discount_handle, &forecast_handle)?;

    quote.set_value(bumped_rate)?;
    print_report(terms.tenor, quote.value(), &swaps, &curves, &discount_handle, &forecast_handle)?;
    Ok(())
}

fn print_report(
    tenor: Period,
    market_rate: f64,
    swaps: &[PricedSwap],
    curves: &[(String, Rc<PiecewiseFlatForward>)],
    discount_handle: &TermStructureHandle,
    forecast_handle: &TermStructureHandle,
) -> Result<(), ReportError> {
    let header = row("term structure", "net present value", "fair spread", "fair fixed rate");
    let rule = "-".repeat(header.len());
    let dblrule = "=".repeat(header.len());

    println!();
    println!("{dblrule}");
    println!("{} market swap-rate = {}", singular(tenor), format_rate(market_rate, 2));
    println!("{dblrule}");

    for priced in swaps {
        println!("{TAB}{}", priced.title);
        println!("{header}");
        println!("{rule}");
        for (name, curve) in curves {
            discount_handle.link_to(curve.clone());
            forecast_handle.link_to(curve.clone());
            let results = priced.swap.results()?;
            println!(
                "{}",
                row(
                    name,
                    &format_price(results.npv),
                    &format_rate(results.fair_spread, 4),
                    &format_rate(results.fair_rate, 4),
                )
            );
        }
        println!("{rule}");
    }
    Ok(())
}

fn row(name: &str, npv: &str, fair_spread: &str, fair_rate: &str) -> String {
    format!(
        "{name:>w$} |{npv:>w$} |{fair_spread:>w$} |{fair_rate:>w$}",
        w = COLUMN_WIDTH
    )
}

fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

fn format_rate(rate: f64, digits: usize) -> String {
    format!("{:.digits$} %", rate * 100.0)
}

fn unit_name(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Days => "day",
        TimeUnit::Weeks => "week",
        TimeUnit::Months => "month",
        TimeUnit::Years => "year",
    }
}

/// "5-year"
fn singular(tenor: Period) -> String {
    format!("{}-{}", tenor.number(), unit_name(tenor.unit()))
}

/// "5-years"
fn plural(tenor: Period) -> String {
    format!("{}s", singular(tenor))
}
