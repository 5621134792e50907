//! Mortgage Planner CLI
//!
//! Command-line interface for loan schedules, buy-vs-rent simulations and
//! affordability sweeps

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use mortgage_planner::affordability::AffordabilityQuery;
use mortgage_planner::amortization::{HomePurchase, LoanType};
use mortgage_planner::buy_rent::{simulate, BuyRentParameters, RateSeries};
use mortgage_planner::input::{
    parse_amount, parse_down_payment, parse_percent, parse_rate_range, parse_rate_series, DownPayment,
};
use mortgage_planner::{export, report, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(
    name = "mortgage_planner",
    version,
    about = "Mortgage amortization, cost of ownership and buy-vs-rent projections"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Amortization schedule and total cost of ownership for one purchase
    Schedule(ScheduleArgs),
    /// Net worth of buying versus renting over a holding period
    RentVsBuy(RentVsBuyArgs),
    /// Monthly commitment across home prices and interest rates
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[arg(long, value_parser = parse_amount, help = "Home value, e.g. 750K or $1.2M")]
    home_value: f64,
    #[arg(
        long,
        value_parser = parse_down_payment,
        default_value = "20%",
        help = "Down payment as an amount ($150K) or percent of home value (20%)"
    )]
    down_payment: DownPayment,
    #[arg(long, default_value_t = 30)]
    term_years: u32,
    #[arg(long, value_parser = parse_percent, help = "Annual interest rate in percent, e.g. 6.5")]
    rate: f64,
    #[arg(long, help = "Interest-only loan: principal is never repaid")]
    interest_only: bool,
    #[arg(long, value_parser = parse_amount, default_value = "0", help = "Monthly HOA and Mello-Roos")]
    hoa: f64,
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    maintenance: f64,
    #[arg(long, value_parser = parse_percent, default_value = "1.25", help = "Annual property tax in percent")]
    property_tax: f64,
    #[arg(long, value_parser = parse_amount, default_value = "0", help = "Extra principal paid every month")]
    extra_principal: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct RentVsBuyArgs {
    #[arg(long, help = "JSON file with buy-vs-rent parameters; flags override it")]
    config: Option<PathBuf>,
    #[arg(long, value_parser = parse_amount)]
    home_value: Option<f64>,
    #[arg(long, value_parser = parse_down_payment)]
    down_payment: Option<DownPayment>,
    #[arg(long)]
    loan_term_years: Option<u32>,
    #[arg(long, value_parser = parse_amount)]
    hoa: Option<f64>,
    #[arg(long, value_parser = parse_amount)]
    maintenance: Option<f64>,
    #[arg(long, value_parser = parse_percent)]
    property_tax: Option<f64>,
    #[arg(long, value_parser = parse_percent, help = "Marginal income tax bracket in percent")]
    tax_bracket: Option<f64>,
    #[arg(long, value_parser = parse_amount, help = "Monthly rent for a comparable home")]
    rent: Option<f64>,
    #[arg(long, help = "Years to simulate")]
    years: Option<u32>,
    #[arg(long, help = "Interest rate: one value or one per year, e.g. [6, 5.5, 5]")]
    interest_rate: Option<String>,
    #[arg(long, help = "Home appreciation: one value or one per year")]
    home_appreciation: Option<String>,
    #[arg(long, help = "Rent appreciation: one value or one per year")]
    rent_appreciation: Option<String>,
    #[arg(long, help = "Investment return: one value or one per year")]
    investment_return: Option<String>,
    #[arg(long, help = "Also compare outcomes across a rate range, e.g. 5-7")]
    compare_rates: Option<String>,
    #[arg(long, help = "Print the month-by-month table")]
    monthly: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[arg(long, value_parser = parse_amount)]
    min_price: f64,
    #[arg(long, value_parser = parse_amount)]
    max_price: f64,
    #[arg(long, value_parser = parse_amount, default_value = "50K")]
    step: f64,
    #[arg(long, value_parser = parse_amount, help = "Maximum down payment available")]
    down_payment: f64,
    #[arg(long, default_value_t = 30)]
    term_years: u32,
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    hoa: f64,
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    maintenance: f64,
    #[arg(long, value_parser = parse_percent, default_value = "1.25")]
    property_tax: f64,
    #[arg(long, value_parser = parse_amount, help = "Monthly budget")]
    budget: f64,
    #[arg(long, default_value = "3-5", help = "Interest rate range in 0.25 steps, e.g. 3-5")]
    rates: String,
    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long, help = "Write the monthly schedule to this CSV file")]
    csv: Option<PathBuf>,
    #[arg(long, help = "Print JSON instead of a report")]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Schedule(args) => run_schedule(args),
        Command::RentVsBuy(args) => run_rent_vs_buy(args),
        Command::Sweep(args) => run_sweep(args),
    }
}

fn run_schedule(args: ScheduleArgs) -> Result<()> {
    let purchase = HomePurchase {
        home_value: args.home_value,
        down_payment: args.down_payment.resolve(args.home_value),
        term_years: args.term_years,
        annual_rate_percent: args.rate,
        loan_type: if args.interest_only {
            LoanType::InterestOnly
        } else {
            LoanType::Amortizing
        },
        monthly_hoa: args.hoa,
        monthly_maintenance: args.maintenance,
        property_tax_rate_percent: args.property_tax,
        extra_principal: args.extra_principal,
    };

    let schedule = purchase
        .schedule()
        .context("Failed to compute amortization schedule")?;
    let summary = purchase.summarize(&schedule);

    if let Some(path) = &args.output.csv {
        export::write_loan_schedule_to_path(path, &schedule, Some(&summary))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_loan_report(&summary));
    }
    Ok(())
}

fn load_params(path: &Path) -> Result<BuyRentParameters> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let params = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded parameters from {}", path.display());
    Ok(params)
}

fn rate_override(input: Option<&str>, years: u32, name: &str) -> Result<Option<RateSeries>> {
    input
        .map(|s| {
            parse_rate_series(s, years)
                .map(RateSeries::per_year)
                .with_context(|| format!("Invalid --{}", name))
        })
        .transpose()
}

/// Config file first, then any flag given on the command line
fn resolve_params(args: &RentVsBuyArgs) -> Result<BuyRentParameters> {
    let mut params = match &args.config {
        Some(path) => load_params(path)?,
        None => BuyRentParameters::default(),
    };

    if let Some(v) = args.home_value {
        params.home_value = v;
    }
    if let Some(dp) = args.down_payment {
        params.down_payment = dp.resolve(params.home_value);
    }
    if let Some(v) = args.loan_term_years {
        params.loan_term_years = v;
    }
    if let Some(v) = args.hoa {
        params.monthly_hoa = v;
    }
    if let Some(v) = args.maintenance {
        params.monthly_maintenance = v;
    }
    if let Some(v) = args.property_tax {
        params.property_tax_rate_percent = v;
    }
    if let Some(v) = args.tax_bracket {
        params.tax_bracket_percent = v;
    }
    if let Some(v) = args.rent {
        params.monthly_rent = v;
    }
    if let Some(v) = args.years {
        params.simulation_years = v;
    }

    let years = params.simulation_years;
    if let Some(series) = rate_override(args.interest_rate.as_deref(), years, "interest-rate")? {
        params.interest_rate = series;
    }
    if let Some(series) = rate_override(args.home_appreciation.as_deref(), years, "home-appreciation")? {
        params.home_appreciation = series;
    }
    if let Some(series) = rate_override(args.rent_appreciation.as_deref(), years, "rent-appreciation")? {
        params.rent_appreciation = series;
    }
    if let Some(series) = rate_override(args.investment_return.as_deref(), years, "investment-return")? {
        params.investment_return = series;
    }

    Ok(params)
}

fn run_rent_vs_buy(args: RentVsBuyArgs) -> Result<()> {
    let params = resolve_params(&args)?;
    let result = simulate(&params).context("Buy-vs-rent simulation failed")?;

    if let Some(path) = &args.output.csv {
        export::write_buy_rent_to_path(path, &result)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else {
        print!("{}", report::render_buy_rent_report(&result, args.monthly));
    }

    if let Some(range) = &args.compare_rates {
        let rates = parse_rate_range(range).context("Invalid --compare-rates")?;
        let runner = ScenarioRunner::new(params);

        println!("\n{:>8} {:>16} {:>16} {:>16}", "Rate", "NW Buying", "NW Renting", "Rent Advantage");
        println!("{}", "-".repeat(59));
        for (rate, outcome) in runner.sweep_interest_rates(&rates) {
            let summary = outcome
                .with_context(|| format!("Simulation at {:.2}% failed", rate))?
                .summary();
            println!(
                "{:>7.2}% {:>16.2} {:>16.2} {:>16.2}",
                rate,
                summary.final_net_worth_buying_after_sale,
                summary.final_net_worth_renting,
                summary.renting_advantage
            );
        }
    }
    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let query = AffordabilityQuery {
        min_home_value: args.min_price,
        max_home_value: args.max_price,
        home_value_step: args.step,
        down_payment: args.down_payment,
        term_years: args.term_years,
        monthly_hoa: args.hoa,
        monthly_maintenance: args.maintenance,
        property_tax_rate_percent: args.property_tax,
        monthly_budget: args.budget,
        rates_percent: parse_rate_range(&args.rates).context("Invalid --rates")?,
    };

    let grid = query.evaluate().context("Affordability sweep failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print!("{}", report::render_affordability(&grid));
    }
    Ok(())
}
