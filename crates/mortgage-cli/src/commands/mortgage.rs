use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_core::amortization::{analyze_mortgage, fixed_months_from, MortgageInput};
use mortgage_core::render::csv_out::render_csv;
use mortgage_core::render::pdf::render_pdf;
use mortgage_core::render::CurrencyFormat;
use mortgage_core::{LoanTerms, MortgageReport};

use crate::input;

/// Loan parameters shared by the schedule and export commands
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Length of the fixed-rate period in months
    #[arg(long, allow_hyphen_values = true)]
    pub months: Option<i64>,

    /// Monthly payment; omit to derive it from the annuity formula
    #[arg(long)]
    pub monthly: Option<Decimal>,
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Number of months over which the loan is fully repaid
    #[arg(long, allow_hyphen_values = true)]
    pub months: i64,
}

/// Arguments for the fixed-period schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

/// Arguments for writing the schedule as a document
#[derive(Args)]
pub struct ExportArgs {
    /// Document format
    #[arg(long, value_enum)]
    pub format: ExportFormat,

    /// Destination file
    #[arg(long)]
    pub out: PathBuf,

    /// Currency prefix used in PDF amounts
    #[arg(long, default_value = "GBP ")]
    pub currency: String,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let months = fixed_months_from(args.months)?;
    let terms = LoanTerms::with_computed_payment(args.principal, args.rate, months)?;
    Ok(serde_json::to_value(terms)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input = resolve_input(&args.loan)?;
    let result = analyze_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input = resolve_input(&args.loan)?;
    export(&mortgage_input, args.format, &args.currency, &args.out)
}

fn export(
    mortgage_input: &MortgageInput,
    format: ExportFormat,
    currency: &str,
    out: &Path,
) -> Result<Value, Box<dyn std::error::Error>> {
    let report = MortgageReport::from_terms(mortgage_input.to_terms()?)?;

    let bytes = match format {
        ExportFormat::Csv => render_csv(&report)?,
        ExportFormat::Pdf => render_pdf(&report, &CurrencyFormat::new(currency))?,
    };
    fs::write(out, &bytes).map_err(|e| format!("Failed to write '{}': {}", out.display(), e))?;

    Ok(json!({
        "path": out.display().to_string(),
        "format": format!("{format:?}").to_lowercase(),
        "bytes": bytes.len(),
        "months": report.schedule.len(),
        "remaining_balance": report.summary.remaining_balance,
    }))
}

fn resolve_input(args: &LoanArgs) -> Result<MortgageInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_input(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        input_from_flags(args)
    }
}

fn input_from_flags(args: &LoanArgs) -> Result<MortgageInput, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let annual_rate_pct = args.rate.ok_or("--rate is required (or provide --input)")?;
    let fixed_months = args
        .months
        .ok_or("--months is required (or provide --input)")?;

    Ok(MortgageInput {
        principal,
        annual_rate_pct,
        fixed_months,
        monthly_payment: args.monthly,
    })
}
