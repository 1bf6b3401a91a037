//! Fixed-rate amortization: the annuity payment and the month-by-month
//! schedule over a fixed-rate period.
//!
//! The schedule always spans exactly the fixed-rate period. A balance left
//! at the end of the period is reported, not treated as an error. All math
//! in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{
    with_metadata, ComputationOutput, LoanTerms, Money, MonthlyEntry, MortgageReport,
    PaymentSource, Rate, Schedule,
};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest fixed-rate period accepted, in months (100 years).
pub const MAX_FIXED_MONTHS: u32 = 1200;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan parameters as they arrive from a caller, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual nominal rate as a percentage (e.g., 5.0 = 5%).
    pub annual_rate_pct: Decimal,
    /// Fixed-rate period in months. Signed so that bad input reaches
    /// validation instead of failing deserialization.
    pub fixed_months: i64,
    /// Monthly payment chosen by the caller. `None` derives it with the
    /// annuity formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
}

impl MortgageInput {
    /// Build validated terms, picking the constructor from whether a
    /// payment was supplied.
    pub fn to_terms(&self) -> MortgageResult<LoanTerms> {
        let months = fixed_months_from(self.fixed_months)?;
        match self.monthly_payment {
            Some(payment) => LoanTerms::with_supplied_payment(
                self.principal,
                self.annual_rate_pct,
                months,
                payment,
            ),
            None => {
                LoanTerms::with_computed_payment(self.principal, self.annual_rate_pct, months)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate to the monthly periodic rate.
pub fn monthly_rate(annual_rate_pct: Decimal) -> Rate {
    annual_rate_pct / PERCENT / MONTHS_PER_YEAR
}

/// Level monthly payment that fully amortizes `principal` over `months`.
///
/// A zero rate degenerates to equal division of the principal.
pub fn monthly_payment(
    principal: Money,
    annual_rate_pct: Decimal,
    months: u32,
) -> MortgageResult<Money> {
    if months == 0 {
        return Err(MortgageError::invalid(
            "months",
            "Fixed-rate period must be at least one month",
        ));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(MortgageError::invalid("rate", "Interest rate cannot be negative"));
    }

    let rate = monthly_rate(annual_rate_pct);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let growth = (Decimal::ONE + rate)
        .checked_powi(i64::from(months))
        .ok_or_else(|| {
            MortgageError::FinancialImpossibility(format!(
                "compound growth at {annual_rate_pct}% over {months} months exceeds representable range"
            ))
        })?;
    let annuity_factor = growth - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    // principal * growth overflows for long terms; divide first.
    principal
        .checked_mul(rate)
        .and_then(|p| p.checked_mul(growth / annuity_factor))
        .ok_or_else(|| {
            MortgageError::FinancialImpossibility(format!(
                "monthly payment on {principal} at {annual_rate_pct}% exceeds representable range"
            ))
        })
}

/// Month-by-month schedule over the whole fixed-rate period.
///
/// Fails with `FinancialImpossibility` when the balance, a monthly amount,
/// or a schedule total leaves the representable range, which happens when a
/// very high rate meets a payment that does not cover the interest.
pub fn generate_schedule(terms: &LoanTerms) -> MortgageResult<Schedule> {
    let rate = monthly_rate(terms.annual_rate_pct);
    let mut balance = terms.principal;
    let mut entries = Vec::with_capacity(terms.fixed_months as usize);
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for month in 1..=terms.fixed_months {
        let overflow = || schedule_overflow(terms, month);
        let interest = balance.checked_mul(rate).ok_or_else(overflow)?;
        let mut principal = terms
            .monthly_payment
            .checked_sub(interest)
            .ok_or_else(overflow)?;
        balance = balance.checked_sub(principal).ok_or_else(overflow)?;

        // Fold any overshoot back so the last payment only covers what was owed.
        if balance < Decimal::ZERO {
            principal += balance;
            balance = Decimal::ZERO;
        }

        // Totals are summed again by the accessors; checking them here keeps
        // those sums in range.
        total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;
        total_principal = total_principal
            .checked_add(principal)
            .ok_or_else(overflow)?;
        total_interest
            .checked_add(total_principal)
            .ok_or_else(overflow)?;

        entries.push(MonthlyEntry {
            month,
            interest,
            principal,
            balance,
        });
    }

    Ok(Schedule::from_entries(entries))
}

/// Validate a caller's month count and narrow it to the engine's type.
pub fn fixed_months_from(raw: i64) -> MortgageResult<u32> {
    if raw <= 0 {
        return Err(MortgageError::invalid(
            "months",
            "Fixed-rate period must be a positive whole number of months",
        ));
    }
    match u32::try_from(raw) {
        Ok(months) if months <= MAX_FIXED_MONTHS => Ok(months),
        _ => Err(MortgageError::invalid(
            "months",
            format!("Fixed-rate period cannot exceed {MAX_FIXED_MONTHS} months"),
        )),
    }
}

/// Build the schedule for `input` and wrap it with warnings and metadata.
pub fn analyze_mortgage(
    input: &MortgageInput,
) -> MortgageResult<ComputationOutput<MortgageReport>> {
    let start = Instant::now();

    let terms = input.to_terms()?;
    let report = MortgageReport::from_terms(terms)?;
    let warnings = schedule_warnings(&report);

    let methodology = match report.terms.payment_source {
        PaymentSource::Computed => "Fixed-rate annuity amortization",
        PaymentSource::Supplied => "Fixed-rate amortization with supplied payment",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, report))
}

// ---------------------------------------------------------------------------
// LoanTerms construction
// ---------------------------------------------------------------------------

impl LoanTerms {
    /// Terms whose monthly payment is derived with the annuity formula.
    pub fn with_computed_payment(
        principal: Money,
        annual_rate_pct: Decimal,
        fixed_months: u32,
    ) -> MortgageResult<Self> {
        validate_terms(principal, annual_rate_pct, fixed_months)?;
        let payment = monthly_payment(principal, annual_rate_pct, fixed_months)?;
        Ok(Self {
            principal,
            annual_rate_pct,
            fixed_months,
            monthly_payment: payment,
            payment_source: PaymentSource::Computed,
        })
    }

    /// Terms with a caller-chosen monthly payment. The payment is not
    /// checked against the annuity payment for the same terms.
    pub fn with_supplied_payment(
        principal: Money,
        annual_rate_pct: Decimal,
        fixed_months: u32,
        monthly_payment: Money,
    ) -> MortgageResult<Self> {
        validate_terms(principal, annual_rate_pct, fixed_months)?;
        if monthly_payment <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "monthly",
                "Monthly payment must be positive",
            ));
        }
        Ok(Self {
            principal,
            annual_rate_pct,
            fixed_months,
            monthly_payment,
            payment_source: PaymentSource::Supplied,
        })
    }

    /// Periodic rate applied each month.
    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_pct)
    }
}

impl MortgageReport {
    /// Schedule and summary for `terms`.
    pub fn from_terms(terms: LoanTerms) -> MortgageResult<Self> {
        let schedule = generate_schedule(&terms)?;
        let summary = schedule.summary();
        Ok(Self {
            terms,
            schedule,
            summary,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_terms(
    principal: Money,
    annual_rate_pct: Decimal,
    fixed_months: u32,
) -> MortgageResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageError::invalid("principal", "Principal must be positive"));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(MortgageError::invalid("rate", "Interest rate cannot be negative"));
    }
    if fixed_months == 0 || fixed_months > MAX_FIXED_MONTHS {
        return Err(MortgageError::invalid(
            "months",
            format!("Fixed-rate period must be between 1 and {MAX_FIXED_MONTHS} months"),
        ));
    }
    Ok(())
}

fn schedule_overflow(terms: &LoanTerms, month: u32) -> MortgageError {
    MortgageError::FinancialImpossibility(format!(
        "balance at {}% with a monthly payment of {} exceeds representable range in month {month}",
        terms.annual_rate_pct,
        terms.monthly_payment.round_dp(2)
    ))
}

fn schedule_warnings(report: &MortgageReport) -> Vec<String> {
    let mut warnings = Vec::new();
    let terms = &report.terms;

    if let Some(first) = report.schedule.entries().first() {
        if terms.monthly_payment < first.interest {
            warnings.push(format!(
                "Monthly payment {} does not cover the first month's interest {}; the balance grows over the fixed period",
                terms.monthly_payment.round_dp(2),
                first.interest.round_dp(2)
            ));
        }
    }

    if let Some(month) = report.summary.paid_off_month {
        if month < terms.fixed_months {
            warnings.push(format!(
                "Loan is fully repaid in month {month}, before the end of the {}-month fixed period",
                terms.fixed_months
            ));
        }
    }

    warnings
}
