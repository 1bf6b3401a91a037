use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.05 = 5%). Annual inputs arrive
/// as percentages and are converted before they become a `Rate`.
pub type Rate = Decimal;

/// How the monthly payment on a [`LoanTerms`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    /// Derived from principal, rate and period with the annuity formula.
    Computed,
    /// Taken as-is from the caller.
    Supplied,
}

/// Validated, immutable loan parameters.
///
/// Only constructible through [`LoanTerms::with_computed_payment`] and
/// [`LoanTerms::with_supplied_payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanTerms {
    pub(crate) principal: Money,
    pub(crate) annual_rate_pct: Decimal,
    pub(crate) fixed_months: u32,
    pub(crate) monthly_payment: Money,
    pub(crate) payment_source: PaymentSource,
}

impl LoanTerms {
    pub fn principal(&self) -> Money {
        self.principal
    }

    /// Annual nominal rate as a percentage (5.0 = 5%).
    pub fn annual_rate_pct(&self) -> Decimal {
        self.annual_rate_pct
    }

    pub fn fixed_months(&self) -> u32 {
        self.fixed_months
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    pub fn payment_source(&self) -> PaymentSource {
        self.payment_source
    }
}

/// One month of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyEntry {
    /// 1-based month index.
    pub month: u32,
    pub interest: Money,
    /// Portion of the payment that reduced the balance.
    pub principal: Money,
    /// Balance after this month's payment, never negative.
    pub balance: Money,
}

/// Month-by-month ledger for the fixed-rate period.
///
/// Aggregates are always derived from the entries; nothing is cached.
/// Only [`generate_schedule`](crate::amortization::generate_schedule)
/// builds one:
///
/// ```compile_fail
/// let schedule: mortgage_core::Schedule = serde_json::from_str("[]").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: Vec<MonthlyEntry>,
}

impl Schedule {
    pub(crate) fn from_entries(entries: Vec<MonthlyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MonthlyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_interest(&self) -> Money {
        self.entries.iter().map(|e| e.interest).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.entries.iter().map(|e| e.principal).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.total_interest() + self.total_principal()
    }

    /// Balance after the last month; zero for an empty schedule.
    pub fn remaining_balance(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// First month whose closing balance is zero, if any.
    pub fn paid_off_month(&self) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.balance.is_zero())
            .map(|e| e.month)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let total_interest = self.total_interest();
        let total_principal = self.total_principal();
        ScheduleSummary {
            total_paid: total_interest + total_principal,
            total_interest,
            total_principal,
            remaining_balance: self.remaining_balance(),
            paid_off_month: self.paid_off_month(),
        }
    }
}

/// Totals over a [`Schedule`], recomputed on every call to
/// [`Schedule::summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub remaining_balance: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_off_month: Option<u32>,
}

/// Everything a renderer needs: the terms, their schedule, and its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MortgageReport {
    pub terms: LoanTerms,
    pub schedule: Schedule,
    pub summary: ScheduleSummary,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
