//! Urlencoded mortgage form shared by the page and the download endpoints.

use std::str::FromStr;

use mortgage_core::amortization::fixed_months_from;
use mortgage_core::render::html::FormValues;
use mortgage_core::{LoanTerms, MortgageError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing field: {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Terms(#[from] MortgageError),
}

/// Raw submitted fields. Every field is optional at this layer so that a
/// missing value is reported by name instead of as a generic rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MortgageForm {
    #[serde(default)]
    pub principal: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub months: Option<String>,
    #[serde(default)]
    pub monthly: Option<String>,
}

impl MortgageForm {
    /// Validate the fields and build loan terms. A blank or absent `monthly`
    /// derives the payment from the annuity formula.
    pub fn parse(&self) -> Result<LoanTerms, FormError> {
        let principal = decimal_field("principal", required("principal", &self.principal)?)?;
        let rate = decimal_field("rate", required("rate", &self.rate)?)?;
        let months_raw = required("months", &self.months)?;
        let months: i64 = months_raw.parse().map_err(|_| FormError::Invalid {
            field: "months",
            reason: format!("'{months_raw}' is not a whole number"),
        })?;
        let months = fixed_months_from(months)?;

        let terms = match optional(&self.monthly) {
            Some(raw) => {
                let payment = decimal_field("monthly", raw)?;
                LoanTerms::with_supplied_payment(principal, rate, months, payment)?
            }
            None => LoanTerms::with_computed_payment(principal, rate, months)?,
        };
        Ok(terms)
    }

    /// Submitted values as typed, for redisplay in the page.
    pub fn echo(&self) -> FormValues {
        let field = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();
        FormValues {
            principal: field(&self.principal),
            rate: field(&self.rate),
            months: field(&self.months),
            monthly: field(&self.monthly),
        }
    }
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(name: &'static str, value: &'a Option<String>) -> Result<&'a str, FormError> {
    optional(value).ok_or(FormError::Missing(name))
}

fn decimal_field(name: &'static str, raw: &str) -> Result<Decimal, FormError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| FormError::Invalid {
            field: name,
            reason: format!("'{raw}' is not a number"),
        })
}
