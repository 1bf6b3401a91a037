//! Presentation adapters.
//!
//! Every renderer takes a fully computed [`MortgageReport`](crate::MortgageReport)
//! and only formats it; none of them recompute or re-validate the schedule.
//! The document formats sit behind the `csv`, `html` and `pdf` features.

pub mod currency;

#[cfg(feature = "csv")]
pub mod csv_out;

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use currency::{format_plain, CurrencyFormat};
