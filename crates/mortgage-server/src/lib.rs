//! HTTP front end for the mortgage calculator.
//!
//! `GET /` serves the form, `POST /` renders the schedule as HTML, and the
//! download endpoints return the same schedule as PDF or CSV.

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod log;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use mortgage_core::render::html::HtmlRenderer;
use mortgage_core::render::CurrencyFormat;
use mortgage_core::MortgageResult;

pub use config::ServerConfig;
pub use error::ServerError;

/// Immutable state shared by every request.
pub struct AppState {
    pub html: HtmlRenderer,
    pub pdf_currency: CurrencyFormat,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> MortgageResult<Self> {
        Ok(Self {
            html: HtmlRenderer::new(CurrencyFormat::new(config.currency_symbol.as_str()))?,
            pdf_currency: CurrencyFormat::new(config.pdf_currency_prefix.as_str()),
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::calculate))
        .route("/download-pdf", post(handlers::download_pdf))
        .route("/download-csv", post(handlers::download_csv))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(from_fn(middleware::request_tracing))
        .with_state(state)
}
