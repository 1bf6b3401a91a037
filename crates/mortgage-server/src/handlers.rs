use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use mortgage_core::render::csv_out::render_csv;
use mortgage_core::render::html::FormValues;
use mortgage_core::render::pdf::render_pdf;
use mortgage_core::MortgageReport;
use serde_json::json;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::form::MortgageForm;
use crate::AppState;

const PDF_DISPOSITION: &str = "attachment; filename=mortgage_breakdown.pdf";
const CSV_DISPOSITION: &str = "attachment; filename=mortgage_breakdown.csv";

/// GET / : the empty calculator form.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let page = state.html.render_form(&FormValues::default(), None)?;
    Ok(Html(page))
}

/// POST / : the form again, followed by the summary and schedule. Invalid
/// input re-renders the form with an error banner and a 400 status.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MortgageForm>,
) -> Result<Response, ServerError> {
    let values = form.echo();
    let report = form
        .parse()
        .map_err(ServerError::from)
        .and_then(|terms| MortgageReport::from_terms(terms).map_err(ServerError::from));

    match report {
        Ok(report) => {
            info!(
                months = report.terms.fixed_months(),
                source = ?report.terms.payment_source(),
                "schedule computed"
            );
            let page = state.html.render_report(&values, &report)?;
            Ok(Html(page).into_response())
        }
        Err(err) if err.status() == StatusCode::BAD_REQUEST => {
            let message = err.to_string();
            debug!(error = %message, "rejected form");
            let page = state.html.render_form(&values, Some(&message))?;
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
        Err(err) => Err(err),
    }
}

/// POST /download-pdf
pub async fn download_pdf(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MortgageForm>,
) -> Result<Response, ServerError> {
    let report = MortgageReport::from_terms(form.parse()?)?;
    let bytes = render_pdf(&report, &state.pdf_currency)?;
    info!(bytes = bytes.len(), "pdf rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, PDF_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

/// POST /download-csv
pub async fn download_csv(Form(form): Form<MortgageForm>) -> Result<Response, ServerError> {
    let report = MortgageReport::from_terms(form.parse()?)?;
    let bytes = render_csv(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
