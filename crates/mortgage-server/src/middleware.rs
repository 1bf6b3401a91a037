use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, info_span, warn, Instrument};

/// Wrap each request in an `http.request` span and log how it ended.
pub async fn request_tracing(req: Request, next: Next) -> Response {
    let span = info_span!(
        "http.request",
        method = %req.method(),
        path = %req.uri().path()
    );

    async move {
        let start = Instant::now();
        let response = next.run(req).await;
        let status = response.status();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if status.is_server_error() {
            warn!(status = status.as_u16(), elapsed_ms, "request failed");
        } else {
            info!(status = status.as_u16(), elapsed_ms, "request completed");
        }
        response
    }
    .instrument(span)
    .await
}
