//! Logging setup for the server.

use std::{fs::OpenOptions, path::Path, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    response::Response,
};
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global tracing subscriber.
///
/// Logs are written to stdout filtered by the `RUST_LOG` environment variable
/// (defaulting to `info`), and every event at `debug` level or above is
/// appended to the file at `log_file_path`.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn setup_logging(log_file_path: &Path) -> Result<(), std::io::Error> {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

/// Wrap `router` in a layer that opens a span for each request and logs the
/// status and latency of each response.
pub fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        .on_response(|response: &Response, latency: Duration, _span: &Span| {
            tracing::debug!(status = %response.status(), ?latency, "sent response");
        })
        // By default, `TraceLayer` will log 5xx responses but the error type
        // logs its own failures, so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
