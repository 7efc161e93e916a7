//! A JSON REST API for recording expenses.
//!
//! The API lists, searches, totals, creates, updates and deletes rows in a
//! single SQLite table of expenses. Every response is wrapped in an
//! `{ok, results}` envelope.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
mod database_id;
mod db;
pub mod endpoints;
mod envelope;
mod error;
mod expense;
mod extract;
mod logging;
mod routing;

pub use app_state::AppState;
pub use config::{Args, Config, ConfigError, ConfigFile};
pub use database_id::{DatabaseId, ExpenseId};
pub use db::initialize as initialize_db;
pub use envelope::Envelope;
pub use error::Error;
pub use expense::{
    Amount, DateFilter, ExpenseForm, ExpenseQuery, ExpenseRow, ExpenseView, NetTotal, NewExpense,
    insert_expense, select_expenses,
};
pub use logging::{add_tracing_layer, setup_logging};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
