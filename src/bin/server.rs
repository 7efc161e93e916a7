use std::{net::SocketAddr, path::Path, process::exit};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;

use expense_api::{
    AppState, Args, Config, add_tracing_layer, build_router, graceful_shutdown, setup_logging,
};

#[tokio::main]
async fn main() {
    let config = match Config::load(Args::parse()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    if let Err(error) = setup_logging(Path::new("debug.log")) {
        eprintln!("Could not create log file: {error}");
        exit(1);
    }

    // There is no reconnect logic, so a database that cannot be opened is fatal.
    let connection = match Connection::open(&config.store_connection) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!(
                "Could not open database {:?}: {error}",
                config.store_connection
            );
            exit(1);
        }
    };

    let state = match AppState::new(connection, &config.report_path) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize database: {error}");
            exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        exit(1);
    }
}
