//! The per-endpoint state shared by the expense handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, Error};

/// The state needed by the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

impl ExpenseState {
    /// Lock the shared connection for the duration of one statement.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] if the lock is poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

#[cfg(test)]
pub(crate) fn get_test_expense_state() -> ExpenseState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    crate::db::initialize(&connection).expect("could not initialize test DB");

    ExpenseState {
        db_connection: Arc::new(Mutex::new(connection)),
    }
}
