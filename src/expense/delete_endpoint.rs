//! Defines the endpoint for deleting an expense.

use axum::extract::State;

use crate::{
    Error,
    database_id::ExpenseId,
    envelope::Envelope,
    expense::{ExpenseQuery, ExpenseState, execute_statement},
    extract::PathParams,
};

/// A route handler for deleting an expense, responds with `{"ok": true}`.
///
/// There is no existence check: deleting an ID that does not exist is
/// reported as a success.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    PathParams(id): PathParams<ExpenseId>,
) -> Result<Envelope<()>, Error> {
    let connection = state.connection()?;

    match execute_statement(&ExpenseQuery::delete(id), &connection)? {
        0 => tracing::warn!("Delete of expense {id} affected zero rows"),
        _ => tracing::debug!("Deleted expense {id}"),
    }

    Ok(Envelope::empty())
}
