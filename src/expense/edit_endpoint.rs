//! Defines the endpoint for updating an expense.

use axum::extract::State;

use crate::{
    Error,
    database_id::ExpenseId,
    envelope::Envelope,
    expense::{ExpenseForm, ExpenseQuery, ExpenseState, NewExpense, execute_statement},
    extract::{JsonBody, PathParams},
};

/// A route handler for overwriting an expense, responds with `{"ok": true}`.
///
/// There is no existence check: updating an ID that does not exist is
/// reported as a success.
pub async fn edit_expense_endpoint(
    State(state): State<ExpenseState>,
    PathParams(id): PathParams<ExpenseId>,
    JsonBody(form): JsonBody<ExpenseForm>,
) -> Result<Envelope<()>, Error> {
    let expense = NewExpense::try_from(form)?;
    let connection = state.connection()?;

    match execute_statement(&ExpenseQuery::update(id, &expense), &connection)? {
        0 => tracing::warn!("Update of expense {id} affected zero rows"),
        _ => tracing::debug!("Updated expense {id}"),
    }

    Ok(Envelope::empty())
}
