//! Defines the endpoint for creating a new expense.

use axum::extract::State;

use crate::{
    Error,
    database_id::ExpenseId,
    envelope::Envelope,
    expense::{ExpenseForm, ExpenseQuery, ExpenseState, NewExpense, insert_expense},
    extract::JsonBody,
};

/// A route handler for creating a new expense, responds with the generated ID.
///
/// The amount is rounded to two decimal places before it is stored. If any
/// field is missing the request is rejected without touching the database.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    JsonBody(form): JsonBody<ExpenseForm>,
) -> Result<Envelope<ExpenseId>, Error> {
    let expense = NewExpense::try_from(form)?;
    let connection = state.connection()?;

    let id = insert_expense(&ExpenseQuery::insert(&expense), &connection)?;
    tracing::debug!("Created expense {id}");

    Ok(Envelope::success(id))
}
