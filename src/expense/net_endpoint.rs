//! Defines the endpoint for the net total of all expenses.

use axum::extract::State;

use crate::{
    Error,
    envelope::Envelope,
    expense::{ExpenseQuery, ExpenseState, NetTotal, select_net_total},
};

/// A route handler for the sum of every expense amount.
///
/// Responds with `{"total": null}` when there are no expenses.
pub async fn get_net_total(State(state): State<ExpenseState>) -> Result<Envelope<NetTotal>, Error> {
    let connection = state.connection()?;

    let total = select_net_total(&ExpenseQuery::net_total(), &connection)?;

    Ok(Envelope::success(total))
}
