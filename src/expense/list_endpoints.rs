//! Route handlers for reading lists of expenses.

use axum::extract::State;

use crate::{
    Error,
    database_id::ExpenseId,
    envelope::Envelope,
    expense::{DateFilter, ExpenseQuery, ExpenseState, ExpenseView, select_expenses},
    extract::PathParams,
};

type ExpenseList = Envelope<Vec<ExpenseView>>;

/// A route handler for listing every expense, newest date first.
pub async fn get_all_expenses(State(state): State<ExpenseState>) -> Result<ExpenseList, Error> {
    list_expenses(&state, ExpenseQuery::all())
}

/// A route handler for listing the expenses whose description contains the keyword.
pub async fn get_expenses_by_keyword(
    State(state): State<ExpenseState>,
    PathParams(key): PathParams<String>,
) -> Result<ExpenseList, Error> {
    list_expenses(&state, ExpenseQuery::by_keyword(&key))
}

/// A route handler for getting an expense by its ID.
///
/// Responds with a list so that an unknown ID gives an empty list rather than an error.
pub async fn get_expense_by_id(
    State(state): State<ExpenseState>,
    PathParams(id): PathParams<ExpenseId>,
) -> Result<ExpenseList, Error> {
    list_expenses(&state, ExpenseQuery::by_id(id))
}

/// A route handler for listing the expenses in a year.
pub async fn get_expenses_by_year(
    State(state): State<ExpenseState>,
    PathParams(year): PathParams<i64>,
) -> Result<ExpenseList, Error> {
    list_expenses(&state, ExpenseQuery::by_date(DateFilter::Year { year }))
}

/// A route handler for listing the expenses in a month.
pub async fn get_expenses_by_month(
    State(state): State<ExpenseState>,
    PathParams((year, month)): PathParams<(i64, i64)>,
) -> Result<ExpenseList, Error> {
    list_expenses(
        &state,
        ExpenseQuery::by_date(DateFilter::Month { year, month }),
    )
}

/// A route handler for listing the expenses on a single day.
pub async fn get_expenses_by_day(
    State(state): State<ExpenseState>,
    PathParams((year, month, day)): PathParams<(i64, i64, i64)>,
) -> Result<ExpenseList, Error> {
    list_expenses(
        &state,
        ExpenseQuery::by_date(DateFilter::Day { year, month, day }),
    )
}

fn list_expenses(state: &ExpenseState, query: ExpenseQuery) -> Result<ExpenseList, Error> {
    let connection = state.connection()?;

    let rows = select_expenses(&query, &connection)?;

    Ok(Envelope::success(
        rows.into_iter().map(ExpenseView::from).collect(),
    ))
}
