//! Executes [ExpenseQuery] statements against the database connection.

use rusqlite::{Connection, params_from_iter};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Amount, ExpenseQuery, ExpenseRow, NetTotal, map_expense_row},
};

/// The number of rows changed by an update or delete.
pub type RowsAffected = usize;

/// Run a `SELECT` over the expenses table and map every row.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn select_expenses(
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<Vec<ExpenseRow>, Error> {
    connection
        .prepare(query.sql)?
        .query_map(params_from_iter(query.params.iter()), map_expense_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Run a query that returns a single `total` column, e.g. [ExpenseQuery::net_total].
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn select_net_total(query: &ExpenseQuery, connection: &Connection) -> Result<NetTotal, Error> {
    let total: Option<i64> = connection.query_row(
        query.sql,
        params_from_iter(query.params.iter()),
        |row| row.get(0),
    )?;

    Ok(NetTotal {
        total: total.map(Amount::from_cents),
    })
}

/// Run an `INSERT ... RETURNING id` statement and return the generated ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn insert_expense(query: &ExpenseQuery, connection: &Connection) -> Result<ExpenseId, Error> {
    connection
        .prepare(query.sql)?
        .query_row(params_from_iter(query.params.iter()), |row| row.get(0))
        .map_err(Error::from)
}

/// Run a statement that modifies rows, e.g. an update or delete.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn execute_statement(
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(query.sql, params_from_iter(query.params.iter()))
        .map_err(Error::from)
}
