//! Defines the expense models, the expenses table and the row mapper.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{database_id::ExpenseId, expense::Amount};

// ============================================================================
// MODELS
// ============================================================================

/// An expense exactly as it is persisted in the expenses table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    /// The ID assigned by the database when the expense was created.
    pub id: ExpenseId,
    /// How much money was spent (or earned, if negative).
    pub amount: Amount,
    /// The year the expense happened.
    pub year: i64,
    /// The month the expense happened.
    pub month: i64,
    /// The day of the month the expense happened.
    pub day: i64,
    /// A text description of what the expense was for.
    pub description: String,
    /// When the row was inserted.
    pub created_at: OffsetDateTime,
    /// When the row was last written to.
    pub updated_at: OffsetDateTime,
}

/// The public representation of an expense returned by the API.
///
/// Use `ExpenseView::from(row)` to create one from an [ExpenseRow].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ExpenseView {
    pub id: ExpenseId,
    pub amount: Amount,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated: OffsetDateTime,
}

impl From<ExpenseRow> for ExpenseView {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            year: row.year,
            month: row.month,
            day: row.day,
            description: row.description,
            created: row.created_at,
            updated: row.updated_at,
        }
    }
}

/// The caller supplied fields of an expense, used for inserts and updates.
///
/// The date triple is not checked to be a real calendar date.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewExpense {
    pub amount: Amount,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub description: String,
}

/// The sum of all expense amounts.
///
/// `total` is `None` when there are no expenses, following SQL's rule that
/// the sum of an empty set is `NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetTotal {
    /// The sum of every amount, or `None` if the table is empty.
    pub total: Option<Amount>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the expenses table in the database.
///
/// Amounts are stored as whole cents and timestamps as Unix seconds.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                day INTEGER NOT NULL,
                description TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (unixepoch()),
                updated_at INTEGER NOT NULL DEFAULT (unixepoch())
                )",
        (),
    )?;

    // Used by the date-scoped queries and their ordering.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(year, month, day);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [ExpenseRow].
///
/// The row must contain the columns `id, amount, year, month, day, description,
/// created_at, updated_at`, in that order.
pub fn map_expense_row(row: &Row) -> Result<ExpenseRow, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = Amount::from_cents(row.get(1)?);
    let year = row.get(2)?;
    let month = row.get(3)?;
    let day = row.get(4)?;
    let description = row.get(5)?;
    let created_at = get_timestamp(row, 6)?;
    let updated_at = get_timestamp(row, 7)?;

    Ok(ExpenseRow {
        id,
        amount,
        year,
        month,
        day,
        description,
        created_at,
        updated_at,
    })
}

fn get_timestamp(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let seconds: i64 = row.get(index)?;

    OffsetDateTime::from_unix_timestamp(seconds).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(error))
    })
}

// ============================================================================
// TESTS
// ============================================================================
