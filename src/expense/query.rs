//! Builds the SQL text and bound parameters for each expense operation.
//!
//! Every value supplied by a client is bound as a positional parameter. The
//! SQL text itself is always a string literal.

use rusqlite::types::Value;

use crate::{database_id::ExpenseId, expense::NewExpense};

/// Prefix `$clause` with a `SELECT` of every expense column.
macro_rules! select_expenses {
    ($clause:literal) => {
        concat!(
            "SELECT id, amount, year, month, day, description, created_at, updated_at \
             FROM expenses",
            $clause
        )
    };
}

/// Narrows a listing of expenses down to a year, a month or a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Every expense in `year`.
    Year {
        /// The year to match.
        year: i64,
    },
    /// Every expense in `month` of `year`.
    Month {
        /// The year to match.
        year: i64,
        /// The month to match.
        month: i64,
    },
    /// Every expense on a single day.
    Day {
        /// The year to match.
        year: i64,
        /// The month to match.
        month: i64,
        /// The day of the month to match.
        day: i64,
    },
}

/// A SQL statement paired with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseQuery {
    /// The SQL text with `?N` placeholders.
    pub sql: &'static str,
    /// The values for the placeholders, in order.
    pub params: Vec<Value>,
}

impl ExpenseQuery {
    /// Every expense, newest date first.
    pub fn all() -> Self {
        Self {
            sql: select_expenses!(" ORDER BY year DESC, month DESC, day DESC, id DESC"),
            params: Vec::new(),
        }
    }

    /// The sum of every expense amount as a single row with the column `total`.
    pub fn net_total() -> Self {
        Self {
            sql: "SELECT SUM(amount) AS total FROM expenses",
            params: Vec::new(),
        }
    }

    /// Every expense whose description contains `key`.
    ///
    /// The wildcard pattern is built here and bound as a value, and any
    /// wildcard characters inside `key` are escaped so they match literally.
    pub fn by_keyword(key: &str) -> Self {
        Self {
            sql: select_expenses!(" WHERE description LIKE ?1 ESCAPE '\\'"),
            params: vec![Value::Text(substring_pattern(key))],
        }
    }

    /// The expense with the ID `id`, if any.
    pub fn by_id(id: ExpenseId) -> Self {
        Self {
            sql: select_expenses!(" WHERE id = ?1"),
            params: vec![Value::Integer(id)],
        }
    }

    /// The expenses matching `filter`, newest date first.
    pub fn by_date(filter: DateFilter) -> Self {
        match filter {
            DateFilter::Year { year } => Self {
                sql: select_expenses!(
                    " WHERE year = ?1 ORDER BY year DESC, month DESC, day DESC, id DESC"
                ),
                params: vec![Value::Integer(year)],
            },
            DateFilter::Month { year, month } => Self {
                sql: select_expenses!(
                    " WHERE year = ?1 AND month = ?2 \
                     ORDER BY year DESC, month DESC, day DESC, id DESC"
                ),
                params: vec![Value::Integer(year), Value::Integer(month)],
            },
            DateFilter::Day { year, month, day } => Self {
                sql: select_expenses!(
                    " WHERE year = ?1 AND month = ?2 AND day = ?3 \
                     ORDER BY year DESC, month DESC, day DESC, id DESC"
                ),
                params: vec![
                    Value::Integer(year),
                    Value::Integer(month),
                    Value::Integer(day),
                ],
            },
        }
    }

    /// Insert `expense` and return its generated ID.
    pub fn insert(expense: &NewExpense) -> Self {
        Self {
            sql: "INSERT INTO expenses (amount, year, month, day, description) \
                  VALUES (?1, ?2, ?3, ?4, ?5) \
                  RETURNING id",
            params: expense_params(expense),
        }
    }

    /// Overwrite every caller supplied field of the expense `id` and refresh its update time.
    pub fn update(id: ExpenseId, expense: &NewExpense) -> Self {
        let mut params = expense_params(expense);
        params.push(Value::Integer(id));

        Self {
            sql: "UPDATE expenses \
                  SET amount = ?1, year = ?2, month = ?3, day = ?4, description = ?5, \
                      updated_at = unixepoch() \
                  WHERE id = ?6",
            params,
        }
    }

    /// Delete the expense `id`.
    pub fn delete(id: ExpenseId) -> Self {
        Self {
            sql: "DELETE FROM expenses WHERE id = ?1",
            params: vec![Value::Integer(id)],
        }
    }
}

fn expense_params(expense: &NewExpense) -> Vec<Value> {
    vec![
        Value::Integer(expense.amount.cents()),
        Value::Integer(expense.year),
        Value::Integer(expense.month),
        Value::Integer(expense.day),
        Value::Text(expense.description.clone()),
    ]
}

/// Build a `LIKE` pattern matching any text that contains `key`.
///
/// Assumes the statement declares `ESCAPE '\'`.
fn substring_pattern(key: &str) -> String {
    let mut pattern = String::with_capacity(key.len() + 2);
    pattern.push('%');

    for c in key.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }

    pattern.push('%');
    pattern
}
