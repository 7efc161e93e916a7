//! Expense management for the API.
//!
//! This module contains everything related to expenses:
//! - The `ExpenseRow`/`ExpenseView` models and the row mapper between them
//! - The query builders and the functions that execute them
//! - The JSON route handlers

mod amount;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod list_endpoints;
mod model;
mod net_endpoint;
mod query;
mod state;
mod store;

pub use amount::Amount;
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use form::{ExpenseForm, INCOMPLETE_EXPENSE_MESSAGE};
pub use list_endpoints::{
    get_all_expenses, get_expense_by_id, get_expenses_by_day, get_expenses_by_keyword,
    get_expenses_by_month, get_expenses_by_year,
};
pub use model::{
    ExpenseRow, ExpenseView, NetTotal, NewExpense, create_expense_table, map_expense_row,
};
pub use net_endpoint::get_net_total;
pub use query::{DateFilter, ExpenseQuery};
pub use state::ExpenseState;
pub use store::{
    RowsAffected, execute_statement, insert_expense, select_expenses, select_net_total,
};

#[cfg(test)]
pub(crate) use state::get_test_expense_state;
