//! The API endpoints URIs.
//!
//! For endpoints that take parameters, e.g., '/id/{id}', use [format_endpoint].

use std::fmt::Display;

/// The route for listing every expense.
pub const ALL_EXPENSES: &str = "/all";
/// The route for the sum of every expense amount.
pub const NET_TOTAL: &str = "/net";
/// The route for searching expense descriptions.
pub const EXPENSES_BY_KEYWORD: &str = "/keyword/{key}";
/// The route for getting a single expense as a list.
pub const EXPENSE_BY_ID: &str = "/id/{id}";
/// The route to create expenses.
pub const EXPENSES: &str = "/expenses";
/// The route for listing a year's expenses (GET), and for updating (PATCH) or
/// deleting (DELETE) the expense with the given ID.
///
/// Both share a single route because the router does not allow two
/// differently named parameters in the same position.
pub const EXPENSES_BY_YEAR_OR_ID: &str = "/expenses/{year_or_id}";
/// The route for listing a month's expenses.
pub const EXPENSES_BY_MONTH: &str = "/expenses/{year}/{month}";
/// The route for listing a single day's expenses.
pub const EXPENSES_BY_DAY: &str = "/expenses/{year}/{month}/{day}";
/// The route for the static report page.
pub const REPORT: &str = "/report.html";

/// Replace the parameters in `endpoint_path` with `values`, left to right.
///
/// A parameter is a string that starts with a left brace and ends with a
/// right brace. For example, in the endpoint path '/expenses/{year}/{month}',
/// '{year}' and '{month}' are the parameters.
///
/// Parameters without a matching value are left as they are, and extra values
/// are ignored.
pub fn format_endpoint<T: Display>(endpoint_path: &str, values: &[T]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut values = values.iter();
    let mut rest = endpoint_path;

    while let Some(start) = rest.find('{') {
        let Some(end) = rest[start..].find('}').map(|end| start + end + 1) else {
            break;
        };
        let Some(value) = values.next() else {
            break;
        };

        formatted.push_str(&rest[..start]);
        formatted.push_str(&value.to_string());
        rest = &rest[end..];
    }

    formatted.push_str(rest);
    formatted
}
