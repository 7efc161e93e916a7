//! Application router configuration.

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
};

use crate::{
    AppState, Error, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint, get_all_expenses,
        get_expense_by_id, get_expenses_by_day, get_expenses_by_keyword, get_expenses_by_month,
        get_expenses_by_year, get_net_total,
    },
};

/// Return a router with all the app's routes.
///
/// Every response carries CORS headers allowing any origin, and `OPTIONS`
/// requests on any path are answered directly with `200 OK`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(endpoints::ALL_EXPENSES, get(get_all_expenses))
        .route(endpoints::NET_TOTAL, get(get_net_total))
        .route(endpoints::EXPENSES_BY_KEYWORD, get(get_expenses_by_keyword))
        .route(endpoints::EXPENSE_BY_ID, get(get_expense_by_id))
        .route(endpoints::EXPENSES, post(create_expense_endpoint))
        .route(
            endpoints::EXPENSES_BY_YEAR_OR_ID,
            get(get_expenses_by_year)
                .patch(edit_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(endpoints::EXPENSES_BY_MONTH, get(get_expenses_by_month))
        .route(endpoints::EXPENSES_BY_DAY, get(get_expenses_by_day))
        .route_service(endpoints::REPORT, ServeFile::new(&state.report_path))
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(cors)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

async fn get_405_method_not_allowed() -> Response {
    Error::MethodNotAllowed.into_response()
}

#[cfg(test)]
mod router_tests {
    use axum::http::{Method, StatusCode};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router,
        endpoints::{self, format_endpoint},
        envelope::Envelope,
        expense::{ExpenseView, INCOMPLETE_EXPENSE_MESSAGE},
    };

    const REPORT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/report.html");

    fn get_test_server_with_report(report_path: &str) -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection, report_path).expect("Could not create app state.");

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    fn get_test_server() -> TestServer {
        get_test_server_with_report(REPORT_PATH)
    }

    fn expense_json(amount: Value, (year, month, day): (i64, i64, i64), description: &str) -> Value {
        json!({
            "amount": amount,
            "year": year,
            "month": month,
            "day": day,
            "description": description,
        })
    }

    async fn create_expense(server: &TestServer, body: &Value) -> i64 {
        let response = server.post(endpoints::EXPENSES).json(body).await;
        response.assert_status_ok();

        response
            .json::<Envelope<i64>>()
            .results
            .expect("no ID in response")
    }

    async fn list(server: &TestServer, path: &str) -> Vec<ExpenseView> {
        let response = server.get(path).await;
        response.assert_status_ok();

        let envelope = response.json::<Envelope<Vec<ExpenseView>>>();
        assert!(envelope.ok);
        envelope.results.expect("no results in response")
    }

    fn dates(expenses: &[ExpenseView]) -> Vec<(i64, i64, i64)> {
        expenses
            .iter()
            .map(|expense| (expense.year, expense.month, expense.day))
            .collect()
    }

    #[tokio::test]
    async fn created_expense_is_retrievable_by_id() {
        let server = get_test_server();

        let id = create_expense(
            &server,
            &expense_json(json!(49.99), (2013, 2, 3), "Got my first bike!"),
        )
        .await;
        let expenses = list(&server, &format_endpoint(endpoints::EXPENSE_BY_ID, &[id])).await;

        assert_eq!(expenses.len(), 1);
        let expense = &expenses[0];
        assert_eq!(expense.id, id);
        assert_eq!(expense.amount.to_string(), "49.99");
        assert_eq!((expense.year, expense.month, expense.day), (2013, 2, 3));
        assert_eq!(expense.description, "Got my first bike!");
    }

    #[tokio::test]
    async fn amount_is_returned_with_two_decimal_places() {
        let server = get_test_server();
        let id = create_expense(&server, &expense_json(json!(49.9), (2013, 2, 3), "bike")).await;

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, &[id]))
            .await;

        let body = response.json::<Value>();
        assert_eq!(body["results"][0]["amount"], json!("49.90"));
        assert!(body["results"][0]["created"].is_string());
        assert!(body["results"][0]["updated"].is_string());
    }

    #[tokio::test]
    async fn amount_may_be_sent_as_string() {
        let server = get_test_server();

        let id = create_expense(&server, &expense_json(json!("12.3"), (2020, 1, 1), "x")).await;

        let expenses = list(&server, &format_endpoint(endpoints::EXPENSE_BY_ID, &[id])).await;
        assert_eq!(expenses[0].amount.to_string(), "12.30");
    }

    #[tokio::test]
    async fn all_is_ordered_by_date_descending() {
        let server = get_test_server();
        for date in [(2015, 4, 10), (2016, 1, 1), (2015, 12, 31), (2014, 6, 1)] {
            create_expense(&server, &expense_json(json!(1), date, "x")).await;
        }

        let expenses = list(&server, endpoints::ALL_EXPENSES).await;

        assert_eq!(
            dates(&expenses),
            vec![(2016, 1, 1), (2015, 12, 31), (2015, 4, 10), (2014, 6, 1)]
        );
    }

    #[tokio::test]
    async fn date_scoped_lists_filter_and_order() {
        let server = get_test_server();
        for date in [
            (2015, 4, 10),
            (2015, 4, 11),
            (2015, 5, 1),
            (2016, 4, 10),
        ] {
            create_expense(&server, &expense_json(json!(1), date, "x")).await;
        }

        let by_year = list(
            &server,
            &format_endpoint(endpoints::EXPENSES_BY_YEAR_OR_ID, &[2015]),
        )
        .await;
        let by_month = list(
            &server,
            &format_endpoint(endpoints::EXPENSES_BY_MONTH, &[2015, 4]),
        )
        .await;
        let by_day = list(
            &server,
            &format_endpoint(endpoints::EXPENSES_BY_DAY, &[2015, 4, 10]),
        )
        .await;

        assert_eq!(
            dates(&by_year),
            vec![(2015, 5, 1), (2015, 4, 11), (2015, 4, 10)]
        );
        assert_eq!(dates(&by_month), vec![(2015, 4, 11), (2015, 4, 10)]);
        assert_eq!(dates(&by_day), vec![(2015, 4, 10)]);
    }

    #[tokio::test]
    async fn net_total_of_empty_table_is_null() {
        let server = get_test_server();

        let response = server.get(endpoints::NET_TOTAL).await;

        response.assert_status_ok();
        response.assert_json(&json!({"ok": true, "results": {"total": null}}));
    }

    #[tokio::test]
    async fn net_total_sums_amounts() {
        let server = get_test_server();
        create_expense(&server, &expense_json(json!(49.99), (2013, 2, 3), "bike")).await;
        create_expense(&server, &expense_json(json!(-9.99), (2013, 2, 4), "refund")).await;

        let response = server.get(endpoints::NET_TOTAL).await;

        response.assert_json(&json!({"ok": true, "results": {"total": "40.00"}}));
    }

    #[tokio::test]
    async fn keyword_returns_only_matching_expense() {
        let server = get_test_server();
        create_expense(&server, &expense_json(json!(49.99), (2013, 2, 3), "Got my first bike!")).await;
        let coffee_id =
            create_expense(&server, &expense_json(json!(4.5), (2013, 2, 4), "Flat white coffee")).await;

        let expenses = list(
            &server,
            &format_endpoint(endpoints::EXPENSES_BY_KEYWORD, &["white"]),
        )
        .await;

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, coffee_id);
    }

    #[tokio::test]
    async fn keyword_without_match_is_empty_list() {
        let server = get_test_server();
        create_expense(&server, &expense_json(json!(49.99), (2013, 2, 3), "bike")).await;

        let response = server
            .get(&format_endpoint(endpoints::EXPENSES_BY_KEYWORD, &["rent"]))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"ok": true, "results": []}));
    }

    #[tokio::test]
    async fn missing_field_is_rejected_without_insert() {
        let server = get_test_server();
        let mut body = expense_json(json!(49.99), (2013, 2, 3), "bike");
        body.as_object_mut().unwrap().remove("day");

        let response = server.post(endpoints::EXPENSES).json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"ok": false, "results": INCOMPLETE_EXPENSE_MESSAGE}));
        assert!(list(&server, endpoints::ALL_EXPENSES).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({"amount": "lots", "year": 2013, "month": 2, "day": 3, "description": "x"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["ok"], json!(false));
        assert!(list(&server, endpoints::ALL_EXPENSES).await.is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_BY_ID, &["four"]))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["ok"], json!(false));
    }

    #[tokio::test]
    async fn update_overwrites_expense() {
        let server = get_test_server();
        let id = create_expense(&server, &expense_json(json!(49.99), (2013, 2, 3), "bike")).await;

        let response = server
            .patch(&format_endpoint(endpoints::EXPENSES_BY_YEAR_OR_ID, &[id]))
            .json(&expense_json(json!(49.59), (2013, 2, 4), "Got my first bike!"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"ok": true}));
        let expenses = list(&server, &format_endpoint(endpoints::EXPENSE_BY_ID, &[id])).await;
        assert_eq!(expenses[0].amount.to_string(), "49.59");
        assert_eq!(expenses[0].day, 4);
        assert_eq!(expenses[0].description, "Got my first bike!");
    }

    #[tokio::test]
    async fn update_of_missing_expense_succeeds() {
        let server = get_test_server();

        let response = server
            .patch(&format_endpoint(endpoints::EXPENSES_BY_YEAR_OR_ID, &[404]))
            .json(&expense_json(json!(1), (2013, 2, 4), "x"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"ok": true}));
        assert!(list(&server, endpoints::ALL_EXPENSES).await.is_empty());
    }

    #[tokio::test]
    async fn incomplete_update_is_rejected() {
        let server = get_test_server();
        let id = create_expense(&server, &expense_json(json!(49.99), (2013, 2, 3), "bike")).await;

        let response = server
            .patch(&format_endpoint(endpoints::EXPENSES_BY_YEAR_OR_ID, &[id]))
            .json(&json!({"amount": 1}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let expenses = list(&server, &format_endpoint(endpoints::EXPENSE_BY_ID, &[id])).await;
        assert_eq!(expenses[0].description, "bike");
    }

    #[tokio::test]
    async fn delete_removes_expense() {
        let server = get_test_server();
        let id = create_expense(&server, &expense_json(json!(49.99), (2013, 2, 3), "bike")).await;

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSES_BY_YEAR_OR_ID, &[id]))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"ok": true}));
        assert!(list(&server, endpoints::ALL_EXPENSES).await.is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_expense_succeeds() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSES_BY_YEAR_OR_ID, &[6]))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"ok": true}));
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let server = get_test_server();

        let response = server.get(endpoints::ALL_EXPENSES).await;

        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn options_is_answered_with_cors_headers() {
        let server = get_test_server();

        let response = server.method(Method::OPTIONS, "/anything/at/all").await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
        let allowed_methods = response.header("access-control-allow-methods");
        let allowed_methods = allowed_methods.to_str().unwrap();
        for method in ["GET", "POST", "PATCH", "DELETE"] {
            assert!(allowed_methods.contains(method), "{method} not allowed");
        }
        assert_eq!(
            response
                .header("access-control-allow-headers")
                .to_str()
                .unwrap()
                .to_lowercase(),
            "content-type"
        );
    }

    #[tokio::test]
    async fn unknown_route_is_not_found_envelope() {
        let server = get_test_server();

        let response = server.get("/nope").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["ok"], json!(false));
    }

    #[tokio::test]
    async fn wrong_method_is_method_not_allowed_envelope() {
        let server = get_test_server();

        let response = server.method(Method::PUT, endpoints::ALL_EXPENSES).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_json(&json!({"ok": false, "results": "Method not allowed."}));
    }

    #[tokio::test]
    async fn string_date_fields_are_accepted() {
        let server = get_test_server();
        let body = json!({
            "amount": 1.5,
            "year": "2013",
            "month": "2",
            "day": " 3 ",
            "description": "bus fare",
        });

        let id = create_expense(&server, &body).await;

        let expenses = list(&server, &format_endpoint(endpoints::EXPENSE_BY_ID, &[id])).await;
        assert_eq!(dates(&expenses), vec![(2013, 2, 3)]);
        assert_eq!(expenses[0].amount.to_string(), "1.50");
    }

    #[tokio::test]
    async fn non_numeric_date_field_is_bad_request() {
        let server = get_test_server();
        let body = json!({
            "amount": 1.5,
            "year": "last year",
            "month": 2,
            "day": 3,
            "description": "bus fare",
        });

        let response = server.post(endpoints::EXPENSES).json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["ok"], json!(false));
        assert!(list(&server, endpoints::ALL_EXPENSES).await.is_empty());
    }

    #[tokio::test]
    async fn report_page_is_served() {
        let server = get_test_server();

        let response = server.get(endpoints::REPORT).await;

        response.assert_status_ok();
        assert!(response.text().contains("<html"));
    }

    #[tokio::test]
    async fn missing_report_page_is_not_found() {
        let server = get_test_server_with_report("does/not/exist.html");

        let response = server.get(endpoints::REPORT).await;

        response.assert_status_not_found();
    }
}
