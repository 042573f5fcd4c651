//! Router tests.
//!
//! Requests are driven in-process through `tower::ServiceExt::oneshot`
//! against a `MockStore`, so no Postgres is required. The Postgres-backed
//! store is covered by `crates/db/tests/`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use db::mock::MockStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{normalize_uri, App, AppState};

fn app(store: &MockStore) -> App {
    crate::app(AppState::new(Arc::new(store.clone())))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &App, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, body)
}

fn add_account_uri(bank_id: i32, number: &str) -> String {
    format!(
        "/Api/AddAccount?bankId={bank_id}&name=Checking&description=everyday\
         &startingBalance=100.00&currentBalance=100.00&typeId=1\
         &accountNumber={number}&routingNumber=021000021&isDeleted=false"
    )
}

// ============================================================
// list fetches
// ============================================================

#[tokio::test]
async fn accounts_are_filtered_by_bank_id() {
    let store = MockStore::new();
    let app = app(&store);
    for (bank, number) in [(1, "111"), (1, "222"), (1, "333"), (2, "444")] {
        let (status, _) = send(&app, post(&add_account_uri(bank, number))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, get("/Api/Accounts?bankId=1")).await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().expect("array");
    assert_eq!(accounts.len(), 3);
    assert!(accounts.iter().all(|a| a["bankId"] == 1));
    assert_eq!(accounts[0]["currentBalance"], "100.00");
    assert_eq!(accounts[0]["accountTypeId"], 1);
}

#[tokio::test]
async fn unknown_filter_ids_yield_empty_arrays() {
    let store = MockStore::new();
    let app = app(&store);

    for uri in [
        "/Api/Accounts?bankId=42",
        "/Api/Banks?householdId=42",
        "/Api/BudgetItems?budgetId=42",
        "/Api/Transactions?accountId=42",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }
}

// ============================================================
// single fetches
// ============================================================

#[tokio::test]
async fn missing_single_records_are_null_not_errors() {
    let store = MockStore::new();
    let app = app(&store);

    for uri in [
        "/Api/Account?accountId=7",
        "/Api/BudgetItem?budgetItemId=7",
        "/Api/Budget?householdId=7",
        "/Api/Household?householdId=7",
        "/Api/Transaction?transactionId=7",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, Value::Null, "{uri}");
    }
}

#[tokio::test]
async fn household_and_budget_are_fetched_by_household_id() {
    let store = MockStore::new();
    let household = store.seed_household("Smith");
    db::FinanceStore::add_budget(
        &store,
        &db::models::NewBudget {
            household_id: household.id,
            name: "Monthly".into(),
            description: "everything".into(),
            spending_target: rust_decimal::Decimal::new(300000, 2),
        },
    )
    .await
    .unwrap();
    let app = app(&store);

    let (status, body) = send(&app, get(&format!("/Api/Household?householdId={}", household.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Smith");

    let (status, body) = send(&app, get(&format!("/Api/Budget?householdId={}", household.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["householdId"], household.id);
    assert_eq!(body["spendingTarget"], "3000.00");
}

#[tokio::test]
async fn account_detail_has_created_and_no_bank_id() {
    let store = MockStore::new();
    let app = app(&store);
    send(&app, post(&add_account_uri(3, "9999"))).await;

    let (_, list) = send(&app, get("/Api/Accounts?bankId=3")).await;
    let id = list[0]["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/Api/Account?accountId={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountNumber"], "9999");
    assert!(body.get("created").is_some());
    assert!(body.get("bankId").is_none());
}

// ============================================================
// inserts
// ============================================================

#[tokio::test]
async fn add_bank_from_json_body_then_list() {
    let store = MockStore::new();
    let app = app(&store);

    let (status, body) = send(
        &app,
        post_json(
            "/Api/AddBank",
            json!({
                "householdId": 1,
                "name": "Test Bank",
                "address": "1 Main St",
                "city": "X",
                "state": "NY",
                "zip": "10001",
                "phone": "555-0100"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_i64().expect("integer status") >= 0);

    let (_, banks) = send(&app, get("/Api/Banks?householdId=1")).await;
    let banks = banks.as_array().unwrap();
    assert!(banks.iter().any(|b| b["name"] == "Test Bank" && b["zip"] == "10001"));
}

#[tokio::test]
async fn add_transaction_then_list_returns_submitted_values() {
    let store = MockStore::new();
    let app = app(&store);

    let (status, body) = send(
        &app,
        post("/Api/AddTransaction?accountId=5&amount=-19.99&memo=weekly%20groceries&reconciled=false&type=debit&isDeleted=false"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(1));

    let (_, txs) = send(&app, get("/Api/Transactions?accountId=5")).await;
    let tx = &txs[0];
    assert_eq!(tx["amount"], "-19.99");
    assert_eq!(tx["memo"], "weekly groceries");
    assert_eq!(tx["type"], "debit");
    assert_eq!(tx["reconciled"], false);

    let (status, single) = send(&app, get(&format!("/Api/Transaction?transactionId={}", tx["id"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&single, tx);
}

#[tokio::test]
async fn add_budget_item_then_fetch_it() {
    let store = MockStore::new();
    let app = app(&store);

    let (status, _) = send(
        &app,
        post_json(
            "/Api/AddBudgetItem",
            json!({
                "budgetId": 8,
                "name": "Dining",
                "description": "eating out",
                "spendingTarget": 250,
                "currentSpending": "42.10"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, items) = send(&app, get("/Api/BudgetItems?budgetId=8")).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["bankId"], 8);

    let (_, item) = send(&app, get(&format!("/Api/BudgetItem?budgetItemId={}", items[0]["id"]))).await;
    assert_eq!(item["name"], "Dining");
    assert_eq!(item["currentSpending"], "42.10");
}

#[tokio::test]
async fn concurrent_add_account_calls_both_persist() {
    let store = MockStore::new();
    let app = app(&store);

    let (a, b) = tokio::join!(
        send(&app, post(&add_account_uri(4, "1001"))),
        send(&app, post(&add_account_uri(4, "1002"))),
    );
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);

    let (_, accounts) = send(&app, get("/Api/Accounts?bankId=4")).await;
    let mut numbers: Vec<_> = accounts
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["accountNumber"].as_str().unwrap().to_owned())
        .collect();
    numbers.sort();
    assert_eq!(numbers, vec!["1001", "1002"]);
}

#[tokio::test]
async fn inserts_reject_get() {
    let store = MockStore::new();
    let app = app(&store);
    let (status, _) = send(&app, get(&add_account_uri(1, "1"))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(store.call_count(), 0);
}

// ============================================================
// errors
// ============================================================

#[tokio::test]
async fn missing_or_mistyped_parameters_are_bad_requests() {
    let store = MockStore::new();
    let app = app(&store);

    for req in [
        get("/Api/Accounts"),
        get("/Api/Accounts?bankId=abc"),
        get("/Api/Household?id=1"),
        post("/Api/AddBank?householdId=1&name=Partial"),
        post("/Api/AddTransaction?accountId=1&amount=lots&memo=x&reconciled=false&type=debit&isDeleted=false"),
        post_json("/Api/AddBudgetItem", json!({ "budgetId": "eight" })),
    ] {
        let uri = req.uri().to_string();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400, "{uri}");
    }

    // nothing reached the store
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn store_failures_are_server_errors() {
    let store = MockStore::unavailable("connection refused");
    let app = app(&store);

    let (status, body) = send(&app, get("/Api/Banks?householdId=1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert_eq!(body["error"], "internal server error");

    let (status, _) = send(&app, post(&add_account_uri(1, "1"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // one attempt each, no retries
    assert_eq!(store.call_count(), 2);
}

#[tokio::test]
async fn health_is_outside_the_prefix() {
    let store = MockStore::new();
    let res = app(&store).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

// ============================================================
// case-insensitive paths, parameter names and booleans
// ============================================================

#[test]
fn normalize_uri_lowercases_path_and_keys_but_not_values() {
    let req = normalize_uri(get("/Api/Transactions?AccountId=3&Memo=Rent%20Due&flag"));
    assert_eq!(req.uri(), "/api/transactions?accountid=3&memo=Rent%20Due&flag");

    let req = normalize_uri(get("/API/Household"));
    assert_eq!(req.uri(), "/api/household");
}

#[tokio::test]
async fn lowercase_paths_and_parameter_names_are_accepted() {
    let store = MockStore::new();
    let app = app(&store);
    send(&app, post(&add_account_uri(1, "555"))).await;

    for uri in ["/api/accounts?bankid=1", "/API/ACCOUNTS?BANKID=1", "/Api/Accounts?bankId=1"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body.as_array().map(Vec::len), Some(1), "{uri}");
    }
}

#[tokio::test]
async fn capitalised_booleans_bind_on_inserts() {
    let store = MockStore::new();
    let app = app(&store);

    let (status, body) = send(
        &app,
        post("/api/addtransaction?accountid=9&amount=12.00&memo=refund&reconciled=True&type=credit&isdeleted=False"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, txs) = send(&app, get("/api/transactions?accountid=9")).await;
    assert_eq!(txs[0]["reconciled"], true);
    assert_eq!(txs[0]["isDeleted"], false);

    let (status, _) = send(
        &app,
        post("/api/addtransaction?accountid=9&amount=1&memo=x&reconciled=maybe&type=credit&isdeleted=false"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn json_body_binds_when_query_string_does_not() {
    let store = MockStore::new();
    let app = app(&store);

    let (status, body) = send(
        &app,
        post_json(
            "/Api/AddBank?x=1",
            json!({
                "householdId": 2,
                "name": "Credit Union",
                "address": "9 Elm St",
                "city": "Y",
                "state": "CA",
                "zip": "90001",
                "phone": "555-0199"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, banks) = send(&app, get("/Api/Banks?householdId=2")).await;
    assert_eq!(banks[0]["name"], "Credit Union");
}
