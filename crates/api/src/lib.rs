//! `api` crate — HTTP layer over the finance stored procedures.
//!
//! Paths and query-parameter names are case-insensitive: the request URI is
//! lower-cased before routing, so `/api/accounts?bankid=1` reaches the same
//! handler as `/Api/Accounts?bankId=1`.
//!
//! Exposes, under the `/Api` prefix:
//!   GET  /Accounts?bankId=            GET  /Account?accountId=
//!   GET  /Banks?householdId=          GET  /BudgetItem?budgetItemId=
//!   GET  /BudgetItems?budgetId=       GET  /Budget?householdId=
//!   GET  /Transactions?accountId=     GET  /Household?householdId=
//!                                     GET  /Transaction?transactionId=
//!   POST /AddAccount  POST /AddBank  POST /AddBudgetItem  POST /AddTransaction

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::Uri,
    routing::{get, post},
    Router, ServiceExt,
};
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use db::FinanceStore;
use handlers::{accounts, banks, budgets, households, transactions};

pub use error::ApiError;
pub use extract::Params;
pub use handlers::AppState;

/// Fixed prefix shared by every procedure route, in its matched (lower-case)
/// form.
pub const ROUTE_PREFIX: &str = "/api";

/// The router behind URI normalisation. Rewriting has to wrap the whole
/// router because layers added with `Router::layer` run after routing.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Build the full application: [`routes`] behind [`normalize_uri`].
pub fn app(state: AppState) -> App {
    MapRequestLayer::new(normalize_uri as fn(Request) -> Request).layer(routes(state))
}

/// Build the router. Route paths are lower-case; use [`app`] to serve.
pub fn routes(state: AppState) -> Router {
    let procedures = Router::new()
        // lists
        .route("/accounts", get(accounts::list))
        .route("/banks", get(banks::list))
        .route("/budgetitems", get(budgets::list_items))
        .route("/transactions", get(transactions::list))
        // single records
        .route("/account", get(accounts::get))
        .route("/budgetitem", get(budgets::get_item))
        .route("/budget", get(budgets::get))
        .route("/household", get(households::get))
        .route("/transaction", get(transactions::get))
        // inserts
        .route("/addaccount", post(accounts::add))
        .route("/addbank", post(banks::add))
        .route("/addbudgetitem", post(budgets::add_item))
        .route("/addtransaction", post(transactions::add));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(ROUTE_PREFIX, procedures)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(bind: &str, store: Arc<dyn FinanceStore>) -> std::io::Result<()> {
    let app = app(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Lower-case the path and every query-parameter name. Values keep their
/// case.
pub fn normalize_uri(mut req: Request) -> Request {
    let uri = req.uri();
    let path = uri.path().to_ascii_lowercase();
    let path_and_query = match uri.query() {
        Some(query) if !query.is_empty() => format!("{path}?{}", lowercase_keys(query)),
        _ => path,
    };

    let mut parts = uri.clone().into_parts();
    match path_and_query.parse() {
        Ok(pq) => parts.path_and_query = Some(pq),
        Err(e) => {
            tracing::debug!("leaving unparsable uri as is: {e}");
            return req;
        }
    }
    if let Ok(normalized) = Uri::from_parts(parts) {
        *req.uri_mut() = normalized;
    }
    req
}

fn lowercase_keys(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!("{}={value}", key.to_ascii_lowercase()),
            None => pair.to_ascii_lowercase(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod router_tests;
