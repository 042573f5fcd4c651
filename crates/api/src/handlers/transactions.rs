use axum::{extract::State, Json};
use serde::Deserialize;

use super::{accounts::AccountIdQuery, AppState};
use crate::{ApiError, Params};
use db::models::{NewTransaction, Transaction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIdQuery {
    #[serde(alias = "transactionid")]
    pub transaction_id: i32,
}

/// `GET /Api/Transactions?accountId=`
pub async fn list(
    State(state): State<AppState>,
    Params(query): Params<AccountIdQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state.store.get_all_transactions(query.account_id).await?;
    Ok(Json(transactions))
}

/// `GET /Api/Transaction?transactionId=`
pub async fn get(
    State(state): State<AppState>,
    Params(query): Params<TransactionIdQuery>,
) -> Result<Json<Option<Transaction>>, ApiError> {
    let transaction = state.store.get_transaction_details(query.transaction_id).await?;
    Ok(Json(transaction))
}

/// `POST /Api/AddTransaction`
///
/// Not idempotent: resubmitting after a timeout records the transaction
/// twice.
pub async fn add(
    State(state): State<AppState>,
    Params(tx): Params<NewTransaction>,
) -> Result<Json<i32>, ApiError> {
    let status = state.store.add_transaction(&tx).await?;
    Ok(Json(status))
}
