use axum::{extract::State, Json};
use serde::Deserialize;

use super::AppState;
use crate::{ApiError, Params};
use db::models::{AccountDetail, AccountSummary, NewAccount};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankIdQuery {
    #[serde(alias = "bankid")]
    pub bank_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdQuery {
    #[serde(alias = "accountid")]
    pub account_id: i32,
}

/// `GET /Api/Accounts?bankId=`
pub async fn list(
    State(state): State<AppState>,
    Params(query): Params<BankIdQuery>,
) -> Result<Json<Vec<AccountSummary>>, ApiError> {
    let accounts = state.store.get_all_accounts(query.bank_id).await?;
    Ok(Json(accounts))
}

/// `GET /Api/Account?accountId=`
pub async fn get(
    State(state): State<AppState>,
    Params(query): Params<AccountIdQuery>,
) -> Result<Json<Option<AccountDetail>>, ApiError> {
    let account = state.store.get_account_details(query.account_id).await?;
    Ok(Json(account))
}

/// `POST /Api/AddAccount`
pub async fn add(
    State(state): State<AppState>,
    Params(account): Params<NewAccount>,
) -> Result<Json<i32>, ApiError> {
    let status = state.store.add_account(&account).await?;
    Ok(Json(status))
}
