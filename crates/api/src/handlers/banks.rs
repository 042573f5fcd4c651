use axum::{extract::State, Json};
use serde::Deserialize;

use super::AppState;
use crate::{ApiError, Params};
use db::models::{Bank, NewBank};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdIdQuery {
    #[serde(alias = "householdid")]
    pub household_id: i32,
}

/// `GET /Api/Banks?householdId=`
pub async fn list(
    State(state): State<AppState>,
    Params(query): Params<HouseholdIdQuery>,
) -> Result<Json<Vec<Bank>>, ApiError> {
    let banks = state.store.get_banks(query.household_id).await?;
    Ok(Json(banks))
}

/// `POST /Api/AddBank`
pub async fn add(
    State(state): State<AppState>,
    Params(bank): Params<NewBank>,
) -> Result<Json<i32>, ApiError> {
    let status = state.store.add_bank(&bank).await?;
    Ok(Json(status))
}
