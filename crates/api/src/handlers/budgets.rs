use axum::{extract::State, Json};
use serde::Deserialize;

use super::{banks::HouseholdIdQuery, AppState};
use crate::{ApiError, Params};
use db::models::{Budget, BudgetItem, NewBudgetItem};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetIdQuery {
    #[serde(alias = "budgetid")]
    pub budget_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemIdQuery {
    #[serde(alias = "budgetitemid")]
    pub budget_item_id: i32,
}

/// `GET /Api/Budget?householdId=`
pub async fn get(
    State(state): State<AppState>,
    Params(query): Params<HouseholdIdQuery>,
) -> Result<Json<Option<Budget>>, ApiError> {
    let budget = state.store.get_budget(query.household_id).await?;
    Ok(Json(budget))
}

/// `GET /Api/BudgetItems?budgetId=`
pub async fn list_items(
    State(state): State<AppState>,
    Params(query): Params<BudgetIdQuery>,
) -> Result<Json<Vec<BudgetItem>>, ApiError> {
    let items = state.store.get_all_budget_items(query.budget_id).await?;
    Ok(Json(items))
}

/// `GET /Api/BudgetItem?budgetItemId=`
pub async fn get_item(
    State(state): State<AppState>,
    Params(query): Params<BudgetItemIdQuery>,
) -> Result<Json<Option<BudgetItem>>, ApiError> {
    let item = state.store.get_budget_item_details(query.budget_item_id).await?;
    Ok(Json(item))
}

/// `POST /Api/AddBudgetItem`
pub async fn add_item(
    State(state): State<AppState>,
    Params(item): Params<NewBudgetItem>,
) -> Result<Json<i32>, ApiError> {
    let status = state.store.add_budget_item(&item).await?;
    Ok(Json(status))
}
