use axum::{extract::State, Json};

use super::{banks::HouseholdIdQuery, AppState};
use crate::{ApiError, Params};
use db::models::Household;

/// `GET /Api/Household?householdId=`
pub async fn get(
    State(state): State<AppState>,
    Params(query): Params<HouseholdIdQuery>,
) -> Result<Json<Option<Household>>, ApiError> {
    let household = state.store.get_household(query.household_id).await?;
    Ok(Json(household))
}
