//! Household procedures.

use sqlx::PgConnection;
use tracing::debug;

use crate::{DbError, models::Household};

/// `GetHouseholdData @householdId`
pub async fn get_household(
    conn: &mut PgConnection,
    household_id: i32,
) -> Result<Option<Household>, DbError> {
    debug!(procedure = "GetHouseholdData", household_id, "calling procedure");

    let row = sqlx::query_as::<_, Household>(
        r#"SELECT * FROM "GetHouseholdData"("householdId" => $1) LIMIT 1"#,
    )
    .bind(household_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}
