//! Bank procedures.

use sqlx::PgConnection;
use tracing::debug;

use crate::{
    DbError,
    models::{Bank, NewBank},
};

/// `GetBanks @householdId` — every bank owned by a household.
pub async fn get_banks(conn: &mut PgConnection, household_id: i32) -> Result<Vec<Bank>, DbError> {
    debug!(procedure = "GetBanks", household_id, "calling procedure");

    let rows = sqlx::query_as::<_, Bank>(r#"SELECT * FROM "GetBanks"("householdId" => $1)"#)
        .bind(household_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows)
}

/// `AddBank` — returns the procedure's integer status.
pub async fn add_bank(conn: &mut PgConnection, bank: &NewBank) -> Result<i32, DbError> {
    debug!(procedure = "AddBank", household_id = bank.household_id, "calling procedure");

    let status = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT "AddBank"(
            "householdId" => $1,
            "name" => $2,
            "address" => $3,
            "city" => $4,
            "state" => $5,
            "zip" => $6,
            "phone" => $7
        )
        "#,
    )
    .bind(bank.household_id)
    .bind(&bank.name)
    .bind(&bank.address)
    .bind(&bank.city)
    .bind(&bank.state)
    .bind(&bank.zip)
    .bind(&bank.phone)
    .fetch_one(&mut *conn)
    .await?;

    Ok(status)
}
