//! Account procedures.

use sqlx::PgConnection;
use tracing::debug;

use crate::{
    DbError,
    models::{AccountDetail, AccountSummary, NewAccount},
};

/// `GetAllAccountsData @bankId` — every account held at a bank.
pub async fn get_all_accounts(
    conn: &mut PgConnection,
    bank_id: i32,
) -> Result<Vec<AccountSummary>, DbError> {
    debug!(procedure = "GetAllAccountsData", bank_id, "calling procedure");

    let rows = sqlx::query_as::<_, AccountSummary>(
        r#"SELECT * FROM "GetAllAccountsData"("bankId" => $1)"#,
    )
    .bind(bank_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// `GetAccountDetails @accountId` — first matching row, if any.
pub async fn get_account_details(
    conn: &mut PgConnection,
    account_id: i32,
) -> Result<Option<AccountDetail>, DbError> {
    debug!(procedure = "GetAccountDetails", account_id, "calling procedure");

    let row = sqlx::query_as::<_, AccountDetail>(
        r#"SELECT * FROM "GetAccountDetails"("accountId" => $1) LIMIT 1"#,
    )
    .bind(account_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

/// `AddAccount` — returns the procedure's integer status, not the new id.
pub async fn add_account(conn: &mut PgConnection, account: &NewAccount) -> Result<i32, DbError> {
    debug!(procedure = "AddAccount", bank_id = account.bank_id, "calling procedure");

    let status = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT "AddAccount"(
            "bankId" => $1,
            "name" => $2,
            "description" => $3,
            "startingBalance" => $4,
            "currentBalance" => $5,
            "typeId" => $6,
            "accountNumber" => $7,
            "routingNumber" => $8,
            "isDeleted" => $9
        )
        "#,
    )
    .bind(account.bank_id)
    .bind(&account.name)
    .bind(&account.description)
    .bind(account.starting_balance)
    .bind(account.current_balance)
    .bind(account.type_id)
    .bind(&account.account_number)
    .bind(&account.routing_number)
    .bind(account.is_deleted)
    .fetch_one(&mut *conn)
    .await?;

    Ok(status)
}
