//! Transaction procedures.

use sqlx::PgConnection;
use tracing::debug;

use crate::{
    DbError,
    models::{NewTransaction, Transaction},
};

/// `GetAllTransactionData @accountId` — every transaction on an account.
pub async fn get_all_transactions(
    conn: &mut PgConnection,
    account_id: i32,
) -> Result<Vec<Transaction>, DbError> {
    debug!(procedure = "GetAllTransactionData", account_id, "calling procedure");

    let rows = sqlx::query_as::<_, Transaction>(
        r#"SELECT * FROM "GetAllTransactionData"("accountId" => $1)"#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// `GetTransactionDetails @transactionId`
pub async fn get_transaction_details(
    conn: &mut PgConnection,
    transaction_id: i32,
) -> Result<Option<Transaction>, DbError> {
    debug!(procedure = "GetTransactionDetails", transaction_id, "calling procedure");

    let row = sqlx::query_as::<_, Transaction>(
        r#"SELECT * FROM "GetTransactionDetails"("transactionId" => $1) LIMIT 1"#,
    )
    .bind(transaction_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

/// `AddTransaction` — returns the procedure's integer status.
///
/// Not idempotent: a retried call inserts a second row.
pub async fn add_transaction(
    conn: &mut PgConnection,
    tx: &NewTransaction,
) -> Result<i32, DbError> {
    debug!(procedure = "AddTransaction", account_id = tx.account_id, "calling procedure");

    let status = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT "AddTransaction"(
            "accountId" => $1,
            "amount" => $2,
            "memo" => $3,
            "reconciled" => $4,
            "type" => $5,
            "isDeleted" => $6
        )
        "#,
    )
    .bind(tx.account_id)
    .bind(tx.amount)
    .bind(&tx.memo)
    .bind(tx.reconciled)
    .bind(&tx.kind)
    .bind(tx.is_deleted)
    .fetch_one(&mut *conn)
    .await?;

    Ok(status)
}
