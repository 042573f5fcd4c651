//! The `FinanceStore` trait — the contract between the HTTP layer and the
//! database.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::Postgres;

use crate::{
    DbError, DbPool,
    models::{
        AccountDetail, AccountSummary, Bank, Budget, BudgetItem, Household, NewAccount, NewBank,
        NewBudget, NewBudgetItem, NewTransaction, Transaction,
    },
    repository::{accounts, banks, budgets, households, transactions},
};

/// One method per stored procedure.
///
/// List methods return an empty `Vec` when nothing matches; single-record
/// methods return `None`. Insert methods return the procedure's integer
/// status.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    async fn get_all_accounts(&self, bank_id: i32) -> Result<Vec<AccountSummary>, DbError>;
    async fn get_banks(&self, household_id: i32) -> Result<Vec<Bank>, DbError>;
    async fn get_all_budget_items(&self, budget_id: i32) -> Result<Vec<BudgetItem>, DbError>;
    async fn get_all_transactions(&self, account_id: i32) -> Result<Vec<Transaction>, DbError>;

    async fn get_account_details(&self, account_id: i32) -> Result<Option<AccountDetail>, DbError>;
    async fn get_budget_item_details(&self, budget_item_id: i32)
        -> Result<Option<BudgetItem>, DbError>;
    async fn get_budget(&self, household_id: i32) -> Result<Option<Budget>, DbError>;
    async fn get_household(&self, household_id: i32) -> Result<Option<Household>, DbError>;
    async fn get_transaction_details(&self, transaction_id: i32)
        -> Result<Option<Transaction>, DbError>;

    async fn add_account(&self, account: &NewAccount) -> Result<i32, DbError>;
    async fn add_bank(&self, bank: &NewBank) -> Result<i32, DbError>;
    async fn add_budget(&self, budget: &NewBudget) -> Result<i32, DbError>;
    async fn add_budget_item(&self, item: &NewBudgetItem) -> Result<i32, DbError>;
    async fn add_transaction(&self, tx: &NewTransaction) -> Result<i32, DbError>;
}

/// Postgres-backed store. Every call checks a connection out of the pool
/// and returns it when the call completes.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn conn(&self) -> Result<PoolConnection<Postgres>, DbError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| DbError::Pool(e.to_string()))
    }
}

#[async_trait]
impl FinanceStore for PgStore {
    async fn get_all_accounts(&self, bank_id: i32) -> Result<Vec<AccountSummary>, DbError> {
        let mut conn = self.conn().await?;
        accounts::get_all_accounts(&mut conn, bank_id).await
    }

    async fn get_banks(&self, household_id: i32) -> Result<Vec<Bank>, DbError> {
        let mut conn = self.conn().await?;
        banks::get_banks(&mut conn, household_id).await
    }

    async fn get_all_budget_items(&self, budget_id: i32) -> Result<Vec<BudgetItem>, DbError> {
        let mut conn = self.conn().await?;
        budgets::get_all_budget_items(&mut conn, budget_id).await
    }

    async fn get_all_transactions(&self, account_id: i32) -> Result<Vec<Transaction>, DbError> {
        let mut conn = self.conn().await?;
        transactions::get_all_transactions(&mut conn, account_id).await
    }

    async fn get_account_details(&self, account_id: i32) -> Result<Option<AccountDetail>, DbError> {
        let mut conn = self.conn().await?;
        accounts::get_account_details(&mut conn, account_id).await
    }

    async fn get_budget_item_details(
        &self,
        budget_item_id: i32,
    ) -> Result<Option<BudgetItem>, DbError> {
        let mut conn = self.conn().await?;
        budgets::get_budget_item_details(&mut conn, budget_item_id).await
    }

    async fn get_budget(&self, household_id: i32) -> Result<Option<Budget>, DbError> {
        let mut conn = self.conn().await?;
        budgets::get_budget(&mut conn, household_id).await
    }

    async fn get_household(&self, household_id: i32) -> Result<Option<Household>, DbError> {
        let mut conn = self.conn().await?;
        households::get_household(&mut conn, household_id).await
    }

    async fn get_transaction_details(
        &self,
        transaction_id: i32,
    ) -> Result<Option<Transaction>, DbError> {
        let mut conn = self.conn().await?;
        transactions::get_transaction_details(&mut conn, transaction_id).await
    }

    async fn add_account(&self, account: &NewAccount) -> Result<i32, DbError> {
        let mut conn = self.conn().await?;
        accounts::add_account(&mut conn, account).await
    }

    async fn add_bank(&self, bank: &NewBank) -> Result<i32, DbError> {
        let mut conn = self.conn().await?;
        banks::add_bank(&mut conn, bank).await
    }

    async fn add_budget(&self, budget: &NewBudget) -> Result<i32, DbError> {
        let mut conn = self.conn().await?;
        budgets::add_budget(&mut conn, budget).await
    }

    async fn add_budget_item(&self, item: &NewBudgetItem) -> Result<i32, DbError> {
        let mut conn = self.conn().await?;
        budgets::add_budget_item(&mut conn, item).await
    }

    async fn add_transaction(&self, tx: &NewTransaction) -> Result<i32, DbError> {
        let mut conn = self.conn().await?;
        transactions::add_transaction(&mut conn, tx).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[tokio::test]
    async fn unreachable_database_is_a_pool_error() {
        // nothing listens on port 1
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy("postgres://finance@127.0.0.1:1/finance")
            .unwrap();
        let store = PgStore::new(pool);

        let err = store.get_banks(1).await.unwrap_err();
        assert!(matches!(err, DbError::Pool(_)), "got {err:?}");

        let budget = NewBudget {
            household_id: 1,
            name: "Monthly".into(),
            description: "".into(),
            spending_target: rust_decimal::Decimal::ONE,
        };
        let err = store.add_budget(&budget).await.unwrap_err();
        assert!(matches!(err, DbError::Pool(_)), "got {err:?}");
    }
}
