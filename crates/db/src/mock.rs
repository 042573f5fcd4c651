//! `MockStore` — an in-memory test double for [`FinanceStore`].
//!
//! Mimics the observable behaviour of the stored procedures: lists filter
//! by their foreign key, single fetches return the first match, inserts
//! assign sequential ids and report one affected row. Foreign keys are not
//! checked; that is the database's job.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    DbError, FinanceStore,
    models::{
        AccountDetail, AccountSummary, Bank, Budget, BudgetItem, Household, NewAccount, NewBank,
        NewBudget, NewBudgetItem, NewTransaction, Transaction,
    },
};

/// Behaviour injected into `MockStore` at construction time.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Serve reads and writes from memory.
    InMemory,
    /// Fail every call with [`DbError::Pool`], as if no connection could be had.
    Unavailable(String),
}

#[derive(Debug, Clone)]
struct AccountRecord {
    detail: AccountDetail,
    bank_id: i32,
}

#[derive(Debug, Default)]
struct Tables {
    last_id: i32,
    households: Vec<Household>,
    banks: Vec<Bank>,
    accounts: Vec<AccountRecord>,
    budgets: Vec<Budget>,
    budget_items: Vec<BudgetItem>,
    transactions: Vec<Transaction>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// An in-memory store that records every procedure it is asked to run.
#[derive(Debug, Clone)]
pub struct MockStore {
    behaviour: MockBehaviour,
    tables: Arc<Mutex<Tables>>,
    /// Procedure names seen by this store (in call order).
    pub calls: Arc<Mutex<Vec<&'static str>>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Create an empty, healthy store.
    pub fn new() -> Self {
        Self {
            behaviour: MockBehaviour::InMemory,
            tables: Arc::new(Mutex::new(Tables::default())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a store whose every call fails as if the database were down.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            behaviour: MockBehaviour::Unavailable(msg.into()),
            ..Self::new()
        }
    }

    /// Insert a household directly. There is no procedure for this.
    pub fn seed_household(&self, name: impl Into<String>) -> Household {
        let mut tables = self.tables();
        let household = Household {
            id: tables.next_id(),
            name: name.into(),
            created: Utc::now(),
        };
        tables.households.push(household.clone());
        household
    }

    /// Number of procedure calls this store has served or refused.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    fn enter(&self, procedure: &'static str) -> Result<MutexGuard<'_, Tables>, DbError> {
        self.calls.lock().unwrap().push(procedure);
        match &self.behaviour {
            MockBehaviour::InMemory => Ok(self.tables()),
            MockBehaviour::Unavailable(msg) => Err(DbError::Pool(msg.clone())),
        }
    }
}

#[async_trait]
impl FinanceStore for MockStore {
    async fn get_all_accounts(&self, bank_id: i32) -> Result<Vec<AccountSummary>, DbError> {
        let tables = self.enter("GetAllAccountsData")?;
        Ok(tables
            .accounts
            .iter()
            .filter(|a| a.bank_id == bank_id)
            .map(|a| AccountSummary {
                id: a.detail.id,
                bank_id: a.bank_id,
                name: a.detail.name.clone(),
                description: a.detail.description.clone(),
                current_balance: a.detail.current_balance,
                account_type_id: a.detail.account_type_id,
                account_number: a.detail.account_number.clone(),
                routing_number: a.detail.routing_number.clone(),
            })
            .collect())
    }

    async fn get_banks(&self, household_id: i32) -> Result<Vec<Bank>, DbError> {
        let tables = self.enter("GetBanks")?;
        Ok(tables
            .banks
            .iter()
            .filter(|b| b.household_id == household_id)
            .cloned()
            .collect())
    }

    async fn get_all_budget_items(&self, budget_id: i32) -> Result<Vec<BudgetItem>, DbError> {
        let tables = self.enter("GetAllBudgetItemsDetail")?;
        Ok(tables
            .budget_items
            .iter()
            .filter(|i| i.bank_id == budget_id)
            .cloned()
            .collect())
    }

    async fn get_all_transactions(&self, account_id: i32) -> Result<Vec<Transaction>, DbError> {
        let tables = self.enter("GetAllTransactionData")?;
        Ok(tables
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn get_account_details(&self, account_id: i32) -> Result<Option<AccountDetail>, DbError> {
        let tables = self.enter("GetAccountDetails")?;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.detail.id == account_id)
            .map(|a| a.detail.clone()))
    }

    async fn get_budget_item_details(
        &self,
        budget_item_id: i32,
    ) -> Result<Option<BudgetItem>, DbError> {
        let tables = self.enter("GetBudgetItemsDetails")?;
        Ok(tables.budget_items.iter().find(|i| i.id == budget_item_id).cloned())
    }

    async fn get_budget(&self, household_id: i32) -> Result<Option<Budget>, DbError> {
        let tables = self.enter("GetBudgetsData")?;
        Ok(tables
            .budgets
            .iter()
            .find(|b| b.household_id == household_id)
            .cloned())
    }

    async fn get_household(&self, household_id: i32) -> Result<Option<Household>, DbError> {
        let tables = self.enter("GetHouseholdData")?;
        Ok(tables.households.iter().find(|h| h.id == household_id).cloned())
    }

    async fn get_transaction_details(
        &self,
        transaction_id: i32,
    ) -> Result<Option<Transaction>, DbError> {
        let tables = self.enter("GetTransactionDetails")?;
        Ok(tables.transactions.iter().find(|t| t.id == transaction_id).cloned())
    }

    async fn add_account(&self, account: &NewAccount) -> Result<i32, DbError> {
        let mut tables = self.enter("AddAccount")?;
        let id = tables.next_id();
        tables.accounts.push(AccountRecord {
            detail: AccountDetail {
                id,
                name: account.name.clone(),
                description: Some(account.description.clone()),
                created: Utc::now(),
                current_balance: account.current_balance,
                account_number: Some(account.account_number.clone()),
                routing_number: Some(account.routing_number.clone()),
                account_type_id: account.type_id,
            },
            bank_id: account.bank_id,
        });
        Ok(1)
    }

    async fn add_bank(&self, bank: &NewBank) -> Result<i32, DbError> {
        let mut tables = self.enter("AddBank")?;
        let id = tables.next_id();
        tables.banks.push(Bank {
            id,
            household_id: bank.household_id,
            name: bank.name.clone(),
            address: Some(bank.address.clone()),
            city: Some(bank.city.clone()),
            state: Some(bank.state.clone()),
            zip: Some(bank.zip.clone()),
            phone: Some(bank.phone.clone()),
        });
        Ok(1)
    }

    async fn add_budget(&self, budget: &NewBudget) -> Result<i32, DbError> {
        let mut tables = self.enter("AddBudget")?;
        let id = tables.next_id();
        tables.budgets.push(Budget {
            id,
            household_id: budget.household_id,
            name: budget.name.clone(),
            description: Some(budget.description.clone()),
            spending_target: budget.spending_target,
        });
        Ok(1)
    }

    async fn add_budget_item(&self, item: &NewBudgetItem) -> Result<i32, DbError> {
        let mut tables = self.enter("AddBudgetItem")?;
        let id = tables.next_id();
        tables.budget_items.push(BudgetItem {
            id,
            bank_id: item.budget_id,
            name: item.name.clone(),
            description: Some(item.description.clone()),
            spending_target: item.spending_target,
            current_spending: item.current_spending,
        });
        Ok(1)
    }

    async fn add_transaction(&self, tx: &NewTransaction) -> Result<i32, DbError> {
        let mut tables = self.enter("AddTransaction")?;
        let id = tables.next_id();
        tables.transactions.push(Transaction {
            id,
            account_id: tx.account_id,
            amount: tx.amount,
            memo: Some(tx.memo.clone()),
            created: Utc::now(),
            kind: tx.kind.clone(),
            reconciled: tx.reconciled,
            is_deleted: tx.is_deleted,
        });
        Ok(1)
    }
}
