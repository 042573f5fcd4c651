//! Route handlers — one per stored procedure.
//!
//! Each handler binds its parameters, makes exactly one store call and
//! serialises whatever comes back. List routes return `[]` when nothing
//! matches, single-record routes return `null`, insert routes return the
//! procedure's integer status.

pub mod accounts;
pub mod banks;
pub mod budgets;
pub mod households;
pub mod transactions;

use std::sync::Arc;

use db::FinanceStore;

/// Shared application state handed to every handler.
///
/// Holds no per-request data; each store call checks out its own
/// connection.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FinanceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }
}
