//! `db` crate — data access layer.
//!
//! Provides a connection pool, typed row structs, one repository function
//! per stored procedure, and the [`FinanceStore`] trait the HTTP layer talks
//! to. No business logic lives here; the procedures own it.

pub mod error;
pub mod mock;
pub mod models;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::DbError;
pub use pool::DbPool;
pub use store::{FinanceStore, PgStore};
