//! Repository functions — one function per stored procedure.
//!
//! Every function takes a `&mut PgConnection` and returns a
//! `Result<T, DbError>`. No business logic, no validation, one round-trip.
//!
//! Procedures are called with Postgres named-argument notation so the
//! binding names (`"bankId" => $1`) match the procedure signatures exactly.

pub mod accounts;
pub mod banks;
pub mod budgets;
pub mod households;
pub mod transactions;
