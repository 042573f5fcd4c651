//! Record shapes returned by the stored procedures, and the input objects
//! bound to the insert procedures.
//!
//! Row structs decode from PascalCase result-set columns and serialise to
//! camelCase JSON. Money is always [`Decimal`], never a float.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Accepts `true`/`false` in any letter case, as JSON booleans or strings.
///
/// Insert parameters arrive on the query string from clients that send
/// `True` and `False`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientBool;

    impl<'de> Visitor<'de> for LenientBool {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("`true` or `false` in any case")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            if v.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if v.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }
    }

    deserializer.deserialize_any(LenientBool)
}

// ---------------------------------------------------------------------------
// households
// ---------------------------------------------------------------------------

/// Top-level owner of banks and budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct Household {
    pub id: i32,
    pub name: String,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// banks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct Bank {
    pub id: i32,
    pub household_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// Parameters of the `AddBank` procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBank {
    #[serde(alias = "householdid")]
    pub household_id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
}

// ---------------------------------------------------------------------------
// accounts
// ---------------------------------------------------------------------------

/// One row of `GetAllAccountsData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct AccountSummary {
    pub id: i32,
    pub bank_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub current_balance: Decimal,
    pub account_type_id: i32,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
}

/// The row of `GetAccountDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct AccountDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub current_balance: Decimal,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
    pub account_type_id: i32,
}

/// Parameters of the `AddAccount` procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(alias = "bankid")]
    pub bank_id: i32,
    pub name: String,
    pub description: String,
    #[serde(alias = "startingbalance")]
    pub starting_balance: Decimal,
    #[serde(alias = "currentbalance")]
    pub current_balance: Decimal,
    #[serde(alias = "typeid")]
    pub type_id: i32,
    #[serde(alias = "accountnumber")]
    pub account_number: String,
    #[serde(alias = "routingnumber")]
    pub routing_number: String,
    #[serde(alias = "isdeleted", deserialize_with = "lenient_bool")]
    pub is_deleted: bool,
}

// ---------------------------------------------------------------------------
// budgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct Budget {
    pub id: i32,
    pub household_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub spending_target: Decimal,
}

/// Parameters of the `AddBudget` procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(alias = "householdid")]
    pub household_id: i32,
    pub name: String,
    pub description: String,
    #[serde(alias = "spendingtarget")]
    pub spending_target: Decimal,
}

// ---------------------------------------------------------------------------
// budget items
// ---------------------------------------------------------------------------

/// A spending category. Both the list and the detail procedure return this
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct BudgetItem {
    pub id: i32,
    /// Holds the owning *budget* id; the column has always been called
    /// `BankId` and clients read it under that name.
    pub bank_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub spending_target: Decimal,
    pub current_spending: Decimal,
}

/// Parameters of the `AddBudgetItem` procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetItem {
    #[serde(alias = "budgetid")]
    pub budget_id: i32,
    pub name: String,
    pub description: String,
    #[serde(alias = "spendingtarget")]
    pub spending_target: Decimal,
    #[serde(alias = "currentspending")]
    pub current_spending: Decimal,
}

// ---------------------------------------------------------------------------
// transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "PascalCase")]
pub struct Transaction {
    pub id: i32,
    pub account_id: i32,
    pub amount: Decimal,
    pub memo: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(rename = "type")]
    #[sqlx(rename = "Type")]
    pub kind: String,
    pub reconciled: bool,
    pub is_deleted: bool,
}

/// Parameters of the `AddTransaction` procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(alias = "accountid")]
    pub account_id: i32,
    pub amount: Decimal,
    pub memo: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub reconciled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(alias = "isdeleted", deserialize_with = "lenient_bool")]
    pub is_deleted: bool,
}
