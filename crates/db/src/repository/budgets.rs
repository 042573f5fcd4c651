//! Budget and budget-item procedures.

use sqlx::PgConnection;
use tracing::debug;

use crate::{
    DbError,
    models::{Budget, BudgetItem, NewBudget, NewBudgetItem},
};

// ---------------------------------------------------------------------------
// budgets
// ---------------------------------------------------------------------------

/// `GetBudgetsData @householdId` — the household's budget, if it has one.
pub async fn get_budget(
    conn: &mut PgConnection,
    household_id: i32,
) -> Result<Option<Budget>, DbError> {
    debug!(procedure = "GetBudgetsData", household_id, "calling procedure");

    let row = sqlx::query_as::<_, Budget>(
        r#"SELECT * FROM "GetBudgetsData"("householdId" => $1) LIMIT 1"#,
    )
    .bind(household_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

/// `AddBudget` — returns the procedure's integer status.
pub async fn add_budget(conn: &mut PgConnection, budget: &NewBudget) -> Result<i32, DbError> {
    debug!(procedure = "AddBudget", household_id = budget.household_id, "calling procedure");

    let status = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT "AddBudget"(
            "householdId" => $1,
            "name" => $2,
            "description" => $3,
            "spendingTarget" => $4
        )
        "#,
    )
    .bind(budget.household_id)
    .bind(&budget.name)
    .bind(&budget.description)
    .bind(budget.spending_target)
    .fetch_one(&mut *conn)
    .await?;

    Ok(status)
}

// ---------------------------------------------------------------------------
// budget items
// ---------------------------------------------------------------------------

/// `GetAllBudgetItemsDetail @budgetId`
pub async fn get_all_budget_items(
    conn: &mut PgConnection,
    budget_id: i32,
) -> Result<Vec<BudgetItem>, DbError> {
    debug!(procedure = "GetAllBudgetItemsDetail", budget_id, "calling procedure");

    let rows = sqlx::query_as::<_, BudgetItem>(
        r#"SELECT * FROM "GetAllBudgetItemsDetail"("budgetId" => $1)"#,
    )
    .bind(budget_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// `GetBudgetItemsDetails @budgetItemId`
pub async fn get_budget_item_details(
    conn: &mut PgConnection,
    budget_item_id: i32,
) -> Result<Option<BudgetItem>, DbError> {
    debug!(procedure = "GetBudgetItemsDetails", budget_item_id, "calling procedure");

    let row = sqlx::query_as::<_, BudgetItem>(
        r#"SELECT * FROM "GetBudgetItemsDetails"("budgetItemId" => $1) LIMIT 1"#,
    )
    .bind(budget_item_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

/// `AddBudgetItem` — returns the procedure's integer status.
pub async fn add_budget_item(
    conn: &mut PgConnection,
    item: &NewBudgetItem,
) -> Result<i32, DbError> {
    debug!(procedure = "AddBudgetItem", budget_id = item.budget_id, "calling procedure");

    let status = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT "AddBudgetItem"(
            "budgetId" => $1,
            "name" => $2,
            "description" => $3,
            "spendingTarget" => $4,
            "currentSpending" => $5
        )
        "#,
    )
    .bind(item.budget_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.spending_target)
    .bind(item.current_spending)
    .fetch_one(&mut *conn)
    .await?;

    Ok(status)
}
