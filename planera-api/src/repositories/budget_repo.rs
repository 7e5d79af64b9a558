use async_trait::async_trait;
use reporting::{Budget, BudgetKind, ProjectId, SpendCategory};
use sqlx::PgPool;
use time::Date;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn get_budgets(&self) -> Result<Vec<Budget>, RepositoryError>;
    async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, RepositoryError>;
    async fn update_budget(&self, id: i32, update: &NewBudget) -> Result<Budget, RepositoryError>;
    async fn delete_budget(&self, id: i32) -> Result<(), RepositoryError>;
}

/// Full writable shape of a budget line; creates and updates carry the
/// same fields.
pub struct NewBudget {
    pub project_id: Option<ProjectId>,
    pub name: String,
    pub amount: i64,
    pub spent: i64,
    pub category: SpendCategory,
    pub kind: BudgetKind,
    pub date: Option<Date>,
    pub notes: Option<String>,
}

pub struct BudgetRepositoryImpl {
    pool: PgPool,
}

impl BudgetRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BudgetRow {
    id: i32,
    project_id: Option<i32>,
    name: String,
    amount: i64,
    spent: i64,
    category: String,
    #[sqlx(rename = "type")]
    kind: String,
    date: Option<Date>,
    notes: Option<String>,
}

impl From<BudgetRow> for Budget {
    fn from(row: BudgetRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id.map(ProjectId::new),
            name: row.name,
            amount: row.amount,
            spent: row.spent,
            category: row.category.parse().unwrap_or_default(),
            kind: row.kind.parse().unwrap_or_default(),
            date: row.date,
            notes: row.notes,
        }
    }
}

const BUDGET_COLUMNS: &str = r#"id, project_id, name, amount, spent, category, type, date, notes"#;

#[async_trait]
impl BudgetRepository for BudgetRepositoryImpl {
    async fn get_budgets(&self) -> Result<Vec<Budget>, RepositoryError> {
        let rows = sqlx::query_as::<_, BudgetRow>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Budget::from).collect())
    }

    async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, RepositoryError> {
        let row = sqlx::query_as::<_, BudgetRow>(&format!(
            r#"
            INSERT INTO budgets (project_id, name, amount, spent, category, type, date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BUDGET_COLUMNS}
            "#
        ))
        .bind(budget.project_id.map(i32::from))
        .bind(&budget.name)
        .bind(budget.amount)
        .bind(budget.spent)
        .bind(budget.category.to_string())
        .bind(budget.kind.to_string())
        .bind(budget.date)
        .bind(&budget.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_budget(&self, id: i32, update: &NewBudget) -> Result<Budget, RepositoryError> {
        let row = sqlx::query_as::<_, BudgetRow>(&format!(
            r#"
            UPDATE budgets
            SET project_id = $2, name = $3, amount = $4, spent = $5, category = $6,
                type = $7, date = $8, notes = $9
            WHERE id = $1
            RETURNING {BUDGET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.project_id.map(i32::from))
        .bind(&update.name)
        .bind(update.amount)
        .bind(update.spent)
        .bind(update.category.to_string())
        .bind(update.kind.to_string())
        .bind(update.date)
        .bind(&update.notes)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Budget::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("budget {id}")))
    }

    async fn delete_budget(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("budget {id}")));
        }

        Ok(())
    }
}
