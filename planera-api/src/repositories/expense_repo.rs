use async_trait::async_trait;
use reporting::{Expense, ProjectId, SpendCategory};
use sqlx::PgPool;
use time::Date;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn get_expenses(&self) -> Result<Vec<Expense>, RepositoryError>;
    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, RepositoryError>;
    async fn update_expense(
        &self,
        id: i32,
        update: &NewExpense,
    ) -> Result<Expense, RepositoryError>;
    async fn delete_expense(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct NewExpense {
    pub project_id: Option<ProjectId>,
    pub category: SpendCategory,
    pub amount: i64,
    pub date: Option<Date>,
}

pub struct ExpenseRepositoryImpl {
    pool: PgPool,
}

impl ExpenseRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExpenseRow {
    id: i32,
    project_id: Option<i32>,
    category: String,
    amount: i64,
    date: Option<Date>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id.map(ProjectId::new),
            category: row.category.parse().unwrap_or_default(),
            amount: row.amount,
            date: row.date,
        }
    }
}

#[async_trait]
impl ExpenseRepository for ExpenseRepositoryImpl {
    async fn get_expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            "SELECT id, project_id, category, amount, date FROM expenses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, RepositoryError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (project_id, category, amount, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, category, amount, date
            "#,
        )
        .bind(expense.project_id.map(i32::from))
        .bind(expense.category.to_string())
        .bind(expense.amount)
        .bind(expense.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_expense(
        &self,
        id: i32,
        update: &NewExpense,
    ) -> Result<Expense, RepositoryError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET project_id = $2, category = $3, amount = $4, date = $5
            WHERE id = $1
            RETURNING id, project_id, category, amount, date
            "#,
        )
        .bind(id)
        .bind(update.project_id.map(i32::from))
        .bind(update.category.to_string())
        .bind(update.amount)
        .bind(update.date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Expense::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("expense {id}")))
    }

    async fn delete_expense(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("expense {id}")));
        }

        Ok(())
    }
}
