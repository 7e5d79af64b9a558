use async_trait::async_trait;
use reporting::{ProjectId, Task};
use sqlx::PgPool;
use time::Date;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError>;
    async fn create_task(&self, task: &NewTask) -> Result<Task, RepositoryError>;
    async fn update_task(&self, id: i32, update: &NewTask) -> Result<Task, RepositoryError>;
    async fn delete_task(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct NewTask {
    pub project_id: Option<ProjectId>,
    pub completed: bool,
    pub date: Option<Date>,
}

pub struct TaskRepositoryImpl {
    pool: PgPool,
}

impl TaskRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i32,
    project_id: Option<i32>,
    completed: bool,
    date: Option<Date>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id.map(ProjectId::new),
            completed: row.completed,
            date: row.date,
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, project_id, completed, date FROM tasks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (project_id, completed, date)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, completed, date
            "#,
        )
        .bind(task.project_id.map(i32::from))
        .bind(task.completed)
        .bind(task.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_task(&self, id: i32, update: &NewTask) -> Result<Task, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET project_id = $2, completed = $3, date = $4
            WHERE id = $1
            RETURNING id, project_id, completed, date
            "#,
        )
        .bind(id)
        .bind(update.project_id.map(i32::from))
        .bind(update.completed)
        .bind(update.date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("task {id}")))
    }

    async fn delete_task(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("task {id}")));
        }

        Ok(())
    }
}
