use async_trait::async_trait;
use reporting::{Project, ProjectId, ProjectLink, ProjectStatus};
use sqlx::types::Json;
use sqlx::PgPool;
use time::Date;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn get_projects(&self) -> Result<Vec<Project>, RepositoryError>;
    async fn get_project(&self, id: ProjectId) -> Result<Project, RepositoryError>;
    async fn create_project(&self, project: &NewProject) -> Result<Project, RepositoryError>;
    async fn update_project(
        &self,
        id: ProjectId,
        update: &UpdateProject,
    ) -> Result<Project, RepositoryError>;
    async fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError>;
    /// Writes only the progress column. Concurrent writers race and the
    /// last one wins; there is no version check.
    async fn update_progress(&self, id: ProjectId, progress: i32) -> Result<(), RepositoryError>;
}

pub struct NewProject {
    pub name: String,
    pub client: Option<String>,
    pub color: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tags: Vec<String>,
    pub links: Vec<ProjectLink>,
}

pub struct UpdateProject {
    pub name: String,
    pub client: Option<String>,
    pub status: ProjectStatus,
    pub color: Option<String>,
    pub progress: i32,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tags: Vec<String>,
    pub links: Vec<ProjectLink>,
}

pub struct ProjectRepositoryImpl {
    pool: PgPool,
}

impl ProjectRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    name: String,
    client: Option<String>,
    status: String,
    color: Option<String>,
    progress: i32,
    start_date: Option<Date>,
    end_date: Option<Date>,
    tags: Json<Vec<String>>,
    links: Json<Vec<ProjectLink>>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.id),
            name: row.name,
            client: row.client,
            // Unrecognized status text falls back to the creation default.
            status: row.status.parse().unwrap_or_default(),
            color: row.color,
            progress: row.progress,
            start_date: row.start_date,
            end_date: row.end_date,
            tags: row.tags.0,
            links: row.links.0,
        }
    }
}

const PROJECT_COLUMNS: &str =
    "id, name, client, status, color, progress, start_date, end_date, tags, links";

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn get_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Project::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("project {id}")))
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (name, client, color, start_date, end_date, tags, links)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.name)
        .bind(&project.client)
        .bind(&project.color)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(Json(&project.tags))
        .bind(Json(&project.links))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_project(
        &self,
        id: ProjectId,
        update: &UpdateProject,
    ) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects
            SET name = $2, client = $3, status = $4, color = $5, progress = $6,
                start_date = $7, end_date = $8, tags = $9, links = $10
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id.as_i32())
        .bind(&update.name)
        .bind(&update.client)
        .bind(update.status.to_string())
        .bind(&update.color)
        .bind(update.progress)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(Json(&update.tags))
        .bind(Json(&update.links))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Project::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("project {id}")))
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("project {id}")));
        }

        Ok(())
    }

    async fn update_progress(&self, id: ProjectId, progress: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE projects SET progress = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(progress)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("project {id}")));
        }

        Ok(())
    }
}
