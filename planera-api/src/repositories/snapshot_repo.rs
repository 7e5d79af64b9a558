use async_trait::async_trait;
use reporting::{ReportData, ARCHIVE_CAP};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

/// The report archive: an append-only, capped log of report snapshots.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Archived snapshots, newest first, at most [`ARCHIVE_CAP`].
    async fn list_snapshots(&self) -> Result<Vec<ArchivedReport>, RepositoryError>;
    /// Append a snapshot, evicting the oldest beyond the cap.
    async fn append_snapshot(&self, report: &ReportData)
        -> Result<ArchivedReport, RepositoryError>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedReport {
    pub id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    pub report: ReportData,
}

pub struct SnapshotRepositoryImpl {
    pool: PgPool,
}

impl SnapshotRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    id: i32,
    created_at: time::OffsetDateTime,
    report: Json<ReportData>,
}

impl From<SnapshotRow> for ArchivedReport {
    fn from(row: SnapshotRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            report: row.report.0,
        }
    }
}

#[async_trait]
impl SnapshotRepository for SnapshotRepositoryImpl {
    async fn list_snapshots(&self) -> Result<Vec<ArchivedReport>, RepositoryError> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT id, created_at, report
            FROM report_snapshots
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(ARCHIVE_CAP as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArchivedReport::from).collect())
    }

    async fn append_snapshot(
        &self,
        report: &ReportData,
    ) -> Result<ArchivedReport, RepositoryError> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            INSERT INTO report_snapshots (report)
            VALUES ($1)
            RETURNING id, created_at, report
            "#,
        )
        .bind(Json(report))
        .fetch_one(&self.pool)
        .await?;

        // Keep the table bounded to the newest snapshots.
        sqlx::query(
            r#"
            DELETE FROM report_snapshots
            WHERE id NOT IN (
                SELECT id FROM report_snapshots
                ORDER BY created_at DESC, id DESC
                LIMIT $1
            )
            "#,
        )
        .bind(ARCHIVE_CAP as i64)
        .execute(&self.pool)
        .await?;

        Ok(row.into())
    }
}
