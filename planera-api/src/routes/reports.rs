use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use reporting::{generate_report, ReportData, ReportScope};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{app_state::AppState, repositories::ArchivedReport};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(compute_report))
        .route("/archive", get(list_archive))
        .route("/archive", post(archive_report))
}

#[derive(Debug, Deserialize)]
struct ReportQuery {
    scope: Option<String>,
}

impl ReportQuery {
    fn scope(&self) -> Result<ReportScope, ApiError> {
        self.scope
            .as_deref()
            .unwrap_or("all")
            .parse()
            .map_err(|err: reporting::ParseReportScopeError| ApiError::bad_request(err.to_string()))
    }
}

#[instrument(name = "GET /reports", skip(app_state))]
async fn compute_report(
    Query(query): Query<ReportQuery>,
    State(app_state): State<AppState>,
) -> Result<Json<ReportData>, ApiError> {
    let report = build_report(&app_state, query.scope()?).await?;
    Ok(Json(report))
}

#[instrument(name = "GET /reports/archive", skip(app_state))]
async fn list_archive(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ArchivedReport>>, ApiError> {
    let snapshots = app_state.snapshot_repo.list_snapshots().await?;
    Ok(Json(snapshots))
}

#[instrument(name = "POST /reports/archive", skip(app_state))]
async fn archive_report(
    Query(query): Query<ReportQuery>,
    State(app_state): State<AppState>,
) -> Result<(StatusCode, Json<ArchivedReport>), ApiError> {
    let report = build_report(&app_state, query.scope()?).await?;
    let archived = app_state.snapshot_repo.append_snapshot(&report).await?;
    Ok((StatusCode::CREATED, Json(archived)))
}

/// Fetch a fresh snapshot of every collection, then hand off to the pure
/// aggregation engine.
async fn build_report(app_state: &AppState, scope: ReportScope) -> Result<ReportData, ApiError> {
    let projects = app_state.project_repo.get_projects().await?;
    let budgets = app_state.budget_repo.get_budgets().await?;
    let expenses = app_state.expense_repo.get_expenses().await?;
    let tasks = app_state.task_repo.get_tasks().await?;

    let today = OffsetDateTime::now_utc().date();
    Ok(generate_report(
        &projects, &budgets, &expenses, &tasks, scope, today,
    ))
}
