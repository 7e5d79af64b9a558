use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use reporting::{clamp_progress, Project, ProjectId, ProjectLink, ProjectStatus, ProgressInput};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::instrument;

use crate::{
    app_state::AppState,
    repositories::{NewProject, UpdateProject},
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/", post(create_project))
        .route("/:id", get(get_project))
        .route("/:id", put(update_project))
        .route("/:id", delete(delete_project))
        .route("/:id/progress", patch(set_progress))
}

#[instrument(name = "GET /projects", skip(app_state))]
async fn list_projects(State(app_state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = app_state.project_repo.get_projects().await?;
    Ok(Json(projects))
}

#[instrument(name = "GET /projects/:id", skip(app_state))]
async fn get_project(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<Json<Project>, ApiError> {
    let project = app_state.project_repo.get_project(ProjectId::new(id)).await?;
    Ok(Json(project))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectBody {
    name: String,
    #[serde(default)]
    client: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    start_date: Option<Date>,
    #[serde(default, alias = "targetDate")]
    end_date: Option<Date>,
    #[serde(default, deserialize_with = "reporting::serde_utils::lenient_tags")]
    tags: Vec<String>,
    #[serde(default)]
    links: Vec<ProjectLink>,
}

#[instrument(name = "POST /projects", skip(app_state, body), fields(name = %body.name))]
async fn create_project(
    State(app_state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let new_project = NewProject {
        name: body.name,
        client: body.client,
        color: body.color,
        start_date: body.start_date,
        end_date: body.end_date,
        tags: body.tags,
        links: body.links,
    };

    let project = app_state.project_repo.create_project(&new_project).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectBody {
    name: String,
    #[serde(default)]
    client: Option<String>,
    #[serde(default)]
    status: ProjectStatus,
    #[serde(default)]
    color: Option<String>,
    #[serde(default, alias = "customProgress")]
    progress: i32,
    #[serde(default)]
    start_date: Option<Date>,
    #[serde(default, alias = "targetDate")]
    end_date: Option<Date>,
    #[serde(default, deserialize_with = "reporting::serde_utils::lenient_tags")]
    tags: Vec<String>,
    #[serde(default)]
    links: Vec<ProjectLink>,
}

#[instrument(name = "PUT /projects/:id", skip(app_state, body))]
async fn update_project(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<UpdateProjectBody>,
) -> Result<Json<Project>, ApiError> {
    let update = UpdateProject {
        name: body.name,
        client: body.client,
        status: body.status,
        color: body.color,
        progress: body.progress.clamp(0, 100),
        start_date: body.start_date,
        end_date: body.end_date,
        tags: body.tags,
        links: body.links,
    };

    let project = app_state
        .project_repo
        .update_project(ProjectId::new(id), &update)
        .await?;
    Ok(Json(project))
}

#[instrument(name = "DELETE /projects/:id", skip(app_state))]
async fn delete_project(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state
        .project_repo
        .delete_project(ProjectId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct SetProgressBody {
    progress: ProgressInput,
}

#[derive(Debug, Serialize)]
struct SetProgressResponse {
    progress: i32,
}

/// Accepts whatever the progress bar or input field sends; the value is
/// clamped to 0..=100, never rejected.
#[instrument(name = "PATCH /projects/:id/progress", skip(app_state))]
async fn set_progress(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<SetProgressBody>,
) -> Result<Json<SetProgressResponse>, ApiError> {
    let clamped = clamp_progress(&body.progress);
    app_state
        .project_repo
        .update_progress(ProjectId::new(id), clamped)
        .await?;

    Ok(Json(SetProgressResponse { progress: clamped }))
}
