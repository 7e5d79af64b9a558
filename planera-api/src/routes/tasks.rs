use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use reporting::{ProjectId, Task};
use serde::Deserialize;
use time::Date;
use tracing::instrument;

use crate::{app_state::AppState, repositories::NewTask};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/", post(create_task))
        .route("/:id", put(update_task))
        .route("/:id", delete(delete_task))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskBody {
    #[serde(default)]
    project_id: Option<ProjectId>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    date: Option<Date>,
}

impl From<TaskBody> for NewTask {
    fn from(body: TaskBody) -> Self {
        Self {
            project_id: body.project_id,
            completed: body.completed,
            date: body.date,
        }
    }
}

#[instrument(name = "GET /tasks", skip(app_state))]
async fn list_tasks(State(app_state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = app_state.task_repo.get_tasks().await?;
    Ok(Json(tasks))
}

#[instrument(name = "POST /tasks", skip(app_state, body))]
async fn create_task(
    State(app_state): State<AppState>,
    Json(body): Json<TaskBody>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = app_state.task_repo.create_task(&body.into()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(name = "PUT /tasks/:id", skip(app_state, body))]
async fn update_task(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<TaskBody>,
) -> Result<Json<Task>, ApiError> {
    let task = app_state.task_repo.update_task(id, &body.into()).await?;
    Ok(Json(task))
}

#[instrument(name = "DELETE /tasks/:id", skip(app_state))]
async fn delete_task(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state.task_repo.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
