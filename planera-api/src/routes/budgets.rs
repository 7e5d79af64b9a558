use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use reporting::{Budget, BudgetKind, ProjectId, SpendCategory};
use serde::Deserialize;
use time::Date;
use tracing::instrument;

use crate::{app_state::AppState, repositories::NewBudget};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets))
        .route("/", post(create_budget))
        .route("/:id", put(update_budget))
        .route("/:id", delete(delete_budget))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetBody {
    #[serde(default)]
    project_id: Option<ProjectId>,
    name: String,
    #[serde(default, deserialize_with = "reporting::serde_utils::lenient_amount")]
    amount: i64,
    #[serde(default, deserialize_with = "reporting::serde_utils::lenient_amount")]
    spent: i64,
    #[serde(default)]
    category: SpendCategory,
    #[serde(rename = "type", default)]
    kind: BudgetKind,
    #[serde(default)]
    date: Option<Date>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<BudgetBody> for NewBudget {
    fn from(body: BudgetBody) -> Self {
        Self {
            project_id: body.project_id,
            name: body.name,
            amount: body.amount,
            spent: body.spent,
            category: body.category,
            kind: body.kind,
            date: body.date,
            notes: body.notes,
        }
    }
}

#[instrument(name = "GET /budgets", skip(app_state))]
async fn list_budgets(State(app_state): State<AppState>) -> Result<Json<Vec<Budget>>, ApiError> {
    let budgets = app_state.budget_repo.get_budgets().await?;
    Ok(Json(budgets))
}

#[instrument(name = "POST /budgets", skip(app_state, body), fields(name = %body.name))]
async fn create_budget(
    State(app_state): State<AppState>,
    Json(body): Json<BudgetBody>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    let budget = app_state.budget_repo.create_budget(&body.into()).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

#[instrument(name = "PUT /budgets/:id", skip(app_state, body))]
async fn update_budget(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<BudgetBody>,
) -> Result<Json<Budget>, ApiError> {
    let budget = app_state.budget_repo.update_budget(id, &body.into()).await?;
    Ok(Json(budget))
}

#[instrument(name = "DELETE /budgets/:id", skip(app_state))]
async fn delete_budget(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state.budget_repo.delete_budget(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
