use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use reporting::{Expense, ProjectId, SpendCategory};
use serde::Deserialize;
use time::Date;
use tracing::instrument;

use crate::{app_state::AppState, repositories::NewExpense};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses))
        .route("/", post(create_expense))
        .route("/:id", put(update_expense))
        .route("/:id", delete(delete_expense))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseBody {
    #[serde(default)]
    project_id: Option<ProjectId>,
    #[serde(default)]
    category: SpendCategory,
    #[serde(default, deserialize_with = "reporting::serde_utils::lenient_amount")]
    amount: i64,
    #[serde(default)]
    date: Option<Date>,
}

impl From<ExpenseBody> for NewExpense {
    fn from(body: ExpenseBody) -> Self {
        Self {
            project_id: body.project_id,
            category: body.category,
            amount: body.amount,
            date: body.date,
        }
    }
}

#[instrument(name = "GET /expenses", skip(app_state))]
async fn list_expenses(State(app_state): State<AppState>) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = app_state.expense_repo.get_expenses().await?;
    Ok(Json(expenses))
}

#[instrument(name = "POST /expenses", skip(app_state, body))]
async fn create_expense(
    State(app_state): State<AppState>,
    Json(body): Json<ExpenseBody>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = app_state.expense_repo.create_expense(&body.into()).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[instrument(name = "PUT /expenses/:id", skip(app_state, body))]
async fn update_expense(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ExpenseBody>,
) -> Result<Json<Expense>, ApiError> {
    let expense = app_state
        .expense_repo
        .update_expense(id, &body.into())
        .await?;
    Ok(Json(expense))
}

#[instrument(name = "DELETE /expenses/:id", skip(app_state))]
async fn delete_expense(
    Path(id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state.expense_repo.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
