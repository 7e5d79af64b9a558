use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt; // For `collect`
use planera_api::app_state::AppState;
use planera_api::repositories::{
    MockBudgetRepository, MockExpenseRepository, MockProjectRepository, MockSnapshotRepository,
    MockTaskRepository,
};
use planera_api::router;
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot`

/// A fresh app over empty in-memory repositories.
fn test_app() -> Router {
    let app_state = AppState::with_repositories(
        Arc::new(MockProjectRepository::new()),
        Arc::new(MockBudgetRepository::new()),
        Arc::new(MockExpenseRepository::new()),
        Arc::new(MockTaskRepository::new()),
        Arc::new(MockSnapshotRepository::new()),
    );
    router::build(app_state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn create_and_list_projects() {
    let app = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/projects",
        Some(json!({"name": "Website relaunch", "tags": "[\"web\"]"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["status"], "idea");
    assert_eq!(created["progress"], 0);
    assert_eq!(created["tags"], json!(["web"]));

    let (status, listed) = send(&app, "GET", "/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", "/projects/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/projects/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn progress_endpoint_clamps_any_input() {
    let app = test_app();
    send(&app, "POST", "/projects", Some(json!({"name": "Alpha"}))).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/projects/1/progress",
        Some(json!({"progress": 150})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 100);

    let (_, body) = send(
        &app,
        "PATCH",
        "/projects/1/progress",
        Some(json!({"progress": -5})),
    )
    .await;
    assert_eq!(body["progress"], 0);

    let (_, body) = send(
        &app,
        "PATCH",
        "/projects/1/progress",
        Some(json!({"progress": "42"})),
    )
    .await;
    assert_eq!(body["progress"], 42);

    let (_, body) = send(
        &app,
        "PATCH",
        "/projects/1/progress",
        Some(json!({"progress": "abc"})),
    )
    .await;
    assert_eq!(body["progress"], 0);

    // The last write is what the record now holds.
    let (_, project) = send(&app, "GET", "/projects/1", None).await;
    assert_eq!(project["progress"], 0);

    let (status, _) = send(
        &app,
        "PATCH",
        "/projects/999/progress",
        Some(json!({"progress": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Seed two projects with one budget, two expenses and two tasks linked to
/// the first project.
async fn seed_report_fixture(app: &Router) {
    send(app, "POST", "/projects", Some(json!({"name": "Alpha"}))).await;
    send(app, "POST", "/projects", Some(json!({"name": "Beta"}))).await;
    send(
        app,
        "PUT",
        "/projects/1",
        Some(json!({"name": "Alpha", "status": "active"})),
    )
    .await;
    send(
        app,
        "PUT",
        "/projects/2",
        Some(json!({"name": "Beta", "status": "completed"})),
    )
    .await;

    send(
        app,
        "POST",
        "/budgets",
        Some(json!({"projectId": 1, "name": "Main", "amount": 1_000_000})),
    )
    .await;
    send(
        app,
        "POST",
        "/expenses",
        Some(json!({"projectId": 1, "amount": 400_000, "category": "hosting"})),
    )
    .await;
    send(
        app,
        "POST",
        "/expenses",
        Some(json!({"projectId": 1, "amount": 100_000, "category": "design"})),
    )
    .await;
    send(
        app,
        "POST",
        "/tasks",
        Some(json!({"projectId": 1, "completed": true})),
    )
    .await;
    send(
        app,
        "POST",
        "/tasks",
        Some(json!({"projectId": 1, "completed": false})),
    )
    .await;
}

#[tokio::test]
async fn report_aggregates_the_full_scope() {
    let app = test_app();
    seed_report_fixture(&app).await;

    let (status, report) = send(&app, "GET", "/reports?scope=all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalProjects"], 2);
    assert_eq!(report["activeProjects"], 1);
    assert_eq!(report["completedProjects"], 1);
    assert_eq!(report["reviewProjects"], 0);
    assert_eq!(report["totalBudget"], 1_000_000);
    assert_eq!(report["totalExpenses"], 500_000);
    assert_eq!(report["remainingBudget"], 500_000);
    assert_eq!(report["budgetUsedPercent"], 50.0);
    assert_eq!(report["completedTasks"], 1);
    assert_eq!(report["pendingTasks"], 1);
    assert_eq!(report["taskCompletionRate"], 50.0);
    assert_eq!(report["projectDetails"].as_array().unwrap().len(), 2);
    assert_eq!(report["expenseByCategory"]["hosting"], 400_000);
    assert_eq!(report["expenseByCategory"]["design"], 100_000);
}

#[tokio::test]
async fn report_scope_narrows_to_one_project() {
    let app = test_app();
    seed_report_fixture(&app).await;

    // Project 2 has no linked budget, expense or task records.
    let (status, report) = send(&app, "GET", "/reports?scope=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalProjects"], 1);
    assert_eq!(report["totalBudget"], 0);
    assert_eq!(report["totalExpenses"], 0);
    assert_eq!(report["remainingBudget"], 0);
    assert_eq!(report["budgetUsedPercent"], 0.0);

    // An unknown id is an empty scope, not an error.
    let (status, report) = send(&app, "GET", "/reports?scope=999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalProjects"], 0);

    let (status, _) = send(&app, "GET", "/reports?scope=everything", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_scope_defaults_to_all() {
    let app = test_app();
    seed_report_fixture(&app).await;

    let (status, report) = send(&app, "GET", "/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalProjects"], 2);
}

#[tokio::test]
async fn archive_keeps_the_newest_ten_snapshots() {
    let app = test_app();
    seed_report_fixture(&app).await;

    for _ in 0..12 {
        let (status, _) = send(&app, "POST", "/reports/archive?scope=all", None).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, snapshots) = send(&app, "GET", "/reports/archive", None).await;
    assert_eq!(status, StatusCode::OK);
    let snapshots = snapshots.as_array().unwrap().clone();
    assert_eq!(snapshots.len(), 10);

    // Newest first: the two oldest snapshots have been evicted.
    let ids: Vec<i64> = snapshots.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
    assert_eq!(snapshots[0]["report"]["totalProjects"], 2);
}

#[tokio::test]
async fn budget_amounts_are_coerced_at_the_boundary() {
    let app = test_app();

    let (status, budget) = send(
        &app,
        "POST",
        "/budgets",
        Some(json!({"name": "Launch", "amount": "250000", "spent": "oops"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(budget["amount"], 250_000);
    assert_eq!(budget["spent"], 0);
    assert_eq!(budget["type"], "expense");
    assert_eq!(budget["category"], "other");
}
