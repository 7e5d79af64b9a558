use axum::{http::Method, routing::get, Router};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes};

pub fn create(connection_pool: PgPool, config: &Settings) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(["content-type".parse().unwrap()])
        .allow_origin(AllowOrigin::exact(
            config
                .application
                .app_url
                .parse()
                .expect("Invalid app URL in configuration"),
        ));

    build(AppState::new(connection_pool))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Assemble the router over any state; tests inject mock-backed state
/// here and skip the CORS/trace layers.
pub fn build(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(|| async { "planera api" }))
        .nest("/projects", routes::projects::router())
        .nest("/budgets", routes::budgets::router())
        .nest("/expenses", routes::expenses::router())
        .nest("/tasks", routes::tasks::router())
        .nest("/reports", routes::reports::router())
        .with_state(app_state)
}
