use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseSettings;

/// Connect to Postgres and make sure the schema exists.
pub async fn init_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect_with(settings.with_db())
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("database schema is ready");
    Ok(())
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        client TEXT,
        status TEXT NOT NULL DEFAULT 'idea',
        color TEXT,
        progress INTEGER NOT NULL DEFAULT 0,
        start_date DATE,
        end_date DATE,
        tags JSONB NOT NULL DEFAULT '[]',
        links JSONB NOT NULL DEFAULT '[]'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS budgets (
        id SERIAL PRIMARY KEY,
        project_id INTEGER,
        name TEXT NOT NULL,
        amount BIGINT NOT NULL DEFAULT 0,
        spent BIGINT NOT NULL DEFAULT 0,
        category TEXT NOT NULL DEFAULT 'other',
        type TEXT NOT NULL DEFAULT 'expense',
        date DATE,
        notes TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id SERIAL PRIMARY KEY,
        project_id INTEGER,
        category TEXT NOT NULL DEFAULT 'other',
        amount BIGINT NOT NULL DEFAULT 0,
        date DATE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id SERIAL PRIMARY KEY,
        project_id INTEGER,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        date DATE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS report_snapshots (
        id SERIAL PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        report JSONB NOT NULL
    )
    "#,
];
