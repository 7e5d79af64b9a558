use planera_api::{config, db, router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::read_config().expect("Failed to read configuration");
    let pool = db::init_pool(&config.database)
        .await
        .expect("Failed to connect to the database");

    let app = router::create(pool, &config);
    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );
    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind address");
    tracing::info!("listening on {}", address);

    axum::serve(listener, app).await.expect("Server crashed");
}
