use anyhow::Context;
use axum::Router;
use dotenv::dotenv;
use household_todos::{SharedData, api, app_env, db, logging, persistence};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    let env_filter = logging::init_env_filter()?;
    let otel_exporters = logging::exporters_from_env()?;
    logging::setup_logging_and_tracing(env_filter, otel_exporters);

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("the {} environment variable must be set", app_env::DB_URL))?;
    let pool = db::connect_sqlx(&db_url).await?;
    db::run_migrations(&pool).await?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
    });
    let router = Router::new()
        .merge(api::todo::todo_routes())
        .merge(api::assignment::assignment_routes())
        .merge(api::category::category_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data);
    let router = logging::attach_tracing_http(router);

    let listen_addr =
        env::var(app_env::LISTEN_ADDR).unwrap_or_else(|_| app_env::DEFAULT_LISTEN_ADDR.to_owned());
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding to {listen_addr}"))?;

    info!("Starting server on {listen_addr}.");
    axum::serve(listener, router)
        .await
        .context("serving household todo requests")
}
