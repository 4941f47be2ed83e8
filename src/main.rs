use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router, routing::post};
use tracing_subscriber::EnvFilter;

use goride_post_api::{
    api,
    service::{DbLayerClient, HttpDbLayerClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_api_url =
        std::env::var("BASE_API_URL").context("the BASE_API_URL environment variable must be set")?;
    let db_layer: Arc<dyn DbLayerClient> = Arc::new(HttpDbLayerClient::new(base_api_url));

    let app = Router::new()
        .route("/api/SavePost", post(api::save_post::post))
        .layer(Extension(db_layer));

    let hostaddr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_owned());
    let listener = tokio::net::TcpListener::bind(&hostaddr)
        .await
        .with_context(|| format!("failed to bind to address '{}'", hostaddr))?;
    log::info!("Started listener at '{}'", hostaddr);

    axum::serve(listener, app).await?;

    Ok(())
}
