use axum::Router;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use chatrelay::channels::whatsapp;
use chatrelay::config::AppConfig;
use chatrelay::shared::state::AppState;
use chatrelay::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = AppConfig::from_env()?;
    let host = config.server.host.clone();
    let port = config.server.port;
    let state = Arc::new(AppState::new(config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(web::routes())
        .merge(whatsapp::routes())
        .layer(cors)
        .with_state(state);

    info!("Starting HTTP server on {}:{}", host, port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
