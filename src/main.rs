mod auth;
mod config;
mod db;
mod entities;
mod error;
mod extract;
mod filter;
mod ids;
mod models;
mod normalize;
mod omdb;
mod routes;
mod service;
mod store;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use sea_orm::ConnectOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config, ids::UuidGenerator, omdb::OmdbClient, service::FilmService, store::FilmStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub films: FilmService,
    pub omdb: Arc<OmdbClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    if config.api_tokens.is_empty() {
        tracing::warn!("No API_TOKENS configured - /api is open to everyone");
    }

    let http = reqwest::Client::builder()
        .user_agent("filmshelf/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(ConnectOptions::new(config.database_url.clone())).await?;
    let films = FilmService::new(FilmStore::new(db), Arc::new(UuidGenerator));

    let omdb = OmdbClient::new(http, config.omdb_api_key.clone(), config.omdb_base_url.clone());

    let state = Arc::new(AppState { config: config.clone(), films, omdb: Arc::new(omdb) });

    let app = routes::router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// A configured origin gets credentialed access; otherwise any origin may call in.
fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let Some(origin) = &config.cors_allowed_origin else {
        return Ok(CorsLayer::new().allow_origin(Any).allow_headers(Any));
    };

    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>().context("CORS_ALLOWED_ORIGIN")?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}
