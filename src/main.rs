mod config;
mod data;
mod db;
mod entities;
mod error;
mod models;
mod omdb;
mod routes;
mod templates;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{config::Config, data::DataManager, omdb::OmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub data: DataManager,
    pub omdb: Arc<OmdbClient>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/users", get(routes::list_users).post(routes::create_user))
        .route("/users/{user_id}/movies", get(routes::movies).post(routes::add_movie))
        .route("/users/{user_id}/movies/{movie_id}/update", post(routes::update_movie))
        .route("/users/{user_id}/movies/{movie_id}/delete", post(routes::delete_movie))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("movieshelf/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let data = DataManager::new(db);

    let omdb = OmdbClient::new(
        http,
        config.omdb_api_key.clone(),
        config.omdb_base_url.clone(),
        Duration::from_secs(config.omdb_timeout_secs),
        config.omdb_rps,
    );

    let state = Arc::new(AppState { data, omdb: Arc::new(omdb) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
