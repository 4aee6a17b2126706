#![recursion_limit = "256"]

mod config;
mod db;
mod dialog;
mod notify;
mod pages;
mod rate_limit;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    if config.mail.is_none() {
        tracing::warn!("RESEND_API_KEY/RESEND_FROM not set; access codes will be logged");
    }

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");
    let state = state::AppState::from_pool(pool, &config);

    let app = routes::app(state, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "koinon listening");
    axum::serve(listener, app).await.expect("server failed");
}
