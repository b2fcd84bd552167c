#![recursion_limit = "256"]

mod config;
mod proxy;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let state = state::AppState::new(&config).expect("http client init failed");
    let app = routes::app(state).expect("leptos init failed");

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, backend = %config.backend_url, "lexi listening");
    axum::serve(listener, app).await.expect("server failed");
}
