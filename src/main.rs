mod auth;
mod client;
mod config;
mod error;
mod handlers;
mod logger;
mod models;
mod prompt;

use std::sync::Arc;

use auth::AuthGate;
use axum::{routing::{get, get_service, post, Router}};
use config::Config;
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Built once at startup and cloned into every handler. Nothing in here is mutated
// after main hands it to the router; the http client is shared so connections
// to ollama are pooled across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthGate,
    pub http_client: Client
}

impl AppState {

    pub fn new(config: Config) -> Self {

        let auth = AuthGate::new(config.password.clone());

        AppState {
            config: Arc::new(config),
            auth,
            http_client: Client::new()
        }

    }

}

pub fn app(state: AppState) -> Router {

    let index = ServeFile::new(state.config.index_path());
    let assets = ServeDir::new(&state.config.static_dir);

    // explicit routes first so the static mount never shadows them
    Router::new()
        .route("/", get_service(index))
        .route("/api/auth", post(handlers::auth))
        .route("/api/chat", post(handlers::chat))
        .route("/api/config", get(handlers::config))
        .route("/api/health", get(handlers::health))
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)

}

#[tokio::main]
async fn main() {

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()
        .expect("Invalid configuration");

    let addr = config.bind_addr()
        .expect("Invalid HOST/PORT");

    tracing::info!(
        ollama_url = %config.ollama_url,
        model = %config.ollama_model,
        static_dir = %config.static_dir,
        "starting power query agent"
    );

    let state = AppState::new(config);
    let app = app(state);

    let listener = TcpListener::bind(addr).await
        .expect("Failed to bind listen address");
    tracing::info!("listening on {}", listener.local_addr()
        .expect("Failed to get local address"));
    axum::serve(listener, app).await
        .expect("Server failed");

}
