use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod handlers;
mod query;
mod route;
mod views;

use api::DogmaClient;
use handlers::{file_content_handler, not_found_handler, AppState, SharedState};
use query::FileContentQuery;

// --- Configuration ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The network address to bind to
    #[arg(short, long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    bind_addr: SocketAddr,

    /// Base URL of the Dogma server
    #[arg(short, long, value_name = "URL", default_value = "http://127.0.0.1:36462")]
    api_url: String,

    /// Access token sent as a bearer token to the Dogma API
    #[arg(short, long, value_name = "TOKEN", default_value = "anonymous")]
    token: String,

    /// Directory served under /static
    #[arg(long, value_name = "DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Timeout for requests to the Dogma API, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,
}

// --- Main Application ---
#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = match DogmaClient::new(
        &args.api_url,
        &args.token,
        Duration::from_secs(args.timeout_secs),
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create Dogma client: {}", e);
            eprintln!("Error: Failed to create Dogma client: {}", e);
            std::process::exit(1);
        }
    };

    info!("Reading content from: {}", args.api_url);
    info!("Listening on: {}", args.bind_addr);

    let shared_state = Arc::new(AppState {
        query: FileContentQuery::new(Arc::new(client)),
    });

    let app = create_router(shared_state, &args.static_dir);

    let listener = match tokio::net::TcpListener::bind(args.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {}", args.bind_addr, e);
            eprintln!("Error: Failed to bind to address {}: {}", args.bind_addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

// --- Router ---
fn create_router(state: SharedState, static_dir: &std::path::Path) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET])
        .allow_origin(Any);

    // The file path is optional; without it the page still renders with its defaults.
    Router::new()
        .route(
            "/app/projects/:projectName/repos/:repoName/files/:revision",
            get(file_content_handler),
        )
        .route(
            "/app/projects/:projectName/repos/:repoName/files/:revision/",
            get(file_content_handler),
        )
        .route(
            "/app/projects/:projectName/repos/:repoName/files/:revision/*path",
            get(file_content_handler),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
