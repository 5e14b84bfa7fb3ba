//! Thin serving layer for the network dump. The dump pipeline writes one
//! large JSON document; this binary hands it to the visualization client
//! at `/api/network-data` and answers 404 until a dump exists.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 5500)]
    port: u16,

    /// JSON document produced by the dump pipeline.
    #[arg(long, default_value = "network-data.json")]
    data: PathBuf,
}

#[derive(Clone)]
struct ServerState {
    data_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if !args.data.exists() {
        tracing::warn!(
            path = %args.data.display(),
            "data file not found; /api/network-data will answer 404 until it appears"
        );
    }

    let state = Arc::new(ServerState {
        data_path: args.data,
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/network-data", get(network_data))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Failed to parse server address")?;
    info!(%addr, "Starting cosponsor data server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// The file is re-read per request so a fresh dump is picked up without a
/// restart; the document is served verbatim.
async fn network_data(State(state): State<Arc<ServerState>>) -> Response {
    match tokio::fs::read_to_string(&state.data_path).await {
        Ok(body) => match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => Json(value).into_response(),
            Err(error) => {
                tracing::error!(%error, path = %state.data_path.display(), "data file is not valid JSON");
                no_data()
            }
        },
        Err(error) => {
            tracing::warn!(%error, path = %state.data_path.display(), "data file unavailable");
            no_data()
        }
    }
}

fn no_data() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "No data available",
        }),
    )
        .into_response()
}
