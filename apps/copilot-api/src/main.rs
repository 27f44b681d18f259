//! Clause Copilot API Server
//!
//! REST endpoints for:
//!
//! - Clause analysis and per-clause compliance scoring
//! - Whole-contract review
//! - Copilot clause regeneration
//! - The proposal token ledger (mint, vote, quorum)
//! - Contract registry, bank consensus and approval notifications

use std::net::SocketAddr;

use axum::{
    routing::{get, post, put},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

pub use state::AppState;

/// Command-line arguments for the copilot server
#[derive(Parser, Debug)]
#[command(name = "copilot-api")]
#[command(about = "Clause compliance copilot and proposal ledger server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "COPILOT_PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "COPILOT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::handle_health))
        // Clause analysis
        .route("/api/clauses/analyze", post(api::handle_analyze_clause))
        .route("/api/clauses/assess", post(api::handle_assess_clause))
        .route("/api/contracts/review", post(api::handle_review_contract))
        .route("/api/copilot/regenerate", post(api::handle_regenerate))
        // Proposal ledger
        .route("/api/ledger/init", post(api::handle_init_ledger))
        .route("/api/ledger/proposals/:id/mint", post(api::handle_mint))
        .route("/api/ledger/proposals/:id/votes", post(api::handle_vote))
        .route("/api/ledger/proposals/:id/quorum", post(api::handle_check_quorum))
        .route("/api/ledger/events", get(api::handle_list_events))
        // Contract registry
        .route("/api/registry/contracts", post(api::handle_register_contract))
        .route("/api/registry/contracts/:id", get(api::handle_get_contract))
        .route(
            "/api/registry/contracts/:id/status",
            put(api::handle_update_contract_status),
        )
        // Bank consensus
        .route("/api/consensus/votes", post(api::handle_submit_consensus_vote))
        .route(
            "/api/consensus/:contract_id/levels/:level",
            get(api::handle_check_consensus),
        )
        // Approval notifications
        .route("/api/notifications/subscribers", post(api::handle_subscribe))
        .route(
            "/api/notifications/subscribers/:country",
            get(api::handle_list_subscribers),
        )
        .route("/api/notifications/broadcast", post(api::handle_broadcast))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so env fallbacks see it
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting copilot API on {}:{}", args.host, args.port);

    let state = AppState::new()?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
