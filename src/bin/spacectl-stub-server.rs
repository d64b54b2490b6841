use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "stub_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "stub_server/accounts.rs"]
mod accounts;
use self::accounts::*;
#[path = "stub_server/handlers_identity.rs"]
mod handlers_identity;
use self::handlers_identity::*;
#[path = "stub_server/handlers_spaces.rs"]
mod handlers_spaces;
use self::handlers_spaces::*;

#[derive(Clone, Debug)]
struct Subject {
    user: String,
}

#[derive(Clone, Debug)]
struct Space {
    name: String,
    initialized: bool,
}

#[derive(Clone)]
struct AppState {
    // username -> password
    users: Arc<RwLock<HashMap<String, String>>>,

    // token hash -> username
    sessions: Arc<RwLock<HashMap<String, String>>>,

    // username -> spaces in creation order
    spaces: Arc<RwLock<HashMap<String, Vec<Space>>>>,
}

#[derive(Parser)]
#[command(name = "spacectl-stub-server")]
#[command(about = "In-memory space service for tests and local development", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Pre-registered account as `name:password` (repeatable)
    #[arg(long = "user", default_value = "dev:dev")]
    users: Vec<String>,

    /// Pre-existing, already indexed space as `user:space` (repeatable)
    #[arg(long = "indexed-space")]
    indexed_spaces: Vec<String>,
}

#[tokio::main]
async fn main() {
    spacectl::logging::init("info");
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let mut users = HashMap::new();
    for value in &args.users {
        let (name, password) = parse_pair(value)?;
        users.insert(name, password);
    }

    let mut spaces: HashMap<String, Vec<Space>> = HashMap::new();
    for value in &args.indexed_spaces {
        let (user, name) = parse_pair(value)?;
        spaces.entry(user).or_default().push(Space {
            name,
            initialized: true,
        });
    }

    let state = Arc::new(AppState {
        users: Arc::new(RwLock::new(users)),
        sessions: Arc::default(),
        spaces: Arc::new(RwLock::new(spaces)),
    });

    let authed = Router::new()
        .route("/api/logout", post(logout))
        .route("/api/new", post(create_space))
        .route("/api/get-spaces", get(list_spaces))
        .route("/api/delete", delete(delete_space))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .merge(authed)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, "spacectl-stub-server listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized("No token provided");
    };
    let Ok(value) = value.to_str() else {
        return unauthorized("Invalid token");
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized("Invalid token");
    };

    let user = {
        let sessions = state.sessions.read().await;
        sessions.get(&hash_token(token)).cloned()
    };
    let Some(user) = user else {
        return unauthorized("Invalid token");
    };

    let mut req = req;
    req.extensions_mut().insert(Subject { user });
    next.run(req).await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
