//! Memory Gallery Server
//!
//! Backend for the photo-gallery site: photo memories (image bytes in an
//! S3-compatible bucket, metadata in PostgreSQL) and editable site texts.

mod config;
mod cors;
mod error;
mod extractors;
mod handlers;
mod services;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use gallery_core::ports::{BlobStore, MemoryStore, TextStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use cors::CorsPolicy;
use services::{CdnLocation, MemoryService, TextService};
use storage::{Database, S3BlobStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub memories: Arc<MemoryService>,
    pub texts: Arc<TextService>,
}

impl AppState {
    pub fn new(
        memory_store: Arc<dyn MemoryStore>,
        text_store: Arc<dyn TextStore>,
        blobs: Arc<dyn BlobStore>,
        cdn: CdnLocation,
    ) -> Self {
        Self {
            memories: Arc::new(MemoryService::new(memory_store, blobs, cdn)),
            texts: Arc::new(TextService::new(text_store)),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Memory Gallery Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    info!("Loading configuration...");
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, bucket={}",
        settings.bind_address, settings.storage_bucket
    );

    let db = Arc::new(
        Database::connect(&settings)
            .await
            .context("Failed to initialize database")?,
    );
    if settings.run_migrations {
        db.run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let blobs = Arc::new(
        S3BlobStore::new(&settings).context("Failed to configure object storage")?,
    );

    let cdn = CdnLocation {
        base_url: settings.cdn_base_url.clone(),
        account_id: settings.cdn_account().to_string(),
    };

    let state = AppState::new(db.clone(), db, blobs, cdn);

    let app = app(state, settings.max_upload_bytes).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Router without transport layers
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(memory_routes("/memories", max_upload_bytes))
        .merge(memory_routes("/api/memories", max_upload_bytes))
        .merge(text_routes("/texts"))
        .merge(text_routes("/api/texts"))
        .with_state(state)
}

// `get` would also answer HEAD; each route serves only its listed methods.
fn memory_routes(path: &str, max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(handlers::memories::list)
                .post(handlers::memories::upload)
                .delete(handlers::memories::delete)
                .options(handlers::memories::preflight)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsPolicy::Memories.layer())
}

fn text_routes(path: &str) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(handlers::texts::list)
                .put(handlers::texts::update)
                .options(handlers::texts::preflight)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .layer(CorsPolicy::Texts.layer())
}
