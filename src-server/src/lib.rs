//! Portal Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - auth: Identity provider session and bearer token verification
//! - api: HTTP handlers

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod seed;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use auth::{purge_loop, IdentityProvider, JwksVerifier, SessionStore, SessionVerifier, TokenVerifier};
pub use config::Config;
use repository::{init_db, Repositories};

const SESSION_PURGE_EVERY: Duration = Duration::from_secs(300);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repos: Arc<Repositories>,
    pub sessions: Arc<SessionStore>,
    pub identity: Arc<IdentityProvider>,
    pub verifier: Arc<dyn TokenVerifier>,
}

pub async fn build_state(config: Config) -> Result<AppState> {
    let db = init_db(&config.database)
        .await
        .with_context(|| format!("opening database {}", config.database.display()))?;
    let repos = Arc::new(Repositories::new(&db));
    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    let identity = Arc::new(IdentityProvider::new(&config));

    let verifier: Arc<dyn TokenVerifier> = match &config.identity.audience {
        Some(audience) => {
            info!(%audience, "verifying bearer tokens as provider JWTs");
            Arc::new(JwksVerifier::new(identity.clone(), audience.clone()))
        }
        None => {
            info!("verifying bearer tokens against server sessions");
            Arc::new(SessionVerifier::new(sessions.clone()))
        }
    };

    Ok(AppState { config: Arc::new(config), repos, sessions, identity, verifier })
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origin.as_deref() == Some("*") {
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    let mut origins: Vec<String> = ["localhost", "127.0.0.1"]
        .iter()
        .flat_map(|host| [3000, 3001].map(|port| format!("http://{}:{}", host, port)))
        .collect();
    origins.push(config.public_url.clone());
    origins.extend(config.cors_origin.clone());

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// `/api/*` plus the built client, with unknown paths falling back to
/// `index.html` so client-side routes survive a reload.
pub fn router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let client = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api", api::routes())
        .fallback_service(client)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

pub async fn run(config: Config) -> Result<()> {
    let bind = config.bind;
    let seed = config.seed.clone();
    let state = build_state(config).await?;

    if let Some(path) = seed {
        let data = seed::load_file(&path)?;
        let inserted = seed::apply(&state.repos, &data).await?;
        info!(path = %path.display(), inserted, "seed applied");
    }

    tokio::spawn(purge_loop(state.sessions.clone(), SESSION_PURGE_EVERY));

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await.with_context(|| format!("binding {}", bind))?;
    info!("Portal server listening on {}", bind);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
