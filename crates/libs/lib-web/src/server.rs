//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that loads configuration,
//! prepares the database, builds the Axum router with its middleware stack, and
//! starts the HTTP server.

// region: --- Imports
use axum::{routing::{get, post}, Router};
use lib_auth::{GoogleOAuth, OAuthProvider};
use lib_core::model::store::schema;
use lib_core::{create_pool, Config, DbPool};
use std::sync::Arc;
use tower_sessions::{service::SignedCookie, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::{info, warn};

use crate::handlers;
use crate::middleware::{
    cors_layer, log_requests, session_layer, session_store, spawn_expired_deletion, stamp_req,
    RequestStamp,
};
use crate::routes;
// endregion: --- Imports

// region: --- AppState
/// The configured identity provider, absent when `GOOGLE_CLIENT_ID` is not set.
pub type SharedOAuth = Option<Arc<dyn OAuthProvider>>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub oauth: SharedOAuth,
}

impl AppState {
    pub fn new(db: DbPool, config: Config, oauth: SharedOAuth) -> Self {
        Self { db, config, oauth }
    }
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for SharedOAuth {
    fn from_ref(state: &AppState) -> Self {
        state.oauth.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000")
    pub bind_address: String,
    /// Run `schema::create_all` before accepting requests
    pub create_tables_on_startup: bool,
}

impl ServerConfig {
    /// Defaults, with the bind address overridable through `BIND_ADDRESS`.
    pub fn from_env() -> Self {
        Self {
            bind_address: lib_utils::get_env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            ..Default::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            create_tables_on_startup: true,
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - Database connection fails
/// - Table creation fails
/// - The session table cannot be created
/// - Server binding fails
///
/// Missing environment variables are *not* errors; they are logged as warnings.
/// `.env` is expected to be loaded by the caller.
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing()?;

    info!(" COURSE BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let config = Config::from_env();
    config.warn_missing();

    info!("Database URL: {}", config.database_url);
    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;

    if server_config.create_tables_on_startup {
        info!(" Creating missing tables...");
        schema::create_all(&pool).await?;
        info!(" Tables ready");
    }

    let oauth = google_provider(&config);
    let store = session_store(pool.clone()).await?;
    spawn_expired_deletion(store.clone());
    let sessions = session_layer(store, config.secret_key.as_deref());

    let state = AppState::new(pool, config, oauth);
    let app = build_router(state, sessions);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;

    info!(" SERVER READY: http://{}", server_config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Install the global tracing subscriber. Returns the effective level name.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = lib_utils::get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Build the Google provider when a client id is configured.
fn google_provider(config: &Config) -> SharedOAuth {
    let client_id = config.google_client_id.clone()?;

    match GoogleOAuth::new(
        client_id,
        config.google_client_secret.clone(),
        config.google_redirect_url.clone(),
    ) {
        Ok(google) => {
            info!(" Google sign-in enabled (redirect: {})", config.google_redirect_url);
            let provider: Arc<dyn OAuthProvider> = Arc::new(google);
            Some(provider)
        }
        Err(e) => {
            warn!("Google sign-in disabled: {}", e);
            None
        }
    }
}

/// Create the main application router with all routes and middleware.
///
/// Layers, outermost first: CORS, request stamp, trace span, request logging,
/// session.
pub fn build_router(
    state: AppState,
    sessions: SessionManagerLayer<SqliteStore, SignedCookie>,
) -> Router {
    let cors = cors_layer(state.config.frontend_url.as_deref());

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .nest("/auth", routes::auth_routes(state.clone()))
        .nest("/course", routes::course_routes(state.clone()))
        .route("/setup_db", post(handlers::setup::setup_database))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(sessions)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    // Path only: the OAuth callback query carries the authorization code.
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                        version = ?request.version(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                }),
        )
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • GET  /auth/login");
    info!("   • GET  /auth/callback?code={{code}}&state={{state}}");
    info!("   • GET  /auth/me");
    info!("   • POST /auth/logout");
    info!(" COURSES:");
    info!("   • GET  /course");
    info!("   • POST /course");
    info!("   • GET  /course/{{id}}");
    info!("   • PUT  /course/{{id}}");
    info!("   • DELETE /course/{{id}}");
    info!(" ADMIN:");
    info!("   • POST /setup_db");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
