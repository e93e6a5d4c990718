//! # Session Layer
//!
//! Cookie sessions stored in the application database. The cookie holds only
//! the session id, signed with a key derived from `SECRET_KEY`.
//!
//! Expired records are removed by a background task started with
//! [`spawn_expired_deletion`].

use lib_auth::signing_key;
use lib_core::DbPool;
use time::Duration;
use tokio::task::JoinHandle;
use tower_sessions::{
    cookie::SameSite, service::SignedCookie, ExpiredDeletion, Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::{error, info};

pub const SESSION_COOKIE_NAME: &str = "session";

/// Idle sessions expire after two weeks.
pub const SESSION_MAX_IDLE_DAYS: i64 = 14;

/// Interval between sweeps of expired session records.
pub const EXPIRED_SWEEP_INTERVAL_SECS: u64 = 60;

/// Open the session store on `pool`, creating its table when missing.
pub async fn session_store(pool: DbPool) -> anyhow::Result<SqliteStore> {
    let store = SqliteStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

/// Periodically delete expired session records.
pub fn spawn_expired_deletion(store: SqliteStore) -> JoinHandle<()> {
    info!(
        "[SESSION] Sweeping expired sessions every {}s",
        EXPIRED_SWEEP_INTERVAL_SECS
    );
    tokio::task::spawn(async move {
        if let Err(e) = store
            .continuously_delete_expired(tokio::time::Duration::from_secs(
                EXPIRED_SWEEP_INTERVAL_SECS,
            ))
            .await
        {
            error!("[SESSION] Expired session sweep stopped: {}", e);
        }
    })
}

/// Build the session layer.
pub fn session_layer(
    store: SqliteStore,
    secret_key: Option<&str>,
) -> SessionManagerLayer<SqliteStore, SignedCookie> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_same_site(SameSite::Lax)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_MAX_IDLE_DAYS)))
        .with_signed(signing_key(secret_key))
}
