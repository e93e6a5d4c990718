//! # Database Setup Handler
//!
//! `POST /setup_db` creates any missing tables on demand. Tables are also
//! created at startup unless `ServerConfig::create_tables_on_startup` is off.

use axum::{extract::State, Json};
use lib_core::dto::MessageResponse;
use lib_core::model::store::schema;
use lib_core::{AppError, DbPool, Result};
use tracing::{error, info};

pub async fn setup_database(State(pool): State<DbPool>) -> Result<Json<MessageResponse>> {
    if let Err(e) = schema::create_all(&pool).await {
        error!("Error setting up database: {}", e);
        return Err(AppError::DatabaseSetup(e.to_string()));
    }

    info!("[SETUP] Tables created");
    Ok(Json(MessageResponse::new("Database setup completed.")))
}
