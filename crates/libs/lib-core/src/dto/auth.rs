//! # Authentication Data Transfer Objects
//!
//! Response structures for the `/auth` endpoints and other plain acknowledgments.
//!
//! ## Endpoints Using These DTOs
//!
//! - `GET /auth/me` -> [`UserInfo`]
//! - `POST /auth/logout` -> [`MessageResponse`]
//! - `POST /setup_db` -> [`MessageResponse`]
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "id": 1,
//!   "email": "alice@example.com",
//!   "name": "Alice",
//!   "picture": "https://lh3.googleusercontent.com/a/...",
//!   "created_at": "2024-09-01T08:30:00Z",
//!   "last_login": "2024-09-03T17:02:11Z"
//! }
//! ```

use crate::model::store::models::User;
use lib_utils::format_time;
use serde::{Deserialize, Serialize};

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            picture: user.picture,
            created_at: format_time(user.created_at),
            last_login: user.last_login.map(format_time),
        }
    }
}

/// `{"message": "..."}` acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
