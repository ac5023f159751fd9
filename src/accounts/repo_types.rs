use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // store-assigned, immutable
    pub username: String,           // display name, free text, not unique
    pub email: String,              // normalized, unique lookup key
    #[serde(skip_serializing)]
    pub password_hash: String,      // argon2 PHC string, not exposed in JSON
    pub created_at: OffsetDateTime, // creation timestamp
}
