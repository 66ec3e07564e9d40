use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-defined emotion. Names are unique per user, case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Emotion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
