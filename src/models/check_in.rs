use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One check-in row as consumed by the response engine: the emotion it was
/// logged against plus the titles of actions marked completed with it.
/// Check-ins are append-only; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckInRecord {
    pub id: Uuid,
    pub emotion_id: Uuid,
    pub emotion_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_actions: Vec<String>,
}
