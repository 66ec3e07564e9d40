//! Read-side collaborator queries consumed by the response engine.
//!
//! Write paths (creating emotions, actions, check-ins) belong to the
//! surrounding CRUD layer and are not exposed here. Every query scopes by
//! the requesting user so the engine can never see another user's data.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::action::Action;
use crate::models::check_in::CheckInRecord;
use crate::models::emotion::Emotion;

/// The user's emotions in alphabetical order (case-insensitive, creation
/// time as tie-break). The matcher's "first match wins" rule depends on
/// this ordering being stable.
pub async fn list_emotions(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Emotion>> {
    sqlx::query_as::<_, Emotion>(
        r#"
        SELECT * FROM emotions
        WHERE user_id = $1
        ORDER BY LOWER(name) ASC, created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Check-ins since `since`, newest-first, each carrying its emotion name and
/// the titles of actions marked completed with it.
pub async fn list_check_ins_since(
    db: &PgPool,
    user_id: Uuid,
    since: DateTime<Utc>,
) -> sqlx::Result<Vec<CheckInRecord>> {
    sqlx::query_as::<_, CheckInRecord>(
        r#"
        SELECT
            ci.id,
            ci.emotion_id,
            e.name AS emotion_name,
            ci.notes,
            ci.created_at,
            COALESCE(
                array_agg(a.title) FILTER (WHERE cia.completed),
                ARRAY[]::TEXT[]
            ) AS completed_actions
        FROM check_ins ci
        JOIN emotions e ON e.id = ci.emotion_id
        LEFT JOIN check_in_actions cia ON cia.check_in_id = ci.id
        LEFT JOIN actions a ON a.id = cia.action_id
        WHERE ci.user_id = $1 AND ci.created_at >= $2
        GROUP BY ci.id, e.name
        ORDER BY ci.created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(db)
    .await
}

/// Actions configured for one of the user's emotions, oldest-first. The join
/// against `emotions` enforces that the emotion belongs to the requesting
/// user; a foreign emotion id yields an empty list.
pub async fn list_actions_for_emotion(
    db: &PgPool,
    user_id: Uuid,
    emotion_id: Uuid,
) -> sqlx::Result<Vec<Action>> {
    sqlx::query_as::<_, Action>(
        r#"
        SELECT a.* FROM actions a
        JOIN emotions e ON e.id = a.emotion_id
        WHERE a.emotion_id = $1 AND e.user_id = $2
        ORDER BY a.created_at ASC
        "#,
    )
    .bind(emotion_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}
