use axum::{extract::State, Extension, Json};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::assistant::{context, history, matcher, reply};
use crate::auth::middleware::AuthUser;
use crate::dto::{AssistantMessageRequest, AssistantMessageResponse};
use crate::error::{AppError, AppResult};
use crate::{store, AppState};

/// POST /api/assistant/message — the chat assistant.
///
/// Sequential per request: match the message against the user's emotions,
/// aggregate their recent history into facts, build a bounded prompt, then
/// generate a reply (external completion with rule-based fallback).
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<AssistantMessageRequest>,
) -> AppResult<Json<AssistantMessageResponse>> {
    body.validate()
        .map_err(|_| AppError::Validation("Message is required".into()))?;
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".into()));
    }

    let emotions = store::list_emotions(&state.db, auth_user.id).await?;

    let since = Utc::now() - Duration::days(history::LOOKBACK_DAYS);
    let check_ins = store::list_check_ins_since(&state.db, auth_user.id, since).await?;

    let matched = matcher::match_emotion(message, &emotions);

    let configured_actions: Vec<String> = match matched {
        Some(emotion) => store::list_actions_for_emotion(&state.db, auth_user.id, emotion.id)
            .await?
            .into_iter()
            .map(|a| a.title)
            .collect(),
        None => Vec::new(),
    };

    let facts = history::aggregate(&check_ins, matched);
    let ctx = context::build(message, matched, &facts, &configured_actions);
    let reply = reply::generate(
        state.groq.as_ref(),
        &ctx,
        matched,
        &facts,
        &configured_actions,
    )
    .await;

    tracing::debug!(
        user_id = %auth_user.id,
        matched = matched.map(|e| e.name.as_str()),
        source = ?reply.source,
        "Assistant reply generated"
    );

    Ok(Json(AssistantMessageResponse {
        response: reply.text,
        source: reply.source,
    }))
}
