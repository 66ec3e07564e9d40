//! # CalmCompass — Request/Response DTOs
//!
//! API contract types for the assistant surface.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - Field-level validation is expressed via `validator` derive macros

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::assistant::reply::ReplySource;

/// POST /api/assistant/message
#[derive(Debug, Deserialize, Validate)]
pub struct AssistantMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
}

/// Response for POST /api/assistant/message
#[derive(Debug, Serialize)]
pub struct AssistantMessageResponse {
    pub response: String,
    /// "external" when the completion service answered, "fallback" when the
    /// rule-based path did. Never reflected in the reply text itself.
    pub source: ReplySource,
}
