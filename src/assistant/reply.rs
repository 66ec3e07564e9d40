use serde::Serialize;

use crate::assistant::context::BuiltContext;
use crate::assistant::groq::GroqClient;
use crate::assistant::history::{EmotionFacts, Facts};
use crate::models::emotion::Emotion;

/// Where the reply text came from. Exposed only as response metadata;
/// the reply text itself never reveals the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    External,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Coarse sentiment bucket for an emotion name, used to pick the fallback
/// opener. A closed enum so adding a bucket is a one-line change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

pub fn classify(emotion_name: &str) -> Sentiment {
    let name = emotion_name.to_lowercase();
    if ["happy", "joy", "good"].iter().any(|kw| name.contains(kw)) {
        Sentiment::Positive
    } else if ["sad", "down"].iter().any(|kw| name.contains(kw)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Produces the assistant reply: the Groq call when a client is configured,
/// the rule-based synthesis otherwise or on any call failure. Users never
/// see an error where a supportive reply was expected.
pub async fn generate(
    groq: Option<&GroqClient>,
    ctx: &BuiltContext,
    matched: Option<&Emotion>,
    facts: &Facts,
    configured_actions: &[String],
) -> Reply {
    if let Some(client) = groq {
        match client.complete(&ctx.prompt, ctx.word_limit).await {
            Ok(text) => {
                return Reply {
                    text,
                    source: ReplySource::External,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Completion service unavailable, using rule-based fallback");
            }
        }
    }

    Reply {
        text: fallback_reply(matched, facts, configured_actions),
        source: ReplySource::Fallback,
    }
}

/// Deterministic reply synthesis from aggregated facts alone. Pure: the
/// same inputs always produce the same text.
pub fn fallback_reply(
    matched: Option<&Emotion>,
    facts: &Facts,
    configured_actions: &[String],
) -> String {
    let (emotion, facts) = match (matched, facts) {
        (Some(emotion), Facts::ForEmotion(f)) => (emotion, f),
        _ => {
            return "I'm here to help! Try mentioning how you're feeling (like 'I'm feeling \
                    happy' or 'I'm feeling sad') and I can provide personalized suggestions \
                    based on your past check-ins."
                .into()
        }
    };

    if facts.count == 0 {
        return first_check_in_reply(&emotion.name, configured_actions);
    }

    recurring_reply(&emotion.name, facts, configured_actions)
}

fn first_check_in_reply(name: &str, configured: &[String]) -> String {
    let mut out = format!(
        "I see you're feeling {} today. This is the first time you've checked in with \
         this emotion recently.",
        name
    );
    if configured.is_empty() {
        out.push_str(
            " Consider trying some of the actions you've set up for this emotion - \
             they can really help!",
        );
    } else {
        out.push_str(&format!(
            " Consider trying {} - they can really help!",
            join_titles(configured)
        ));
    }
    out
}

fn recurring_reply(name: &str, facts: &EmotionFacts, configured: &[String]) -> String {
    let completed: Vec<String> = facts.completed_actions.iter().take(3).cloned().collect();

    let mut out = match classify(name) {
        Sentiment::Positive => format!("Great to hear you're feeling {} today! ", name),
        Sentiment::Negative => format!("I understand you're feeling {} today. ", name),
        Sentiment::Neutral => format!("I see you're feeling {} today. ", name),
    };

    if facts.count > 1 {
        out.push_str(&format!(
            "You felt {} on {} too. ",
            name,
            facts.recent_dates.join(", ")
        ));
    }

    match classify(name) {
        Sentiment::Positive => {
            out.push_str("Keep doing what makes you happy!");
        }
        Sentiment::Negative => {
            if completed.is_empty() {
                out.push_str("Remember that it's okay to feel this way.");
            } else {
                out.push_str(&format!(
                    "On those days, you tried {} and felt better afterwards. Would you \
                     like to try those actions again?",
                    completed.join(", ")
                ));
            }
            // Configured actions take priority as the forward-looking suggestion.
            if !configured.is_empty() {
                out.push_str(&format!(
                    " Your action list for this emotion includes {} - those are a good \
                     place to start.",
                    join_titles(configured)
                ));
            } else if completed.is_empty() {
                out.push_str(" Consider trying some of the actions you've set up for this emotion.");
            }
        }
        Sentiment::Neutral => {
            if !configured.is_empty() {
                out.push_str(&format!(
                    "Consider trying {} from your action list.",
                    join_titles(configured)
                ));
            } else if !completed.is_empty() {
                out.push_str(&format!(
                    "You tried {} on those days. Those might be helpful now as well.",
                    completed.join(", ")
                ));
            } else {
                out.push_str("Consider trying some of the actions you've set up for this emotion.");
            }
        }
    }

    out
}

fn join_titles(titles: &[String]) -> String {
    titles
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
