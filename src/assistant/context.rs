use crate::assistant::history::Facts;
use crate::models::emotion::Emotion;

/// Words that signal the user wants a longer answer.
const DETAIL_KEYWORDS: [&str; 4] = ["more", "detail", "explain", "elaborate"];

/// The prompt handed to the completion service, plus the word bound it was
/// asked to honor. The bound also drives the generation token budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltContext {
    pub prompt: String,
    pub word_limit: u32,
}

pub fn wants_detail(message: &str) -> bool {
    let message = message.to_lowercase();
    DETAIL_KEYWORDS.iter().any(|kw| message.contains(kw))
}

/// Builds the user-turn prompt from the matched emotion (if any), the
/// aggregated facts, and the emotion's configured action titles.
///
/// Every branch constrains the generator to stated facts only; the prompt
/// never asserts emotions or history the user does not have.
pub fn build(
    message: &str,
    matched: Option<&Emotion>,
    facts: &Facts,
    configured_actions: &[String],
) -> BuiltContext {
    let detailed = wants_detail(message);

    match (matched, facts) {
        (Some(emotion), Facts::ForEmotion(f)) if f.count > 0 => {
            let word_limit = if detailed { 150 } else { 60 };
            let mut prompt = format!(
                "The user said they're feeling \"{}\" today. \
                 They have felt {} on these dates before: {}. ",
                emotion.name,
                emotion.name,
                f.recent_dates.join(", ")
            );
            if !f.recent_notes.is_empty() {
                prompt.push_str(&format!(
                    "Their previous notes when feeling this way: {}. ",
                    f.recent_notes.join(" | ")
                ));
            }
            if !configured_actions.is_empty() {
                prompt.push_str(&format!(
                    "Actions they have set up for this emotion: {}. ",
                    configured_actions.join(", ")
                ));
            }
            if !f.completed_actions.is_empty() {
                prompt.push_str(&format!(
                    "Actions they tried before that helped: {}. ",
                    f.completed_actions.join(", ")
                ));
            }
            prompt.push_str(&format!(
                "Generate a warm, supportive response that: 1) Acknowledges their feeling, \
                 2) Mentions the dates when they felt this way before, \
                 3) Suggests the actions they have set up, \
                 4) References what helped them in the past, \
                 5) Encourages them. \
                 Keep it conversational and personal, under {} words. \
                 Only mention facts from their check-in history - do not make assumptions \
                 or suggestions beyond what is explicitly in their data.",
                word_limit
            ));
            BuiltContext { prompt, word_limit }
        }
        (Some(emotion), _) => {
            let word_limit = if detailed { 100 } else { 50 };
            let mut prompt = format!(
                "The user said they're feeling \"{}\" today. \
                 This is the first time they've checked in with this emotion recently. ",
                emotion.name
            );
            if !configured_actions.is_empty() {
                prompt.push_str(&format!(
                    "They have these actions set up for it: {} - suggest trying them. ",
                    configured_actions.join(", ")
                ));
            }
            prompt.push_str(&format!(
                "Provide a warm, supportive response acknowledging their feeling and \
                 encouraging them. Keep it under {} words. \
                 Be concise and only mention what is factually known.",
                word_limit
            ));
            BuiltContext { prompt, word_limit }
        }
        (None, Facts::Overall(f)) if f.count > 0 => {
            let word_limit = if detailed { 100 } else { 50 };
            let mut prompt = format!("User message: \"{}\". ", message);
            if let Some((name, count)) = f.mode_emotion.as_ref().filter(|(_, c)| *c >= 3) {
                prompt.push_str(&format!(
                    "They've been feeling \"{}\" frequently ({} times recently). ",
                    name, count
                ));
            }
            prompt.push_str(&format!(
                "Generate a helpful, supportive response. Keep it conversational and \
                 under {} words. Be concise and fact-based.",
                word_limit
            ));
            BuiltContext { prompt, word_limit }
        }
        (None, _) => {
            let word_limit = 50;
            let prompt = format!(
                "User message: \"{}\". This user has no check-in history yet. \
                 Welcome them and encourage them to start tracking their emotions. \
                 Do not assume any prior emotions or check-ins. \
                 Keep it friendly and under {} words. Be concise.",
                message, word_limit
            );
            BuiltContext { prompt, word_limit }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::history::{EmotionFacts, OverallFacts};
    use chrono::Utc;
    use uuid::Uuid;

    fn emotion(name: &str) -> Emotion {
        Emotion {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    fn recurring_facts() -> Facts {
        Facts::ForEmotion(EmotionFacts {
            count: 2,
            recent_dates: vec!["June 3".into(), "June 1".into()],
            recent_notes: vec!["slept badly".into()],
            completed_actions: vec!["Go for a walk".into()],
        })
    }

    // ── branch selection ─────────────────────────────────────────────────

    #[test]
    fn test_recurring_branch_cites_dates_notes_and_actions() {
        let anxious = emotion("Anxious");
        let configured = vec!["Take 5 deep breaths".to_string()];
        let ctx = build("feeling anxious", Some(&anxious), &recurring_facts(), &configured);
        assert!(ctx.prompt.contains("June 3, June 1"));
        assert!(ctx.prompt.contains("slept badly"));
        assert!(ctx.prompt.contains("Take 5 deep breaths"));
        assert!(ctx.prompt.contains("Go for a walk"));
        assert!(ctx.prompt.contains("Only mention facts"));
        assert_eq!(ctx.word_limit, 60);
    }

    #[test]
    fn test_first_check_in_branch_suggests_configured_actions() {
        let anxious = emotion("Anxious");
        let facts = Facts::ForEmotion(EmotionFacts::default());
        let configured = vec!["Take 5 deep breaths".to_string()];
        let ctx = build("feeling anxious", Some(&anxious), &facts, &configured);
        assert!(ctx.prompt.contains("first time"));
        assert!(ctx.prompt.contains("Take 5 deep breaths"));
        assert_eq!(ctx.word_limit, 50);
    }

    #[test]
    fn test_no_match_with_history_mentions_mode_only_when_frequent() {
        let below = Facts::Overall(OverallFacts {
            count: 4,
            mode_emotion: Some(("Sad".into(), 2)),
        });
        let ctx = build("hello there", None, &below, &[]);
        assert!(!ctx.prompt.contains("Sad"));

        let frequent = Facts::Overall(OverallFacts {
            count: 5,
            mode_emotion: Some(("Sad".into(), 3)),
        });
        let ctx = build("hello there", None, &frequent, &[]);
        assert!(ctx.prompt.contains("\"Sad\" frequently (3 times recently)"));
    }

    #[test]
    fn test_new_user_branch_claims_no_emotions() {
        let facts = Facts::Overall(OverallFacts::default());
        let ctx = build("just checking in", None, &facts, &[]);
        assert!(ctx.prompt.contains("no check-in history"));
        assert!(ctx.prompt.contains("Do not assume"));
        assert_eq!(ctx.word_limit, 50);
    }

    // ── word-limit selection ─────────────────────────────────────────────

    #[test]
    fn test_detail_keywords_select_larger_limit() {
        let anxious = emotion("Anxious");
        for msg in [
            "tell me more about feeling anxious",
            "anxious - can you give detail",
            "explain why I feel anxious",
            "please ELABORATE, I'm anxious",
        ] {
            let ctx = build(msg, Some(&anxious), &recurring_facts(), &[]);
            assert_eq!(ctx.word_limit, 150, "message: {msg}");
        }
    }

    #[test]
    fn test_absence_of_detail_keywords_selects_smaller_limit() {
        let anxious = emotion("Anxious");
        let ctx = build("feeling anxious today", Some(&anxious), &recurring_facts(), &[]);
        assert_eq!(ctx.word_limit, 60);

        let facts = Facts::ForEmotion(EmotionFacts::default());
        let ctx = build("feeling anxious today", Some(&anxious), &facts, &[]);
        assert_eq!(ctx.word_limit, 50);
    }

    #[test]
    fn test_first_check_in_detailed_limit() {
        let anxious = emotion("Anxious");
        let facts = Facts::ForEmotion(EmotionFacts::default());
        let ctx = build("can you explain more, anxious", Some(&anxious), &facts, &[]);
        assert_eq!(ctx.word_limit, 100);
    }

    #[test]
    fn test_wants_detail_is_case_insensitive() {
        assert!(wants_detail("MORE please"));
        assert!(wants_detail("in Detail"));
        assert!(!wants_detail("how are you"));
    }
}
