use crate::models::emotion::Emotion;

/// Finds the first of the user's emotions whose name appears, case-
/// insensitively, as a substring of the message.
///
/// Only the user's own emotions are candidates — there is no generic
/// synonym list, since that could assert feelings not present in the
/// user's data. First match in the supplied order wins; the store returns
/// emotions alphabetically, which makes the result deterministic.
pub fn match_emotion<'a>(message: &str, known: &'a [Emotion]) -> Option<&'a Emotion> {
    let message = message.to_lowercase();
    known
        .iter()
        .find(|emotion| message.contains(&emotion.name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_matches_case_insensitive_substring() {
        let known = vec![emotion("Anxious"), emotion("Happy")];
        let found = match_emotion("I'm feeling ANXIOUS today", &known).unwrap();
        assert_eq!(found.name, "Anxious");
    }

    #[test]
    fn test_no_match_returns_none() {
        let known = vec![emotion("Calm")];
        assert!(match_emotion("just checking in", &known).is_none());
    }

    #[test]
    fn test_never_returns_emotion_outside_known_set() {
        // "happy" is a common feeling word, but the user never defined it.
        let known = vec![emotion("Anxious")];
        assert!(match_emotion("I'm so happy right now", &known).is_none());
    }

    #[test]
    fn test_no_synonym_fallback() {
        // "joyful" is a synonym for Happy but not a substring match.
        let known = vec![emotion("Happy")];
        assert!(match_emotion("feeling joyful", &known).is_none());
    }

    #[test]
    fn test_first_match_in_supplied_order_wins() {
        let known = vec![emotion("Anxious"), emotion("Happy")];
        let found = match_emotion("anxious but also happy", &known).unwrap();
        assert_eq!(found.name, "Anxious");
    }

    #[test]
    fn test_substring_containment_is_plain() {
        // Containment, not word-boundary: "sadly" contains "sad".
        let known = vec![emotion("Sad")];
        let found = match_emotion("sadly, it rained all day", &known).unwrap();
        assert_eq!(found.name, "Sad");
    }
}
