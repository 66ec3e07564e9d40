use chrono::{DateTime, Utc};

use crate::models::check_in::CheckInRecord;
use crate::models::emotion::Emotion;

/// How far back the engine looks when summarizing history.
pub const LOOKBACK_DAYS: i64 = 60;

const MAX_DATES: usize = 3;
const MAX_NOTES: usize = 3;
const MAX_ACTIONS: usize = 5;

/// Facts about the emotion the message referred to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmotionFacts {
    /// Check-ins for this emotion inside the lookback window.
    pub count: usize,
    /// Up to 3 most recent occurrence dates, human-readable ("January 5").
    pub recent_dates: Vec<String>,
    /// Up to 3 most recent non-empty notes, newest first.
    pub recent_notes: Vec<String>,
    /// Distinct completed-action titles, first-seen order, at most 5.
    pub completed_actions: Vec<String>,
}

/// Facts about the whole window when no specific emotion was identified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverallFacts {
    pub count: usize,
    /// Mode emotion name and its frequency. Ties go to the emotion
    /// encountered first in iteration order.
    pub mode_emotion: Option<(String, usize)>,
}

/// Immutable summary of a user's check-in history, computed per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facts {
    ForEmotion(EmotionFacts),
    Overall(OverallFacts),
}

/// Summarizes `check_ins` (already window-filtered and newest-first) either
/// for one emotion or across the whole window.
pub fn aggregate(check_ins: &[CheckInRecord], emotion: Option<&Emotion>) -> Facts {
    match emotion {
        Some(emotion) => Facts::ForEmotion(aggregate_for_emotion(check_ins, emotion)),
        None => Facts::Overall(aggregate_overall(check_ins)),
    }
}

fn aggregate_for_emotion(check_ins: &[CheckInRecord], emotion: &Emotion) -> EmotionFacts {
    let filtered: Vec<&CheckInRecord> = check_ins
        .iter()
        .filter(|ci| ci.emotion_id == emotion.id)
        .collect();

    let recent_dates = filtered
        .iter()
        .take(MAX_DATES)
        .map(|ci| format_date(&ci.created_at))
        .collect();

    let recent_notes = filtered
        .iter()
        .filter_map(|ci| ci.notes.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .take(MAX_NOTES)
        .map(String::from)
        .collect();

    let mut completed_actions: Vec<String> = Vec::new();
    'outer: for ci in &filtered {
        for title in &ci.completed_actions {
            if !completed_actions.contains(title) {
                completed_actions.push(title.clone());
                if completed_actions.len() == MAX_ACTIONS {
                    break 'outer;
                }
            }
        }
    }

    EmotionFacts {
        count: filtered.len(),
        recent_dates,
        recent_notes,
        completed_actions,
    }
}

fn aggregate_overall(check_ins: &[CheckInRecord]) -> OverallFacts {
    // Vec keeps first-encounter order so ties resolve deterministically.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for ci in check_ins {
        match counts.iter_mut().find(|(name, _)| *name == ci.emotion_name) {
            Some((_, n)) => *n += 1,
            None => counts.push((ci.emotion_name.clone(), 1)),
        }
    }

    let mut mode_emotion: Option<(String, usize)> = None;
    for (name, n) in counts {
        let beats = mode_emotion.as_ref().map_or(true, |(_, max)| n > *max);
        if beats {
            mode_emotion = Some((name, n));
        }
    }

    OverallFacts {
        count: check_ins.len(),
        mode_emotion,
    }
}

/// "January 5" style, matching how the rest of the app displays dates.
fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn emotion(name: &str) -> Emotion {
        Emotion {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    fn check_in(
        emotion: &Emotion,
        y: i32,
        m: u32,
        d: u32,
        notes: Option<&str>,
        completed: &[&str],
    ) -> CheckInRecord {
        CheckInRecord {
            id: Uuid::new_v4(),
            emotion_id: emotion.id,
            emotion_name: emotion.name.clone(),
            notes: notes.map(String::from),
            created_at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            completed_actions: completed.iter().map(|s| s.to_string()).collect(),
        }
    }

    // ── per-emotion facts ────────────────────────────────────────────────

    #[test]
    fn test_empty_history_yields_zero_facts() {
        let anxious = emotion("Anxious");
        match aggregate(&[], Some(&anxious)) {
            Facts::ForEmotion(f) => {
                assert_eq!(f.count, 0);
                assert!(f.recent_dates.is_empty());
                assert!(f.recent_notes.is_empty());
                assert!(f.completed_actions.is_empty());
            }
            Facts::Overall(_) => panic!("expected per-emotion facts"),
        }
    }

    #[test]
    fn test_dates_are_human_readable_and_capped_at_three() {
        let sad = emotion("Sad");
        let check_ins = vec![
            check_in(&sad, 2026, 6, 9, None, &[]),
            check_in(&sad, 2026, 6, 5, None, &[]),
            check_in(&sad, 2026, 6, 3, None, &[]),
            check_in(&sad, 2026, 6, 1, None, &[]),
        ];
        match aggregate(&check_ins, Some(&sad)) {
            Facts::ForEmotion(f) => {
                assert_eq!(f.count, 4);
                assert_eq!(f.recent_dates, vec!["June 9", "June 5", "June 3"]);
            }
            Facts::Overall(_) => panic!("expected per-emotion facts"),
        }
    }

    #[test]
    fn test_filters_to_the_given_emotion_only() {
        let sad = emotion("Sad");
        let happy = emotion("Happy");
        let check_ins = vec![
            check_in(&happy, 2026, 6, 9, Some("good day"), &["Go outside"]),
            check_in(&sad, 2026, 6, 5, Some("rough one"), &[]),
        ];
        match aggregate(&check_ins, Some(&sad)) {
            Facts::ForEmotion(f) => {
                assert_eq!(f.count, 1);
                assert_eq!(f.recent_notes, vec!["rough one"]);
                assert!(f.completed_actions.is_empty());
            }
            Facts::Overall(_) => panic!("expected per-emotion facts"),
        }
    }

    #[test]
    fn test_blank_notes_are_skipped() {
        let sad = emotion("Sad");
        let check_ins = vec![
            check_in(&sad, 2026, 6, 9, Some("   "), &[]),
            check_in(&sad, 2026, 6, 5, None, &[]),
            check_in(&sad, 2026, 6, 3, Some("talked to a friend"), &[]),
        ];
        match aggregate(&check_ins, Some(&sad)) {
            Facts::ForEmotion(f) => assert_eq!(f.recent_notes, vec!["talked to a friend"]),
            Facts::Overall(_) => panic!("expected per-emotion facts"),
        }
    }

    #[test]
    fn test_completed_actions_distinct_first_seen_capped_at_five() {
        let anxious = emotion("Anxious");
        let check_ins = vec![
            check_in(&anxious, 2026, 6, 9, None, &["Breathe", "Walk"]),
            check_in(&anxious, 2026, 6, 8, None, &["Walk", "Journal"]),
            check_in(&anxious, 2026, 6, 7, None, &["Music", "Call a friend", "Stretch", "Nap"]),
        ];
        match aggregate(&check_ins, Some(&anxious)) {
            Facts::ForEmotion(f) => {
                assert_eq!(
                    f.completed_actions,
                    vec!["Breathe", "Walk", "Journal", "Music", "Call a friend"]
                );
            }
            Facts::Overall(_) => panic!("expected per-emotion facts"),
        }
    }

    // ── overall facts ────────────────────────────────────────────────────

    #[test]
    fn test_overall_empty_history() {
        match aggregate(&[], None) {
            Facts::Overall(f) => {
                assert_eq!(f.count, 0);
                assert!(f.mode_emotion.is_none());
            }
            Facts::ForEmotion(_) => panic!("expected overall facts"),
        }
    }

    #[test]
    fn test_overall_mode_emotion() {
        let sad = emotion("Sad");
        let happy = emotion("Happy");
        let check_ins = vec![
            check_in(&happy, 2026, 6, 9, None, &[]),
            check_in(&sad, 2026, 6, 8, None, &[]),
            check_in(&sad, 2026, 6, 7, None, &[]),
        ];
        match aggregate(&check_ins, None) {
            Facts::Overall(f) => {
                assert_eq!(f.count, 3);
                assert_eq!(f.mode_emotion, Some(("Sad".into(), 2)));
            }
            Facts::ForEmotion(_) => panic!("expected overall facts"),
        }
    }

    #[test]
    fn test_overall_mode_tie_goes_to_first_encountered() {
        let sad = emotion("Sad");
        let happy = emotion("Happy");
        let check_ins = vec![
            check_in(&happy, 2026, 6, 9, None, &[]),
            check_in(&sad, 2026, 6, 8, None, &[]),
            check_in(&happy, 2026, 6, 7, None, &[]),
            check_in(&sad, 2026, 6, 6, None, &[]),
        ];
        match aggregate(&check_ins, None) {
            Facts::Overall(f) => assert_eq!(f.mode_emotion, Some(("Happy".into(), 2))),
            Facts::ForEmotion(_) => panic!("expected overall facts"),
        }
    }
}
