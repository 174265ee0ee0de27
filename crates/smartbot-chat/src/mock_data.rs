//! Demo fixtures: two past sessions and their feedback.

use chrono::{DateTime, Duration, Utc};

use smartbot_core::types::{ChatSession, FeedbackEntry, FeedbackKind};

fn fixture_session(
    id: &str,
    started: DateTime<Utc>,
    ended: DateTime<Utc>,
    message_count: u64,
    topics: &[&str],
) -> ChatSession {
    ChatSession {
        id: id.to_string(),
        created_at: started,
        updated_at: ended,
        message_count,
        title: ChatSession::DEFAULT_TITLE.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
    }
}

/// Past sessions, timed relative to `now`.
pub fn sessions(now: DateTime<Utc>) -> Vec<ChatSession> {
    vec![
        fixture_session(
            "session_1",
            now - Duration::milliseconds(86_400_000),
            now - Duration::milliseconds(86_300_000),
            12,
            &["JavaScript", "Web Development", "Career Advice"],
        ),
        fixture_session(
            "session_2",
            now - Duration::milliseconds(43_200_000),
            now - Duration::milliseconds(43_000_000),
            8,
            &["Python", "Machine Learning", "Study Tips"],
        ),
    ]
}

/// Feedback left on the fixture sessions.
pub fn feedback(now: DateTime<Utc>) -> Vec<FeedbackEntry> {
    vec![
        FeedbackEntry {
            id: "feedback_1".to_string(),
            session_id: "session_1".to_string(),
            message_id: "msg_1".to_string(),
            kind: FeedbackKind::Positive,
            timestamp: now - Duration::milliseconds(86_400_000),
            comment: Some("Very helpful response!".to_string()),
        },
        FeedbackEntry {
            id: "feedback_2".to_string(),
            session_id: "session_2".to_string(),
            message_id: "msg_2".to_string(),
            kind: FeedbackKind::Negative,
            timestamp: now - Duration::milliseconds(43_200_000),
            comment: Some("Could be more detailed".to_string()),
        },
    ]
}
