use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored resume. `content_text` and `skills` stay NULL and `parsed`
/// stays false until the background parsing unit completes; the transition
/// to parsed happens at most once and never reverses.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub content_text: Option<String>,
    pub skills: Option<Vec<String>>,
    pub parsed: bool,
    pub created_at: DateTime<Utc>,
}
