use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub skills: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}
