use async_trait::async_trait;
use sqlx::PgPool;

/// Persistence seam for the background parsing unit. The production
/// implementation is Postgres-backed; tests substitute an in-memory store.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Writes extracted text and skills and flips `parsed` in one update.
    /// Returns `false` when the resume row no longer exists.
    async fn complete_parse(
        &self,
        resume_id: i64,
        content_text: &str,
        skills: &[String],
    ) -> anyhow::Result<bool>;
}

/// sqlx-backed store. Owns a pool handle of its own, so every query checks
/// out a connection independent of any request-scoped work.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn complete_parse(
        &self,
        resume_id: i64,
        content_text: &str,
        skills: &[String],
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE resumes SET content_text = $1, skills = $2, parsed = TRUE WHERE id = $3",
        )
        .bind(content_text)
        .bind(skills.to_vec())
        .bind(resume_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
