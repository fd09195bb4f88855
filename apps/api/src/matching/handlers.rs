use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::auth::extractor::AuthedUser;
use crate::errors::AppError;
use crate::matching::scorer::score_match;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

/// Ephemeral match result, computed fresh per request and never persisted.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub score: f64,
}

/// GET /matching/resume/:resume_id/job/:job_id
///
/// An unparsed resume scores with empty text and skills, which degrades the
/// score instead of erroring.
pub async fn handle_match_score(
    State(state): State<AppState>,
    user: AuthedUser,
    Path((resume_id, job_id)): Path<(i64, i64)>,
) -> Result<Json<MatchResponse>, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let resume =
        resume.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let score = score_match(
        resume.content_text.as_deref().unwrap_or(""),
        resume.skills.as_deref().unwrap_or(&[]),
        &job.description,
        job.skills.as_deref().unwrap_or(&[]),
    );

    Ok(Json(MatchResponse { score }))
}
