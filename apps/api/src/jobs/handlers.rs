use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthedUser;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub description: String,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct JobOut {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub skills: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for JobOut {
    fn from(row: JobRow) -> Self {
        JobOut {
            id: row.id,
            title: row.title,
            description: row.description,
            skills: row.skills,
            created_at: row.created_at,
        }
    }
}

/// POST /jobs/
pub async fn handle_create_job(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(req): Json<JobCreate>,
) -> Result<Json<JobOut>, AppError> {
    let job: JobRow = sqlx::query_as(
        "INSERT INTO jobs (title, description, skills) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.skills)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(job.into()))
}

/// GET /jobs/
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthedUser,
) -> Result<Json<Vec<JobOut>>, AppError> {
    let jobs: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs ORDER BY id DESC")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(jobs.into_iter().map(Into::into).collect()))
}
