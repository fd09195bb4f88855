use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::extractor::AuthedUser;
use crate::errors::AppError;
use crate::ingest::pipeline::parse_resume;
use crate::ingest::store::PgResumeStore;
use crate::models::resume::ResumeRow;
use crate::resumes::storage::save_upload;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

fn clamp_page(page: &Pagination) -> (i64, i64) {
    let skip = page.skip.unwrap_or(0).max(0);
    let limit = page.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (skip, limit)
}

#[derive(Debug, Serialize)]
pub struct ResumeOut {
    pub id: i64,
    pub filename: String,
    pub parsed: bool,
    pub skills: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeOut {
    fn from(row: ResumeRow) -> Self {
        ResumeOut {
            id: row.id,
            filename: row.filename,
            parsed: row.parsed,
            skills: row.skills,
            created_at: row.created_at,
        }
    }
}

/// POST /resumes/
///
/// Stores the file, inserts the placeholder row, and responds immediately;
/// parsing runs in a spawned background unit the response never waits on.
/// Clients poll `parsed` on the list endpoint to observe completion.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeOut>, AppError> {
    let (filename, data) = read_file_field(&mut multipart).await?;

    let (stored_name, path) = save_upload(&state.config.storage_dir, &filename, data).await?;

    let resume: ResumeRow = sqlx::query_as(
        "INSERT INTO resumes (user_id, filename, parsed) VALUES ($1, $2, FALSE) RETURNING *",
    )
    .bind(user.id)
    .bind(&stored_name)
    .fetch_one(&state.db)
    .await?;

    // The store owns a cloned pool handle, so the unit's queries run on
    // their own connections after this request's scope is gone.
    let store = PgResumeStore::new(state.db.clone());
    let resume_id = resume.id;
    tokio::spawn(async move {
        parse_resume(&store, resume_id, &path).await;
    });

    Ok(Json(resume.into()))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::Validation("Filename required".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        return Ok((filename, data));
    }

    Err(AppError::Validation(
        "Multipart field 'file' required".to_string(),
    ))
}

/// GET /resumes/
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthedUser,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ResumeOut>>, AppError> {
    let (skip, limit) = clamp_page(&page);

    let rows: Vec<ResumeRow> = sqlx::query_as(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY id DESC OFFSET $2 LIMIT $3",
    )
    .bind(user.id)
    .bind(skip)
    .bind(limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// DELETE /resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(resume_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }

    Ok(Json(json!({ "ok": true })))
}
