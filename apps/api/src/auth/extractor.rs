use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

/// The authenticated user for the current request, resolved from the
/// `Authorization: Bearer <token>` header. Routes that take this extractor
/// reject unauthenticated callers with 401.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for AuthedUser {
    fn from(row: UserRow) -> Self {
        AuthedUser {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = extract_bearer_token(header).ok_or(AppError::Unauthorized)?;
        let user_id = state
            .jwt
            .verify_token(token)
            .map_err(|_| AppError::Unauthorized)?;

        let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

        user.map(Into::into).ok_or(AppError::Unauthorized)
    }
}

fn extract_bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}
