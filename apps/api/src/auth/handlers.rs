use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthedUser;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserOut {
    fn from(row: UserRow) -> Self {
        UserOut {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenOut {
    pub access_token: String,
    pub token_type: String,
    pub expires_in_minutes: i64,
}

/// POST /auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<UserOut>, AppError> {
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let existing: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let password_hash = hash_password(&req.password)?;
    let user: UserRow = sqlx::query_as(
        "INSERT INTO users (email, password_hash, full_name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.full_name)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user.into()))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenOut>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    // One rejection path for unknown email and bad password
    let user = user
        .filter(|u| verify_password(&req.password, &u.password_hash))
        .ok_or(AppError::Unauthorized)?;

    let expires_in_minutes = state.config.access_token_expire_minutes;
    let access_token = state.jwt.create_token(user.id, expires_in_minutes)?;

    Ok(Json(TokenOut {
        access_token,
        token_type: "bearer".to_string(),
        expires_in_minutes,
    }))
}

/// GET /auth/me
pub async fn handle_me(user: AuthedUser) -> Json<UserOut> {
    Json(UserOut {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        created_at: user.created_at,
    })
}
