use sqlx::PgPool;

use crate::auth::jwt::JwtService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt: JwtService,
    pub config: Config,
}
