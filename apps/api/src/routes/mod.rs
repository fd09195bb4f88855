pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/signup", post(auth::handle_signup))
        .route("/auth/login", post(auth::handle_login))
        .route("/auth/me", get(auth::handle_me))
        // Jobs
        .route(
            "/jobs/",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        // Resumes
        .route(
            "/resumes/",
            post(resumes::handle_upload_resume).get(resumes::handle_list_resumes),
        )
        .route("/resumes/:id", delete(resumes::handle_delete_resume))
        // Matching
        .route(
            "/matching/resume/:resume_id/job/:job_id",
            get(matching::handle_match_score),
        )
        .with_state(state)
}
