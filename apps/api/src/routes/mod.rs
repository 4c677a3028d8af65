pub mod health;


use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::summary::handlers as summary;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Accounts
        .route("/createUser", post(auth::handle_create_user))
        .route("/getUser", post(auth::handle_get_user))
        // Resumes
        .route("/createResume/:owner_id", post(resume::handle_create_resume))
        .route(
            "/updateResume/:owner_id/:resume_id",
            post(resume::handle_update_resume),
        )
        .route("/fetchResumes/:owner_id", get(resume::handle_fetch_resumes))
        .route(
            "/fetchResume/:owner_id/:resume_id",
            get(resume::handle_fetch_resume),
        )
        .route(
            "/deleteResume/:owner_id/:resume_id",
            delete(resume::handle_delete_resume),
        )
        // Summary
        .route("/generate-summary", post(summary::handle_generate_summary))
        // Rendering
        .route(
            "/previewResume/:owner_id/:resume_id",
            get(render::handle_preview_resume),
        )
        .route(
            "/exportResume/:owner_id/:resume_id",
            get(render::handle_export_resume),
        )
        .route("/draft/apply", post(render::handle_draft_apply))
        .route("/draft/export", post(render::handle_draft_export))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}
