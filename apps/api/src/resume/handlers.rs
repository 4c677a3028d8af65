use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthOwner;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::resume::StoredResume;
use crate::resume::input::ResumeInput;
use crate::resume::validation::{validate, Mode};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub message: &'static str,
    pub resume: StoredResume,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub(crate) fn resume_not_found() -> AppError {
    AppError::NotFound("Resume not found.".to_string())
}

/// POST /api/createResume/:owner_id
pub async fn handle_create_resume(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath(owner_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ResumeInput>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    auth.ensure_owner(owner_id)?;
    validate(&input, Mode::Create)?;

    state
        .store
        .find_owner(owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    let resume = state
        .store
        .append_resume(owner_id, &input.into_resume())
        .await?;

    info!(%owner_id, resume_id = %resume.id, "Resume created");
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse {
            message: "Resume created successfully",
            resume,
        }),
    ))
}

/// POST /api/updateResume/:owner_id/:resume_id
///
/// Only the keys present in the body are validated and replaced.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath((owner_id, resume_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(input): ApiJson<ResumeInput>,
) -> Result<Json<ResumeResponse>, AppError> {
    auth.ensure_owner(owner_id)?;
    validate(&input, Mode::Update)?;

    let mut document = state
        .store
        .get_resume(owner_id, resume_id)
        .await?
        .ok_or_else(resume_not_found)?
        .resume;
    input.apply_to(&mut document);

    let resume = state
        .store
        .replace_resume(owner_id, resume_id, &document)
        .await?
        .ok_or_else(resume_not_found)?;

    info!(%owner_id, %resume_id, "Resume updated");
    Ok(Json(ResumeResponse {
        message: "Resume updated successfully",
        resume,
    }))
}

/// GET /api/fetchResumes/:owner_id
pub async fn handle_fetch_resumes(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath(owner_id): ApiPath<Uuid>,
) -> Result<Json<Vec<StoredResume>>, AppError> {
    auth.ensure_owner(owner_id)?;
    state
        .store
        .find_owner(owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(state.store.list_resumes(owner_id).await?))
}

/// GET /api/fetchResume/:owner_id/:resume_id
pub async fn handle_fetch_resume(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath((owner_id, resume_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<StoredResume>, AppError> {
    auth.ensure_owner(owner_id)?;
    let resume = state
        .store
        .get_resume(owner_id, resume_id)
        .await?
        .ok_or_else(resume_not_found)?;
    Ok(Json(resume))
}

/// DELETE /api/deleteResume/:owner_id/:resume_id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath((owner_id, resume_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    auth.ensure_owner(owner_id)?;
    if !state.store.remove_resume(owner_id, resume_id).await? {
        return Err(resume_not_found());
    }
    info!(%owner_id, %resume_id, "Resume deleted");
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully",
    }))
}
