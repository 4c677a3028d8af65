use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthOwner;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::resume::Resume;
use crate::render::preview::PreviewView;
use crate::render::{export_pdf, render_preview, DateLocale, EXPORT_FILENAME};
use crate::resume::editor::{apply_action, DraftAction};
use crate::resume::handlers::resume_not_found;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    fn resolve(&self, fallback: DateLocale) -> Result<DateLocale, AppError> {
        resolve_locale(self.locale.as_deref(), fallback)
    }
}

fn resolve_locale(tag: Option<&str>, fallback: DateLocale) -> Result<DateLocale, AppError> {
    match tag.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => tag
            .parse()
            .map_err(|_| AppError::Validation(format!("Unsupported locale '{tag}'."))),
        None => Ok(fallback),
    }
}

fn pdf_response(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response()
}

async fn stored_document(
    state: &AppState,
    owner_id: Uuid,
    resume_id: Uuid,
) -> Result<Resume, AppError> {
    Ok(state
        .store
        .get_resume(owner_id, resume_id)
        .await?
        .ok_or_else(resume_not_found)?
        .resume)
}

/// GET /api/previewResume/:owner_id/:resume_id
pub async fn handle_preview_resume(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath((owner_id, resume_id)): ApiPath<(Uuid, Uuid)>,
    ApiQuery(query): ApiQuery<LocaleQuery>,
) -> Result<Json<PreviewView>, AppError> {
    auth.ensure_owner(owner_id)?;
    let locale = query.resolve(state.config.default_locale)?;
    let document = stored_document(&state, owner_id, resume_id).await?;
    Ok(Json(render_preview(&document, locale)))
}

/// GET /api/exportResume/:owner_id/:resume_id
pub async fn handle_export_resume(
    State(state): State<AppState>,
    auth: AuthOwner,
    ApiPath((owner_id, resume_id)): ApiPath<(Uuid, Uuid)>,
    ApiQuery(query): ApiQuery<LocaleQuery>,
) -> Result<Response, AppError> {
    auth.ensure_owner(owner_id)?;
    let locale = query.resolve(state.config.default_locale)?;
    let document = stored_document(&state, owner_id, resume_id).await?;
    let bytes = export_pdf(state.pdf.as_ref(), &document, locale).await?;
    info!(%owner_id, %resume_id, size = bytes.len(), "Resume exported");
    Ok(pdf_response(bytes))
}

#[derive(Debug, Deserialize)]
pub struct DraftApplyRequest {
    #[serde(default)]
    pub document: Resume,
    pub action: DraftAction,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftApplyResponse {
    pub document: Resume,
    /// Set when the action was refused; `document` is then unchanged.
    pub warning: Option<String>,
    pub preview: PreviewView,
}

/// POST /api/draft/apply
///
/// Applies one editor action to an unsaved document and re-renders its preview.
pub async fn handle_draft_apply(
    State(state): State<AppState>,
    _auth: AuthOwner,
    ApiJson(req): ApiJson<DraftApplyRequest>,
) -> Result<Json<DraftApplyResponse>, AppError> {
    let locale = resolve_locale(req.locale.as_deref(), state.config.default_locale)?;
    let mut document = req.document;
    let warning = apply_action(&mut document, req.action)
        .err()
        .map(|w| w.to_string());
    let preview = render_preview(&document, locale);
    Ok(Json(DraftApplyResponse {
        document,
        warning,
        preview,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DraftExportRequest {
    #[serde(default)]
    pub document: Resume,
    #[serde(default)]
    pub locale: Option<String>,
}

/// POST /api/draft/export
pub async fn handle_draft_export(
    State(state): State<AppState>,
    _auth: AuthOwner,
    ApiJson(req): ApiJson<DraftExportRequest>,
) -> Result<Response, AppError> {
    let locale = resolve_locale(req.locale.as_deref(), state.config.default_locale)?;
    let bytes = export_pdf(state.pdf.as_ref(), &req.document, locale).await?;
    Ok(pdf_response(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_locale_falls_back() {
        assert_eq!(resolve_locale(None, DateLocale::De).unwrap(), DateLocale::De);
        assert_eq!(
            resolve_locale(Some("  "), DateLocale::EnGb).unwrap(),
            DateLocale::EnGb
        );
    }

    #[test]
    fn test_explicit_locale_wins() {
        assert_eq!(
            resolve_locale(Some("iso"), DateLocale::EnUs).unwrap(),
            DateLocale::Iso
        );
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(matches!(
            resolve_locale(Some("klingon"), DateLocale::EnUs),
            Err(AppError::Validation(_))
        ));
    }
}
