use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;
use crate::summary::request_summary;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default, alias = "jobrole")]
    pub job_role: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /api/generate-summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = request_summary(state.generator.as_ref(), &req.job_role, &req.info).await?;
    Ok(Json(SummaryResponse { summary }))
}
