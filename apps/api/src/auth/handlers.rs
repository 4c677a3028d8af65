use anyhow::Context;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::{Account, AccountView, NewAccount};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: AccountView,
    pub token: String,
}

fn invalid_credentials() -> AppError {
    AppError::Validation("Invalid credentials.".to_string())
}

fn session(state: &AppState, account: &Account) -> Result<SessionResponse, AppError> {
    let token = state
        .tokens
        .issue_token(account.id)
        .context("failed to issue token")?;
    Ok(SessionResponse {
        user: account.into(),
        token,
    })
}

/// POST /api/createUser
pub async fn handle_create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(invalid_credentials());
    }

    let password_hash = hash_password(req.password, state.config.bcrypt_cost).await?;
    let account = state
        .store
        .create_account(NewAccount {
            name: name.to_string(),
            email,
            password_hash,
        })
        .await?;

    info!(owner_id = %account.id, "Account created");
    Ok((StatusCode::CREATED, Json(session(&state, &account)?)))
}

/// POST /api/getUser
pub async fn handle_get_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LogInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Credentials required.".to_string()));
    }

    let account = state
        .store
        .find_account_by_email(email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(req.password, account.password_hash.clone()).await? {
        return Err(invalid_credentials());
    }

    Ok(Json(session(&state, &account)?))
}
