use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The account id carried by a verified `Authorization: Bearer` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOwner(pub Uuid);

impl AuthOwner {
    /// Rejects requests whose path names an owner other than the token subject.
    pub fn ensure_owner(&self, owner_id: Uuid) -> Result<(), AppError> {
        if self.0 == owner_id {
            Ok(())
        } else {
            warn!(token_owner = %self.0, path_owner = %owner_id, "owner mismatch");
            Err(AppError::Unauthorized)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let claims = state.tokens.verify_token(token).map_err(|e| {
            warn!("Rejected bearer token: {e}");
            AppError::Unauthorized
        })?;

        Ok(AuthOwner(claims.sub))
    }
}
