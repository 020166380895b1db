use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use bowl_picks_app::ports::authentication::CallerRole;

use crate::{AppState, ServiceError};

/// Role of the caller, resolved from the bearer token.
pub struct Auth(pub CallerRole);

impl Auth {
    pub fn require_admin(&self) -> Result<(), ServiceError> {
        match self.0 {
            CallerRole::Admin => Ok(()),
            CallerRole::Participant => Err(ServiceError::Forbidden(
                "Admin access required".to_string(),
            )),
        }
    }

    pub fn require_participant(&self) -> Result<(), ServiceError> {
        match self.0 {
            CallerRole::Participant => Ok(()),
            CallerRole::Admin => Err(ServiceError::Forbidden(
                "Picks are submitted with the pool password".to_string(),
            )),
        }
    }
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ServiceError::Unauthorized("Missing bearer token".to_string()))?;

        match app.auth.resolve_role(bearer.token()) {
            Some(role) => Ok(Auth(role)),
            None => {
                log::debug!("Rejected request with unknown token");
                Err(ServiceError::Unauthorized(
                    "Authentication failed".to_string(),
                ))
            }
        }
    }
}
