//! Bearer token authentication.

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tubely_models::UserId;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Issuer of access tokens.
pub const TOKEN_ISSUER: &str = "tubely-access";

/// Decoded access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// HS256 token signer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return the user it was issued to.
    pub fn verify(&self, token: &str) -> ApiResult<UserId> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!("Token verification failed: {}", e);
            ApiError::unauthorized("Couldn't validate JWT")
        })?;

        data.claims
            .sub
            .parse()
            .map_err(|_| ApiError::unauthorized("Invalid token subject"))
    }

    /// Issue a token for a user.
    pub fn issue(&self, user_id: &UserId, ttl: Duration) -> ApiResult<String> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))
    }
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Couldn't find JWT"))?;

        let user_id = state.auth.verify(bearer.token())?;
        Ok(AuthUser { user_id })
    }
}
