use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mongodb::{Database, bson::doc};
use serde::{Deserialize, Serialize};

use crate::{
    database::USERS,
    error::AppError,
    models::{Role, User},
    state::AppState,
};

const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// Claims carried by every bearer token this service issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(email: &str, secret: &str) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// A bad or expired signature is a credential problem, not an internal one.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Forbidden)
}

/// Verified claims of the calling user. No `Authorization: Bearer` header
/// rejects with 401, a failed verification with 403.
pub struct AuthClaims(pub Claims);

impl FromRequestParts<Arc<AppState>> for AuthClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        Ok(Self(verify(token, &state.config.jwt_secret)?))
    }
}

pub async fn is_admin(db: &Database, email: &str) -> Result<bool, AppError> {
    let user = db
        .collection::<User>(USERS)
        .find_one(doc! { "email": email })
        .await?;

    Ok(user.is_some_and(|user| user.role == Role::Admin))
}

pub async fn require_admin(db: &Database, email: &str) -> Result<(), AppError> {
    if is_admin(db, email).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_verify_round_trip() {
        let token = issue("ada@example.com", SECRET).unwrap();
        let claims = verify(&token, SECRET).unwrap();

        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_forbidden() {
        let token = issue("ada@example.com", SECRET).unwrap();

        assert!(matches!(
            verify(&token, "other-secret"),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_expired_token_is_forbidden() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: "ada@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(verify(&token, SECRET), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_garbage_token_is_forbidden() {
        assert!(matches!(
            verify("not-a-token", SECRET),
            Err(AppError::Forbidden)
        ));
    }
}
