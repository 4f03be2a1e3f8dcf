/// Request authentication guard
///
/// The guard is a pluggable [`Authorizer`]: given the request headers it
/// either produces an [`AuthContext`] naming the principal, or rejects the
/// request with an [`AuthError`]. The API router runs it in a middleware
/// ahead of every protected route and stores the context in the request
/// extensions, where handlers pick it up with `Extension<AuthContext>`.
///
/// [`JwtAuthorizer`] is the default implementation and accepts
/// `Authorization: Bearer <jwt>` headers signed with the configured secret.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use chrono::Duration;
/// use userhub_shared::auth::jwt::{create_token, Claims};
/// use userhub_shared::auth::middleware::{Authorizer, JwtAuthorizer};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let token = create_token(&Claims::new(1, "a@example.com", Duration::minutes(5)), secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
///
/// let auth = JwtAuthorizer::new(secret).authorize(&headers).await?;
/// assert_eq!(auth.user_id, 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

use super::jwt::{validate_token, JwtError};

/// Authenticated principal, added to request extensions by the guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Id of the authenticated user
    pub user_id: i64,

    /// Email carried in the credential
    pub email: String,
}

/// Error type for the authentication guard
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not a bearer credential
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Credential was rejected
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

/// Decides whether a request may proceed
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Header is not valid ASCII".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("Empty bearer token".to_string()));
    }

    Ok(token)
}

/// Bearer JWT guard
#[derive(Clone)]
pub struct JwtAuthorizer {
    secret: String,
}

impl JwtAuthorizer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for JwtAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthorizer").finish_non_exhaustive()
    }
}

#[async_trait]
impl Authorizer for JwtAuthorizer {
    async fn authorize(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let token = bearer_token(headers)?;
        let claims = validate_token(token, &self.secret)?;

        Ok(AuthContext {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")).unwrap(), "abc.def");

        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidFormat(_))
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer ")),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_jwt_authorizer_accepts_valid_token() {
        let claims = Claims::new(3, "three@example.com", Duration::minutes(5));
        let token = create_token(&claims, SECRET).unwrap();

        let auth = JwtAuthorizer::new(SECRET)
            .authorize(&headers_with(&format!("Bearer {}", token)))
            .await
            .unwrap();

        assert_eq!(
            auth,
            AuthContext {
                user_id: 3,
                email: "three@example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_jwt_authorizer_rejects_expired_token() {
        let claims = Claims::new(3, "three@example.com", Duration::seconds(-3600));
        let token = create_token(&claims, SECRET).unwrap();

        let result = JwtAuthorizer::new(SECRET)
            .authorize(&headers_with(&format!("Bearer {}", token)))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidToken(msg)) if msg == "Token expired"));
    }

    #[tokio::test]
    async fn test_jwt_authorizer_rejects_wrong_secret() {
        let claims = Claims::new(3, "three@example.com", Duration::minutes(5));
        let token = create_token(&claims, "another-secret-key-that-is-32-bytes").unwrap();

        let result = JwtAuthorizer::new(SECRET)
            .authorize(&headers_with(&format!("Bearer {}", token)))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
