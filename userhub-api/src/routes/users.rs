/// User collection endpoints
///
/// Every route here sits behind the authentication guard and only ever sees
/// active users. A deactivated user answers exactly like one that never
/// existed.
///
/// # Endpoints
///
/// - `GET    /users?skip=&limit=` - List active users (also `/users/`)
/// - `GET    /users/:user_id`     - Get one active user
/// - `PUT    /users/:user_id`     - Overwrite `full_name` and `phone`
/// - `DELETE /users/:user_id`     - Deactivate (soft delete)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use userhub_shared::{
    auth::middleware::AuthContext,
    models::user::{UserPatch, UserView},
};
use validator::Validate;

/// Page size used when `limit` is not given, also the largest allowed
pub const MAX_PAGE_SIZE: i64 = 10;

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

/// Pagination query for the list endpoint
///
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    /// Number of active users to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "skip must be greater than or equal to 0"))]
    pub skip: i64,

    /// Maximum number of users to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 10, message = "limit must be between 1 and 10"))]
    pub limit: i64,
}

/// Update request body
///
/// Clients may send the full user view. `id`, `email` and `is_active` are
/// type-checked and validated but never written; only `full_name` and
/// `phone` reach the store. A missing or `null` writable field clears the
/// stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    #[validate(length(max = 255, message = "full_name must be at most 255 characters"))]
    pub full_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            full_name: req.full_name,
            phone: req.phone,
        }
    }
}

/// Confirmation returned after a deactivation
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List active users
///
/// # Endpoint
///
/// ```text
/// GET /users?skip=10&limit=10
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `422 Unprocessable Entity`: `skip < 0`, `limit` outside 1..=10, or non-integer values
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> ApiResult<Json<Vec<UserView>>> {
    query.validate()?;

    let users = state.users.list_active(query.skip, query.limit).await?;

    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// Get a single active user
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No active user with this id
/// - `422 Unprocessable Entity`: Non-integer id
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<UserView>> {
    let user = state
        .users
        .find_active_by_id(user_id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(Json(user.into()))
}

/// Overwrite the profile fields of an active user
///
/// # Endpoint
///
/// ```text
/// PUT /users/3
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "full_name": "Jane", "phone": "555" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No active user with this id
/// - `422 Unprocessable Entity`: Malformed body or id
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<UserView>> {
    req.validate()?;

    let patch = UserPatch::from(req);
    let user = state
        .users
        .update_profile(user_id, &patch)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    info!(user_id, actor = auth.user_id, "User profile updated");
    Ok(Json(user.into()))
}

/// Deactivate an active user
///
/// Irreversible through the API: the user disappears from every endpoint
/// and a second call answers 404.
///
/// # Response
///
/// ```json
/// { "message": "User jane@example.com deactivated successfully" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No active user with this id
pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let user = state
        .users
        .deactivate(user_id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    info!(user_id, actor = auth.user_id, "User deactivated");
    Ok(Json(MessageResponse {
        message: format!("User {} deactivated successfully", user.email),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(skip: i64, limit: i64) -> ListUsersQuery {
        ListUsersQuery { skip, limit }
    }

    #[test]
    fn test_query_bounds() {
        assert!(query(0, 1).validate().is_ok());
        assert!(query(100, 10).validate().is_ok());

        assert!(query(0, 0).validate().is_err());
        assert!(query(0, 11).validate().is_err());
        assert!(query(-1, 10).validate().is_err());
    }

    #[test]
    fn test_query_defaults() {
        let parsed: ListUsersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.skip, 0);
        assert_eq!(parsed.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_update_request_keeps_only_writable_fields() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"id": 3, "email": "x@example.com", "is_active": false, "full_name": "Jane", "phone": "555"}"#,
        )
        .unwrap();

        assert_eq!(
            UserPatch::from(req),
            UserPatch {
                full_name: Some("Jane".to_string()),
                phone: Some("555".to_string()),
            }
        );
    }

    #[test]
    fn test_update_request_length_limits() {
        let req = UpdateUserRequest {
            id: None,
            email: None,
            is_active: None,
            full_name: Some("x".repeat(256)),
            phone: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_validates_read_only_fields() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"email": "not-an-email", "full_name": "A"}"#).unwrap();
        assert!(req.validate().is_err());

        assert!(serde_json::from_str::<UpdateUserRequest>(r#"{"is_active": "nope"}"#).is_err());
        assert!(serde_json::from_str::<UpdateUserRequest>(r#"{"id": "abc"}"#).is_err());
    }
}
