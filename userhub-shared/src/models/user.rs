/// User model and its data-transfer shapes
///
/// `User` mirrors a row of the `users` table. It is never serialized to
/// clients directly; handlers convert it to [`UserView`], which has no
/// password field at all.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     full_name VARCHAR(255),
///     phone VARCHAR(50),
///     password_hash VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE
/// );
/// ```
///
/// # Example
///
/// ```
/// use userhub_shared::models::user::{User, UserView};
///
/// let user = User {
///     id: 1,
///     email: "jane@example.com".to_string(),
///     full_name: Some("Jane Doe".to_string()),
///     phone: None,
///     password_hash: "$argon2id$...".to_string(),
///     is_active: true,
/// };
///
/// let view = UserView::from(user);
/// assert_eq!(view.email, "jane@example.com");
/// ```

use serde::{Deserialize, Serialize};

/// User row
///
/// `is_active = false` marks a soft-deleted user. Such rows stay in the
/// table but are invisible to every lookup the users endpoints perform.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// System-assigned identifier, immutable after creation
    pub id: i64,

    /// Email address, unique across all users
    pub email: String,

    /// Optional display name
    pub full_name: Option<String>,

    /// Optional phone number
    pub phone: Option<String>,

    /// Argon2id password hash (PHC string)
    pub password_hash: String,

    /// Whether the user is visible through the API
    pub is_active: bool,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    pub full_name: Option<String>,

    pub phone: Option<String>,
}

/// The writable subset of a user
///
/// Both fields are overwritten on update. A `None` clears the stored value,
/// so clients must resend a field to keep it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            is_active: user.is_active,
        }
    }
}

impl User {
    /// Applies the writable fields of a patch, leaving everything else alone
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        self.full_name = patch.full_name.clone();
        self.phone = patch.phone.clone();
    }
}
