/// User repository
///
/// The users endpoints never touch SQL directly. They talk to a
/// [`UserRepository`], which exposes one typed method per query the API
/// needs. Two implementations exist:
///
/// - [`postgres::PgUserRepository`]: parameterized `sqlx` queries against
///   the `users` table
/// - [`memory::InMemoryUserRepository`]: a lock-guarded `Vec`, used by
///   tests and for running the API without a database
///
/// # Visibility
///
/// Every lookup by id only matches rows with `is_active = true`. A user
/// that was never created and a user that was deactivated are
/// indistinguishable through this trait.
///
/// # Example
///
/// ```
/// use userhub_shared::models::user::NewUser;
/// use userhub_shared::repository::{memory::InMemoryUserRepository, UserRepository};
///
/// # async fn example() -> Result<(), userhub_shared::repository::RepositoryError> {
/// let repo = InMemoryUserRepository::new();
/// let user = repo
///     .create(NewUser {
///         email: "user@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         full_name: None,
///         phone: None,
///     })
///     .await?;
///
/// assert!(repo.find_active_by_id(user.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::user::{NewUser, User, UserPatch};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Another user already owns this email address
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations over users
///
/// Object-safe so it can live in application state as
/// `Arc<dyn UserRepository>`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists active users in insertion (id) order
    ///
    /// Callers are expected to have validated `skip >= 0` and `limit >= 1`.
    async fn list_active(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError>;

    /// Finds an active user by id
    async fn find_active_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// Finds a user by email, active or not
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Inserts a new active user
    async fn create(&self, data: NewUser) -> Result<User, RepositoryError>;

    /// Overwrites `full_name` and `phone` of an active user
    ///
    /// Returns `None` when no active user has this id.
    async fn update_profile(
        &self,
        id: i64,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError>;

    /// Marks an active user inactive
    ///
    /// Returns the user as it was after deactivation, or `None` when no
    /// active user has this id (including one deactivated earlier).
    async fn deactivate(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// Checks that the backing store is reachable
    async fn ping(&self) -> Result<(), RepositoryError>;
}
