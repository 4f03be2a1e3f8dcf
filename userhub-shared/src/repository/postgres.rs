/// PostgreSQL-backed user repository
///
/// Each method is a single parameterized statement. Mutations carry the
/// `is_active = TRUE` predicate in their `WHERE` clause, so the visibility
/// check and the write cannot be separated by a concurrent request.
///
/// # Example
///
/// ```no_run
/// use userhub_shared::db::pool::{create_pool, DatabaseConfig};
/// use userhub_shared::repository::{postgres::PgUserRepository, UserRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let repo = PgUserRepository::new(pool);
///
/// // First page of active users
/// let users = repo.list_active(0, 10).await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{RepositoryError, UserRepository};
use crate::models::user::{NewUser, User, UserPatch};

/// User repository over a `sqlx` connection pool
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a repository using the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_active(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, phone, password_hash, is_active
            FROM users
            WHERE is_active = TRUE
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        debug!(skip, limit, returned = users.len(), "Listed active users");
        Ok(users)
    }

    async fn find_active_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, phone, password_hash, is_active
            FROM users
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, phone, password_hash, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, data: NewUser) -> Result<User, RepositoryError> {
        let email = data.email.clone();

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, full_name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, full_name, phone, password_hash, is_active
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.full_name)
        .bind(data.phone)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::DuplicateEmail(email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2, phone = $3
            WHERE id = $1 AND is_active = TRUE
            RETURNING id, email, full_name, phone, password_hash, is_active
            "#,
        )
        .bind(id)
        .bind(patch.full_name.as_deref())
        .bind(patch.phone.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn deactivate(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = FALSE
            WHERE id = $1 AND is_active = TRUE
            RETURNING id, email, full_name, phone, password_hash, is_active
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }
}
