/// In-memory user repository
///
/// Rows live in a `Vec` ordered by id behind a `tokio::sync::RwLock`.
/// Ids are assigned from a counter starting at 1, like a `BIGSERIAL`
/// column. Email uniqueness is enforced on insert.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, UserRepository};
use crate::models::user::{NewUser, User, UserPatch};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<User>,
    next_id: i64,
}

/// User repository backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, active or not
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns a row by id regardless of its active flag
    pub async fn get_any(&self, id: i64) -> Option<User> {
        self.table.read().await.rows.iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_active(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .iter()
            .filter(|u| u.is_active)
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_active_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|u| u.id == id && u.is_active)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, data: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|u| u.email == data.email) {
            return Err(RepositoryError::DuplicateEmail(data.email));
        }

        table.next_id += 1;
        let user = User {
            id: table.next_id,
            email: data.email,
            full_name: data.full_name,
            phone: data.phone,
            password_hash: data.password_hash,
            is_active: true,
        };
        table.rows.push(user.clone());

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        let mut table = self.table.write().await;

        Ok(table
            .rows
            .iter_mut()
            .find(|u| u.id == id && u.is_active)
            .map(|user| {
                user.apply_patch(patch);
                user.clone()
            }))
    }

    async fn deactivate(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let mut table = self.table.write().await;

        Ok(table
            .rows
            .iter_mut()
            .find(|u| u.id == id && u.is_active)
            .map(|user| {
                user.is_active = false;
                user.clone()
            }))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
