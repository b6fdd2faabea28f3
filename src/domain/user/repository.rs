use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

/// Credential store.
///
/// Email uniqueness is a policy concern; implementations store whatever
/// they are given.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn insert_user(&self, user: User) -> DomainResult<()>;
    /// Overwrite an existing record. Last write wins.
    async fn save_user(&self, user: User) -> DomainResult<()>;

    async fn list_users(&self) -> DomainResult<Vec<User>>;
    /// `email` must already be normalized.
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_default_admin(&self) -> DomainResult<Option<User>>;

    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
