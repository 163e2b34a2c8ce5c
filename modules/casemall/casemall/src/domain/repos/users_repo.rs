use async_trait::async_trait;
use casemall_sdk::{NewUser, User};

use super::DbConnTrait;
use crate::domain::error::DomainError;

/// Repository trait for User persistence operations.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Option<User>, DomainError>;

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user: NewUser,
    ) -> Result<User, DomainError>;
}
