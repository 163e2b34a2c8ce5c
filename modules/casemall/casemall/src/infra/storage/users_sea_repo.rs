use async_trait::async_trait;
use casemall_sdk::{NewUser, User};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::domain::error::DomainError;
use crate::domain::repos::{DbConnTrait, UsersRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::user::{ActiveModel as UserAM, Entity as UserEntity};

/// ORM-based implementation of the `UsersRepository` trait.
#[derive(Clone, Default)]
pub struct SeaUsersRepository;

#[async_trait]
impl UsersRepository for SeaUsersRepository {
    async fn get<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find_by_id(user_id.to_owned())
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create<C: DbConnTrait + Send + Sync>(
        &self,
        conn: &C,
        user: NewUser,
    ) -> Result<User, DomainError> {
        let m = UserAM {
            user_id: Set(user.user_id),
            name: Set(user.name),
            email: Set(user.email),
            phone: Set(user.phone),
        };
        let saved = m.insert(conn).await.map_err(db_err)?;
        Ok(saved.into())
    }
}
