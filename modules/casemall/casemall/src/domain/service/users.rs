use std::sync::Arc;

use casemall_sdk::{NewUser, User};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::repos::UsersRepository;
use crate::infra::storage::db::db_err;

pub(crate) struct UsersService<UR: UsersRepository> {
    repo: Arc<UR>,
    db: DatabaseConnection,
}

impl<UR: UsersRepository> UsersService<UR> {
    pub(crate) fn new(repo: Arc<UR>, db: DatabaseConnection) -> Self {
        Self { repo, db }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, DomainError> {
        debug!(user_id, "Getting user");
        self.repo
            .get(&self.db, user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    pub async fn register_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        validate_new_user(&new_user)?;

        let txn = self.db.begin().await.map_err(db_err)?;
        if self.repo.get(&txn, &new_user.user_id).await?.is_some() {
            return Err(DomainError::validation(
                "user_id",
                format!("user '{}' already exists", new_user.user_id),
            ));
        }
        let user = self.repo.create(&txn, new_user).await?;
        txn.commit().await.map_err(db_err)?;

        info!(user_id = %user.user_id, "Registered user");
        Ok(user)
    }
}

fn validate_new_user(new_user: &NewUser) -> Result<(), DomainError> {
    if new_user.user_id.trim().is_empty() {
        return Err(DomainError::validation("user_id", "must not be empty"));
    }
    if new_user.name.trim().is_empty() {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    if !new_user.email.contains('@') {
        return Err(DomainError::validation("email", "invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            user_id: "alice".to_owned(),
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            phone: "010-0000-0000".to_owned(),
        }
    }

    #[test]
    fn rejects_blank_id_and_bad_email() {
        assert!(validate_new_user(&new_user()).is_ok());

        let blank = NewUser {
            user_id: " ".to_owned(),
            ..new_user()
        };
        assert!(matches!(
            validate_new_user(&blank),
            Err(DomainError::Validation { field, .. }) if field == "user_id"
        ));

        let bad_email = NewUser {
            email: "alice".to_owned(),
            ..new_user()
        };
        assert!(matches!(
            validate_new_user(&bad_email),
            Err(DomainError::Validation { field, .. }) if field == "email"
        ));
    }
}
