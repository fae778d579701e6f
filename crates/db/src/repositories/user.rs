//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tally_core::group::validation::derive_username;
use tally_shared::types::UserId;

use crate::entities::users;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email. The lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
    }

    /// Creates a new user.
    ///
    /// The email is stored trimmed and lowercased. Without an explicit
    /// username one is derived from the email's local part, with a numeric
    /// suffix if that name is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including when the
    /// email or username is already registered.
    pub async fn create(
        &self,
        email: &str,
        username: Option<&str>,
    ) -> Result<users::Model, DbErr> {
        let email = email.trim().to_lowercase();
        let username = match username {
            Some(name) => name.trim().to_string(),
            None => self.available_username(&derive_username(&email)).await?,
        };

        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(email),
            username: Set(username),
            created_at: Set(chrono::Utc::now().into()),
        };

        user.insert(&self.db).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// `base`, then `base2`, `base3`, ... until one is free.
    async fn available_username(&self, base: &str) -> Result<String, DbErr> {
        if !self.username_exists(base).await? {
            return Ok(base.to_string());
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{base}{suffix}");
            if !self.username_exists(&candidate).await? {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }
}
