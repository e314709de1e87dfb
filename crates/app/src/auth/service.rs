//! Auth service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{Actor, NewUser, User},
        repository::PgUsersRepository,
        token::hash_token,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, token: &str) -> Result<Actor, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &hash_token(token))
            .await?;

        tx.commit().await?;

        Ok(Actor {
            user: user.uuid,
            role: user.role,
        })
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the actor it belongs to.
    async fn authenticate_bearer(&self, token: &str) -> Result<Actor, AuthServiceError>;

    /// Provision a user, optionally with an API token digest.
    async fn create_user(&self, user: NewUser) -> Result<User, AuthServiceError>;
}
