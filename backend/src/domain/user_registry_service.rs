//! Mirrored user registration.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRegistry, UserRepository};
use crate::domain::{Error, User};

/// Map user repository failures into domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// [`UserRegistry`] backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserRegistryService<U> {
    users: Arc<U>,
}

impl<U> UserRegistryService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserRegistry for UserRegistryService<U>
where
    U: UserRepository,
{
    async fn register(&self, user: &User) -> Result<User, Error> {
        self.users
            .upsert(user)
            .await
            .map_err(map_user_persistence_error)
    }
}
