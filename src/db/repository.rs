//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the MCP layer.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Id, NewUser, User},
};

/// Repository for User operations.
pub trait UserRepository: Send + Sync {
    /// Get all users, ordered by ID.
    fn list(&self) -> impl Future<Output = DbResult<Vec<User>>> + Send;

    /// Get a user by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<User>> + Send;

    /// Create a new user and return it as stored.
    fn create(&self, user: &NewUser) -> impl Future<Output = DbResult<User>> + Send;
}

/// Database abstraction providing access to repositories.
///
/// Repositories are exposed through associated types, so callers generic over
/// `D: Database` pay no dynamic dispatch.
pub trait Database: Send + Sync {
    type Users<'a>: UserRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the user repository.
    fn users(&self) -> Self::Users<'_>;
}
