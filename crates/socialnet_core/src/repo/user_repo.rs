//! User collection contract.

use crate::model::user::User;
use crate::repo::error::RepoResult;

/// Row-level access to the `users` collection.
pub trait UserRepository {
    /// Finds one user by `user_id`.
    fn find_user(&self, user_id: &str) -> RepoResult<Option<User>>;
    /// Inserts one user row.
    fn insert_user(&self, user: &User) -> RepoResult<()>;
    /// Rewrites all fields of the row keyed by `user.user_id` in one
    /// transaction. Returns the number of rows changed.
    fn update_user(&self, user: &User) -> RepoResult<usize>;
    /// Deletes the row keyed by `user_id`. Returns `false` when absent.
    fn delete_user(&self, user_id: &str) -> RepoResult<bool>;
}
