//! Profile store port.
//!
//! Sole writer of users, farms and crops.
//!
//! # Design
//!
//! - **Point lookups**: users are found by their unique E.164 phone number
//! - **Atomic registration**: a user, its farm and all its crops are committed
//!   together or not at all; no partial profile is ever visible

use async_trait::async_trait;

use crate::domain::foundation::{PersistenceError, PhoneNumber};
use crate::domain::profile::{NewProfile, Profile, User};

/// Repository port for farmer profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Find a registered user by phone number.
    ///
    /// Returns `None` if no user has registered with this number.
    async fn find_user_by_phone(&self, phone: &PhoneNumber)
        -> Result<Option<User>, PersistenceError>;

    /// Load the farm and crops owned by a user.
    ///
    /// Crops are returned in registration order.
    ///
    /// # Errors
    ///
    /// - `IncompleteProfile` if the user has no farm
    /// - `Database` on storage failure
    async fn load_profile(&self, user: &User) -> Result<Profile, PersistenceError>;

    /// Create a user with its farm and crops in one transaction.
    ///
    /// # Errors
    ///
    /// - `Database` on any storage failure; nothing has been written
    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ProfileStore) {}
    }
}
