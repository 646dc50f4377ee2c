//! Per-user favorite products.
//!
//! Any signed-in user may create favorites; only the owner may read or
//! delete them.

use crate::error::CommerceError;
use crate::ids::{current_timestamp, ProductId, UserId};
use crate::store::KvStore;
use crate::store_key;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A product saved by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Unix timestamp.
    pub created_at: i64,
}

pub struct Favorites<S> {
    store: S,
}

impl<S: KvStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(user_id: &UserId, product_id: &ProductId) -> String {
        store_key!("favorite", user_id, product_id)
    }

    fn require_user(user: Option<&UserId>) -> Result<&UserId, CommerceError> {
        user.ok_or(CommerceError::Unauthenticated)
    }

    /// Signed-out users have no favorites.
    pub fn is_favorited(
        &self,
        user: Option<&UserId>,
        product_id: &ProductId,
    ) -> Result<bool, CommerceError> {
        match user {
            Some(user_id) => self.store.exists(&Self::key(user_id, product_id)),
            None => Ok(false),
        }
    }

    pub fn add(
        &self,
        user: Option<&UserId>,
        product_id: &ProductId,
    ) -> Result<Favorite, CommerceError> {
        let user_id = Self::require_user(user)?;
        let key = Self::key(user_id, product_id);
        if let Some(existing) = self.store.get(&key)? {
            return Ok(existing);
        }
        let favorite = Favorite {
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            created_at: current_timestamp(),
        };
        self.store.set(&key, &favorite)?;
        debug!(user_id = %user_id, product_id = %product_id, "added favorite");
        Ok(favorite)
    }

    /// Flip the favorite state. Returns whether the product is now a favorite.
    pub fn toggle(
        &self,
        user: Option<&UserId>,
        product_id: &ProductId,
    ) -> Result<bool, CommerceError> {
        let user_id = Self::require_user(user)?;
        let key = Self::key(user_id, product_id);
        if self.store.delete(&key)? {
            debug!(user_id = %user_id, product_id = %product_id, "removed favorite");
            return Ok(false);
        }
        self.add(user, product_id)?;
        Ok(true)
    }

    /// Fetch a favorite owned by `owner`. Only the owner may look.
    pub fn get(
        &self,
        user: Option<&UserId>,
        owner: &UserId,
        product_id: &ProductId,
    ) -> Result<Option<Favorite>, CommerceError> {
        let user_id = Self::require_user(user)?;
        if user_id != owner {
            return Err(CommerceError::Forbidden(format!(
                "favorite belongs to another user: {}",
                product_id
            )));
        }
        self.store.get(&Self::key(owner, product_id))
    }

    /// Delete a favorite. Only the owner may delete.
    pub fn remove(&self, user: Option<&UserId>, favorite: &Favorite) -> Result<bool, CommerceError> {
        let user_id = Self::require_user(user)?;
        if user_id != &favorite.user_id {
            return Err(CommerceError::Forbidden(format!(
                "favorite belongs to another user: {}",
                favorite.product_id
            )));
        }
        self.store
            .delete(&Self::key(&favorite.user_id, &favorite.product_id))
    }

    /// The user's favorites, newest first.
    pub fn list(&self, user: Option<&UserId>) -> Result<Vec<Favorite>, CommerceError> {
        let user_id = Self::require_user(user)?;
        let prefix = format!("{}:", store_key!("favorite", user_id));
        let mut favorites: Vec<Favorite> = self.store.scan(&prefix)?;
        favorites.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        Ok(favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_toggle() {
        let favorites = Favorites::new(MemoryStore::new());
        let user = UserId::new("u1");
        let product = ProductId::new("ring-1");

        assert!(!favorites.is_favorited(Some(&user), &product).unwrap());
        assert!(favorites.toggle(Some(&user), &product).unwrap());
        assert!(favorites.is_favorited(Some(&user), &product).unwrap());
        assert!(!favorites.toggle(Some(&user), &product).unwrap());
        assert!(favorites.list(Some(&user)).unwrap().is_empty());
    }

    #[test]
    fn test_signed_out() {
        let favorites = Favorites::new(MemoryStore::new());
        let product = ProductId::new("ring-1");

        assert!(!favorites.is_favorited(None, &product).unwrap());
        assert!(matches!(
            favorites.toggle(None, &product),
            Err(CommerceError::Unauthenticated)
        ));
        assert!(matches!(favorites.list(None), Err(CommerceError::Unauthenticated)));
    }

    #[test]
    fn test_owner_only() {
        let favorites = Favorites::new(MemoryStore::new());
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let product = ProductId::new("ring-1");
        let favorite = favorites.add(Some(&alice), &product).unwrap();

        assert!(matches!(
            favorites.get(Some(&bob), &alice, &product),
            Err(CommerceError::Forbidden(_))
        ));
        assert!(matches!(
            favorites.remove(Some(&bob), &favorite),
            Err(CommerceError::Forbidden(_))
        ));
        assert_eq!(
            favorites.get(Some(&alice), &alice, &product).unwrap(),
            Some(favorite.clone())
        );
        assert!(favorites.remove(Some(&alice), &favorite).unwrap());
    }

    #[test]
    fn test_add_is_idempotent() {
        let favorites = Favorites::new(MemoryStore::new());
        let user = UserId::new("u1");
        favorites.add(Some(&user), &ProductId::new("a")).unwrap();
        favorites.add(Some(&user), &ProductId::new("a")).unwrap();
        favorites.add(Some(&user), &ProductId::new("b")).unwrap();
        assert_eq!(favorites.list(Some(&user)).unwrap().len(), 2);
    }
}
