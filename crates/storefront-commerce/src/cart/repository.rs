//! Per-user cart persistence.

use crate::cart::{AddToCartRequest, Cart};
use crate::error::CommerceError;
use crate::ids::{LineItemId, UserId};
use crate::money::Currency;
use crate::store::KvStore;
use crate::store_key;

/// Loads and saves one cart per user through a [`KvStore`].
pub struct CartRepository<S> {
    store: S,
    currency: Currency,
}

impl<S: KvStore> CartRepository<S> {
    /// `currency` is used for carts that do not exist yet.
    pub fn new(store: S, currency: Currency) -> Self {
        Self { store, currency }
    }

    fn key(user_id: &UserId) -> String {
        store_key!("cart", user_id)
    }

    /// The user's cart, or a fresh empty one.
    pub fn load(&self, user_id: &UserId) -> Result<Cart, CommerceError> {
        Ok(self
            .store
            .get(&Self::key(user_id))?
            .unwrap_or_else(|| Cart::for_user(user_id.clone(), self.currency)))
    }

    pub fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        let user_id = cart.user_id.as_ref().ok_or(CommerceError::Unauthenticated)?;
        self.store.set(&Self::key(user_id), cart)
    }

    /// Load, add, save.
    pub fn add(
        &self,
        user_id: &UserId,
        request: AddToCartRequest,
    ) -> Result<LineItemId, CommerceError> {
        let mut cart = self.load(user_id)?;
        let line = cart.add(request)?;
        self.save(&cart)?;
        Ok(line)
    }

    /// Fold a guest cart into the user's stored cart.
    pub fn merge_guest(&self, user_id: &UserId, guest: Cart) -> Result<Cart, CommerceError> {
        let mut cart = self.load(user_id)?;
        cart.merge(guest)?;
        self.save(&cart)?;
        Ok(cart)
    }

    pub fn clear(&self, user_id: &UserId) -> Result<bool, CommerceError> {
        self.store.delete(&Self::key(user_id))
    }
}
