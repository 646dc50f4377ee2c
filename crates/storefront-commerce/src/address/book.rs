//! Address CRUD scoped to a user.

use crate::address::{Address, AddressInput};
use crate::error::CommerceError;
use crate::ids::{current_timestamp, AddressId, UserId};
use crate::store::KvStore;
use crate::store_key;
use tracing::info;

/// A user's saved addresses, persisted through a [`KvStore`].
///
/// At most one address per user is the default. The first address a user
/// saves becomes the default regardless of the flag on the input.
pub struct AddressBook<S> {
    store: S,
}

impl<S: KvStore> AddressBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(user_id: &UserId, id: &AddressId) -> String {
        store_key!("address", user_id, id)
    }

    fn prefix(user_id: &UserId) -> String {
        format!("{}:", store_key!("address", user_id))
    }

    /// Addresses for `user_id`, default first, then oldest first.
    pub fn list(&self, user_id: &UserId) -> Result<Vec<Address>, CommerceError> {
        let mut addresses: Vec<Address> = self.store.scan(&Self::prefix(user_id))?;
        addresses.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(addresses)
    }

    pub fn get(&self, user_id: &UserId, id: &AddressId) -> Result<Address, CommerceError> {
        self.store
            .get(&Self::key(user_id, id))?
            .ok_or_else(|| CommerceError::AddressNotFound(id.to_string()))
    }

    pub fn default_for(&self, user_id: &UserId) -> Result<Option<Address>, CommerceError> {
        Ok(self.list(user_id)?.into_iter().find(|a| a.is_default))
    }

    pub fn create(&self, user_id: &UserId, input: AddressInput) -> Result<Address, CommerceError> {
        input.validate()?;
        let is_first = self.list(user_id)?.is_empty();
        let mut address = Address::from_input(user_id.clone(), input, current_timestamp());
        if is_first {
            address.is_default = true;
        }
        if address.is_default {
            self.clear_default(user_id, Some(&address.id))?;
        }
        self.store.set(&Self::key(user_id, &address.id), &address)?;
        info!(user_id = %user_id, address_id = %address.id, default = address.is_default, "created address");
        Ok(address)
    }

    /// Replace an address's fields. Unsetting the default flag hands it to
    /// the next address; a user's only address stays the default.
    pub fn update(
        &self,
        user_id: &UserId,
        id: &AddressId,
        input: AddressInput,
    ) -> Result<Address, CommerceError> {
        input.validate()?;
        let mut address = self.get(user_id, id)?;
        let was_default = address.is_default;
        address.apply(input, current_timestamp());

        let successor = if was_default && !address.is_default {
            let next = self.list(user_id)?.into_iter().find(|a| &a.id != id);
            if next.is_none() {
                address.is_default = true;
            }
            next
        } else {
            None
        };

        if address.is_default {
            self.clear_default(user_id, Some(id))?;
        }
        self.store.set(&Self::key(user_id, id), &address)?;
        if let Some(mut next) = successor {
            next.is_default = true;
            self.store.set(&Self::key(user_id, &next.id), &next)?;
        }
        info!(user_id = %user_id, address_id = %id, "updated address");
        Ok(address)
    }

    /// Delete an address. If it was the default, the oldest remaining
    /// address takes over.
    pub fn delete(&self, user_id: &UserId, id: &AddressId) -> Result<(), CommerceError> {
        let address = self.get(user_id, id)?;
        self.store.delete(&Self::key(user_id, id))?;
        info!(user_id = %user_id, address_id = %id, "deleted address");

        if address.is_default {
            if let Some(mut next) = self.list(user_id)?.into_iter().next() {
                next.is_default = true;
                self.store.set(&Self::key(user_id, &next.id), &next)?;
            }
        }
        Ok(())
    }

    pub fn set_default(&self, user_id: &UserId, id: &AddressId) -> Result<Address, CommerceError> {
        let mut address = self.get(user_id, id)?;
        self.clear_default(user_id, Some(id))?;
        address.is_default = true;
        address.updated_at = current_timestamp();
        self.store.set(&Self::key(user_id, id), &address)?;
        Ok(address)
    }

    fn clear_default(&self, user_id: &UserId, keep: Option<&AddressId>) -> Result<(), CommerceError> {
        for mut other in self.list(user_id)? {
            if other.is_default && Some(&other.id) != keep {
                other.is_default = false;
                self.store.set(&Self::key(user_id, &other.id), &other)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(name: &str) -> AddressInput {
        AddressInput {
            name: name.to_string(),
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
            phone: "9876543210".to_string(),
            gst: "29ABCDE1234F1Z5".to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_first_address_becomes_default() {
        let book = AddressBook::new(MemoryStore::new());
        let user = UserId::new("u1");
        let first = book.create(&user, input("Home")).unwrap();
        let second = book.create(&user, input("Office")).unwrap();

        assert!(first.is_default);
        assert!(!second.is_default);
        assert_eq!(first.country, "India");
        assert_eq!(book.default_for(&user).unwrap().unwrap().id, first.id);
    }

    #[test]
    fn test_single_default_per_user() {
        let book = AddressBook::new(MemoryStore::new());
        let user = UserId::new("u1");
        let home = book.create(&user, input("Home")).unwrap();
        let mut office_input = input("Office");
        office_input.is_default = true;
        let office = book.create(&user, office_input).unwrap();

        let defaults: Vec<_> = book
            .list(&user)
            .unwrap()
            .into_iter()
            .filter(|a| a.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, office.id);

        book.set_default(&user, &home.id).unwrap();
        assert_eq!(book.default_for(&user).unwrap().unwrap().id, home.id);
        assert!(!book.get(&user, &office.id).unwrap().is_default);
    }

    #[test]
    fn test_users_are_isolated() {
        let book = AddressBook::new(MemoryStore::new());
        let alice = UserId::new("u1");
        let bob = UserId::new("u10");
        let address = book.create(&alice, input("Home")).unwrap();
        book.create(&bob, input("Home")).unwrap();

        assert_eq!(book.list(&alice).unwrap().len(), 1);
        assert!(matches!(
            book.get(&bob, &address.id),
            Err(CommerceError::AddressNotFound(_))
        ));
    }

    #[test]
    fn test_update_validates_and_applies() {
        let book = AddressBook::new(MemoryStore::new());
        let user = UserId::new("u1");
        let address = book.create(&user, input("Home")).unwrap();

        let mut changed = address.to_input();
        changed.city = "Mysuru".to_string();
        let updated = book.update(&user, &address.id, changed).unwrap();
        assert_eq!(updated.city, "Mysuru");

        let mut invalid = updated.to_input();
        invalid.phone = "abc".to_string();
        assert!(matches!(
            book.update(&user, &address.id, invalid),
            Err(CommerceError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_unsetting_default_keeps_one_default() {
        let book = AddressBook::new(MemoryStore::new());
        let user = UserId::new("u1");
        let home = book.create(&user, input("Home")).unwrap();

        let mut unset = home.to_input();
        unset.is_default = false;
        let updated = book.update(&user, &home.id, unset.clone()).unwrap();
        assert!(updated.is_default);

        let office = book.create(&user, input("Office")).unwrap();
        let updated = book.update(&user, &home.id, unset).unwrap();
        assert!(!updated.is_default);
        assert_eq!(book.default_for(&user).unwrap().unwrap().id, office.id);
        let defaults = book.list(&user).unwrap().into_iter().filter(|a| a.is_default).count();
        assert_eq!(defaults, 1);
    }

    #[test]
    fn test_deleting_default_promotes_next() {
        let book = AddressBook::new(MemoryStore::new());
        let user = UserId::new("u1");
        let home = book.create(&user, input("Home")).unwrap();
        let office = book.create(&user, input("Office")).unwrap();

        book.delete(&user, &home.id).unwrap();
        let remaining = book.list(&user).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, office.id);
        assert!(remaining[0].is_default);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let book = AddressBook::new(MemoryStore::new());
        let result = book.create(&UserId::new("u1"), AddressInput::default());
        assert!(matches!(result, Err(CommerceError::InvalidAddress(_))));
    }
}
