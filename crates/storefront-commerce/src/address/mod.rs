//! Address module.
//!
//! Address records, form validation, and the per-user address book.

mod book;
mod model;

pub use book::AddressBook;
pub use model::{is_valid_phone, Address, AddressInput, DEFAULT_COUNTRY};
